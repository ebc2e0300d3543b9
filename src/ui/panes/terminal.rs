//! Program output pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Scroll state for the output pane
#[derive(Debug, Default)]
pub struct TerminalScrollState {
    pub offset: usize,
}

/// Data needed to render the output pane
pub struct TerminalRenderData<'a> {
    /// Output printed up to the viewed step
    pub output: &'a str,
    /// Text typed so far while the program waits for input
    pub pending_input: Option<&'a str>,
}

/// Render the output pane
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    data: TerminalRenderData,
    is_focused: bool,
    scroll_state: &mut TerminalScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.output.is_empty() && data.pending_input.is_none() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let mut all_items: Vec<ListItem> = data
        .output
        .lines()
        .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    if let Some(typed) = data.pending_input {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(
                "input> ",
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(typed, Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled("▏", Style::default().fg(DEFAULT_THEME.secondary)),
        ])));
    }

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
