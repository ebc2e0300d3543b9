//! Stack pane rendering for the main and auxiliary stacks
//!
//! Both stacks are drawn side by side, top of stack first. Values that are
//! printable ASCII also show their character, since string mode fills the
//! stack with character codes.

use crate::memory::Word;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the stack pane
#[derive(Debug, Default)]
pub struct StackScrollState {
    pub offset: usize,
}

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    /// Bottom to top
    pub main_stack: &'a [Word],
    /// Bottom to top
    pub aux_stack: &'a [Word],
}

/// `'A'` style annotation for printable ASCII codes
pub(super) fn char_hint(value: Word) -> Option<char> {
    u8::try_from(value)
        .ok()
        .filter(|b| b.is_ascii_graphic() || *b == b' ')
        .map(char::from)
}

fn stack_items(values: &[Word], offset: usize, height: usize) -> Vec<ListItem<'static>> {
    if values.is_empty() {
        return vec![ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment))];
    }

    values
        .iter()
        .rev()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(depth, &value)| {
            let marker = if depth == 0 { "▸ " } else { "  " };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("{:>3} │ ", depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    value.to_string(),
                    if depth == 0 {
                        Style::default()
                            .fg(DEFAULT_THEME.number)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.number)
                    },
                ),
            ];
            if let Some(c) = char_hint(value) {
                spans.push(Span::styled(
                    format!("  '{}'", c),
                    Style::default().fg(DEFAULT_THEME.string),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect()
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Clamp scroll offset to the taller stack
    let tallest = data.main_stack.len().max(data.aux_stack.len());
    scroll_state.offset = scroll_state
        .offset
        .min(tallest.saturating_sub(visible_height));

    let main = List::new(stack_items(
        data.main_stack,
        scroll_state.offset,
        visible_height,
    ))
    .block(
        Block::default()
            .title(format!(" Main Stack ({}) ", data.main_stack.len()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(main, columns[0]);

    let aux = List::new(stack_items(
        data.aux_stack,
        scroll_state.offset,
        visible_height,
    ))
    .block(
        Block::default()
            .title(format!(" Aux Stack ({}) ", data.aux_stack.len()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(aux, columns[1]);
}
