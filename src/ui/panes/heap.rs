//! Heap pane rendering with written cells and the call stack
//!
//! The upper part lists every heap cell that has been written, ordered by
//! address. The lower part lists call frames, innermost first, with the
//! position execution will resume at.

use super::stack::char_hint;
use crate::memory::{calls::CallFrame, heap::Address, Word};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the heap pane
#[derive(Debug, Default)]
pub struct HeapScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the heap pane
pub struct HeapRenderData<'a> {
    pub heap: &'a [(Address, Word)],
    pub call_stack: &'a [CallFrame],
}

/// Render the heap pane
pub fn render_heap_pane(
    frame: &mut Frame,
    area: Rect,
    data: HeapRenderData,
    is_focused: bool,
    scroll_state: &mut HeapScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let calls_height = u16::try_from(data.call_stack.len().max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height / 2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(calls_height)])
        .split(area);

    let visible_height = rows[0].height.saturating_sub(2).max(1) as usize;
    let total_items = data.heap.len();

    // Follow new cells as they appear, otherwise keep the user's scroll
    if total_items > scroll_state.prev_item_count && total_items > visible_height {
        scroll_state.offset = total_items - visible_height;
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_items.saturating_sub(visible_height));
    scroll_state.prev_item_count = total_items;

    let heap_items: Vec<ListItem> = if data.heap.is_empty() {
        vec![ListItem::new("(nothing stored)").style(Style::default().fg(DEFAULT_THEME.comment))]
    } else {
        data.heap
            .iter()
            .skip(scroll_state.offset)
            .take(visible_height)
            .map(|&(address, value)| {
                let mut spans = vec![
                    Span::styled(
                        format!("[{:>6}]", address),
                        Style::default().fg(DEFAULT_THEME.primary),
                    ),
                    Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                    Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
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
    };

    let heap_list = List::new(heap_items).block(
        Block::default()
            .title(format!(" Heap ({} cells) ", total_items))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(heap_list, rows[0]);

    let call_items: Vec<ListItem> = if data.call_stack.is_empty() {
        vec![ListItem::new("(no calls)").style(Style::default().fg(DEFAULT_THEME.comment))]
    } else {
        data.call_stack
            .iter()
            .enumerate()
            .rev()
            .take(rows[1].height as usize)
            .map(|(depth, frame)| {
                ListItem::new(Line::from(vec![
                    Span::styled("↪ ", Style::default().fg(DEFAULT_THEME.secondary)),
                    Span::styled(
                        format!("[{}] ", depth),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                    Span::styled(
                        format!("call at {} ", frame.return_position),
                        Style::default()
                            .fg(DEFAULT_THEME.function)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("heading {}", frame.return_direction),
                        Style::default().fg(DEFAULT_THEME.fg),
                    ),
                ]))
            })
            .collect()
    };

    let calls = List::new(call_items).block(
        Block::default()
            .title(format!(" Call Stack ({}) ", data.call_stack.len()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(calls, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{Direction, Position};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(heap: &[(Address, Word)], call_stack: &[CallFrame]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut scroll = HeapScrollState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_heap_pane(
                    frame,
                    area,
                    HeapRenderData { heap, call_stack },
                    true,
                    &mut scroll,
                )
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn frames(depth: usize) -> Vec<CallFrame> {
        vec![
            CallFrame {
                return_position: Position::new(2, 0),
                return_direction: Direction::Right,
            };
            depth
        ]
    }

    #[test]
    fn test_deep_call_stacks_render() {
        for depth in [65_534, 65_535, 70_000] {
            let text = draw(&[], &frames(depth));
            assert!(text.contains(&format!("Call Stack ({})", depth)));
        }
    }

    #[test]
    fn test_negative_addresses_listed() {
        let text = draw(&[(-1, 5), (3, 4)], &[]);
        assert!(text.contains("Heap (2 cells)"));
        assert!(text.contains("(no calls)"));
    }
}
