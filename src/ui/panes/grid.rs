//! Grid pane rendering with command highlighting
//!
//! This module renders the program grid, coloring cells by command category
//! and marking the cell under the instruction pointer.
//!
//! # Features
//!
//! - Command highlighting (digits, flow control, mirrors, I/O, strings)
//! - IP cell highlight, red when the program stopped on an error
//! - Row and column rulers
//! - Scrolling in both axes that keeps the IP cell in view

use crate::program::{Command, Grid, InstructionPointer};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the row-number gutter, including the trailing space
const GUTTER: usize = 5;

/// Scroll state for the grid pane
#[derive(Debug, Default)]
pub struct GridScrollState {
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    pub grid: &'a Grid,
    pub ip: InstructionPointer,
    pub is_error: bool,
    pub is_waiting: bool,
}

fn command_style(command: Command) -> Style {
    match command {
        Command::Push(_) => Style::default().fg(DEFAULT_THEME.number),
        Command::Call | Command::Return => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        Command::Mirror(_) | Command::Bridge(_) => Style::default().fg(DEFAULT_THEME.mirror),
        Command::StringMode => Style::default().fg(DEFAULT_THEME.string),
        Command::Halt => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        Command::Print(_) | Command::Read(_) => Style::default().fg(DEFAULT_THEME.secondary),
        Command::NoOp => Style::default().fg(DEFAULT_THEME.comment),
        c if c.is_flow_control() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Keep `target` within `[offset, offset + visible)`
fn follow(offset: &mut usize, target: usize, visible: usize) {
    if target < *offset {
        *offset = target;
    } else if target >= *offset + visible {
        *offset = target + 1 - visible;
    }
}

/// Render the grid pane
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    data: GridRenderData,
    is_focused: bool,
    scroll_state: &mut GridScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = format!(
        " Grid {}×{} │ IP {} {} ",
        data.grid.width(),
        data.grid.height(),
        data.ip.position,
        data.ip.direction.arrow()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.grid.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // One line for the column ruler, borders on every side
    let visible_rows = area.height.saturating_sub(3).max(1) as usize;
    let visible_cols = (area.width as usize).saturating_sub(2 + GUTTER).max(1);

    let ip = data.ip.position;
    follow(&mut scroll_state.row_offset, ip.y, visible_rows);
    follow(&mut scroll_state.col_offset, ip.x, visible_cols);

    let col_end = (scroll_state.col_offset + visible_cols).min(data.grid.width());

    let mut lines = Vec::with_capacity(visible_rows + 1);

    // Column ruler: last digit of each column index
    let ruler: String = (scroll_state.col_offset..col_end)
        .map(|x| char::from(b'0' + (x % 10) as u8))
        .collect();
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(GUTTER)),
        Span::styled(ruler, Style::default().fg(DEFAULT_THEME.comment)),
    ]));

    let ip_style = if data.is_error {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if data.is_waiting {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.success)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };

    for y in (scroll_state.row_offset..data.grid.height()).take(visible_rows) {
        let is_ip_row = y == ip.y;
        let number_style = if is_ip_row {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![Span::styled(format!("{:4} ", y), number_style)];
        for x in scroll_state.col_offset..col_end {
            let (symbol, mut style) = match data.grid.cell(x, y) {
                Some(cell) => (cell.symbol, command_style(cell.command)),
                None => (' ', Style::default()),
            };
            if is_ip_row {
                style = style.bg(DEFAULT_THEME.current_line_bg);
            }
            if is_ip_row && x == ip.x {
                style = ip_style;
            }
            spans.push(Span::styled(symbol.to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
