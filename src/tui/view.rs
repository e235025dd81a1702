// File: ./src/tui/view.rs
use crate::tui::state::{AppState, Speaker};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    // --- Dialog ---
    let dialog_area = chunks[0];
    let inner_width = dialog_area.width.saturating_sub(2);
    let inner_height = dialog_area.height.saturating_sub(2);

    let lines = dialog_lines(state);
    let total = wrapped_height(&lines, inner_width);
    let offset = total
        .saturating_sub(inner_height)
        .saturating_sub(state.scroll_back);

    let dialog = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Lict "))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(dialog, dialog_area);

    // --- Input ---
    let input_area = chunks[1];
    let input = Paragraph::new(state.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    f.render_widget(input, input_area);

    let cursor_x = input_area.x
        + 1
        + u16::try_from(state.input.chars().count())
            .unwrap_or(u16::MAX)
            .min(input_area.width.saturating_sub(3));
    f.set_cursor_position((cursor_x, input_area.y + 1));

    // --- Footer ---
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Enter", key),
        Span::raw(":Send  "),
        Span::styled("PgUp/PgDn", key),
        Span::raw(":Scroll  "),
        Span::styled("Esc", key),
        Span::raw(":Quit"),
    ]));
    f.render_widget(footer, chunks[2]);
}

fn dialog_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, entry) in state.dialog.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        let (label, color) = match entry.speaker {
            Speaker::User => ("You", Color::Cyan),
            Speaker::Lict => ("Lict", Color::Green),
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for text_line in entry.text.lines() {
            lines.push(Line::raw(format!("  {}", text_line)));
        }
    }
    lines
}

/// Rows the lines occupy once wrapped to `width`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height_counts_wraps_and_blank_lines() {
        let lines = vec![Line::raw("abcdefghij"), Line::raw(""), Line::raw("abc")];
        assert_eq!(wrapped_height(&lines, 4), 3 + 1 + 1);
        assert_eq!(wrapped_height(&lines, 20), 3);
        assert_eq!(wrapped_height(&lines, 0), 10 + 1 + 3);
    }
}
