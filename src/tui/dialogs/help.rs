//! Help dialog
//!
//! Lists the dashboard keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Dashboard"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("r", "Reload from the store"),
        key_line("a", "Add transaction"),
        key_line("t", "Transfer between accounts"),
        Line::from(""),
        heading("History"),
        Line::from(""),
        key_line("j/k", "Move selection down/up"),
        key_line("g/G", "Go to top/bottom"),
        key_line("e/Enter", "Edit price and quantity"),
        key_line("d/Del", "Delete transaction"),
        key_line("/", "Search notes, categories and totals"),
        key_line("f/F", "Next/previous category filter"),
        key_line("Esc", "Clear search and filter"),
        Line::from(""),
        heading("Forms"),
        Line::from(""),
        key_line("Tab", "Next field"),
        key_line("←/→", "Change a choice"),
        key_line("Enter", "Save"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ]
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
