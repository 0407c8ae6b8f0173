//! Status bar view
//!
//! Shows the backend, when the snapshot was fetched, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.store.backend_name()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(
                "updated {}",
                app.snapshot
                    .fetched_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let total = app.snapshot.accounts_total();
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled("Accounts: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        total.to_string(),
        Style::default().fg(if total.is_negative() {
            Color::Red
        } else {
            Color::Green
        }),
    ));

    let hints = match app.input_mode {
        InputMode::Search => " Enter:Apply  Esc:Cancel ",
        InputMode::Normal => " a:Add  t:Transfer  /:Search  f:Filter  ?:Help  q:Quit ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
