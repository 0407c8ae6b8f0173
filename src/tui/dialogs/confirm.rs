//! Delete confirmation dialog
//!
//! Shows what is about to be removed and waits for y/n

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::DELETE_FAILED;
use crate::models::TransactionId;
use crate::services::TransactionService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::Notification;

/// Render a confirmation dialog for deleting `id`
pub fn render(frame: &mut Frame, app: &App, id: TransactionId) {
    let area = centered_rect_fixed(54, 9, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete Transaction ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let detail = match app.snapshot.find(id) {
        Some(row) => {
            let txn = &row.transaction;
            let category = txn.category().map(|c| c.as_str()).unwrap_or("-");
            format!("{} {} · {} · {}", txn.id, category, txn.note(), txn.total)
        }
        None => id.to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(detail, Style::default().fg(Color::White))),
        Line::from(Span::styled(
            "Its ledger postings are removed as well.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle y/n for the delete confirmation
pub fn handle_key(app: &mut App, key: KeyEvent, id: TransactionId) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            delete_transaction(app, id);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
        _ => return false,
    }
    true
}

fn delete_transaction(app: &mut App, id: TransactionId) {
    let service = TransactionService::new(app.store, app.audit);
    match service.delete(id) {
        Ok(deleted) => {
            app.refresh();
            app.notify(Notification::success(format!(
                "Deleted {} ({} postings)",
                deleted.transaction.id,
                deleted.ledger_entries.len()
            )));
        }
        Err(e) => {
            app.notify(Notification::error(format!("{}: {}", DELETE_FAILED, e)));
        }
    }
}
