//! Edit-transaction dialog
//!
//! Only price and quantity can change; type, category and note stay as
//! recorded.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::UPDATE_FAILED;
use crate::models::{AmountUpdate, Money, Transaction};
use crate::services::TransactionService;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::{render_field, Notification, TextInput};

use super::transaction::parse_quantity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Price,
    Quantity,
}

/// State for the edit form
#[derive(Debug, Clone, Default)]
pub struct EditFormState {
    pub focused_field: EditField,
    /// "Foods · Nasi goreng", shown above the inputs
    pub summary: String,
    pub price_input: TextInput,
    pub quantity_input: TextInput,
    pub error_message: Option<String>,
}

impl EditFormState {
    /// Prefill from the stored price and quantity
    pub fn from_transaction(txn: &Transaction) -> Self {
        let category = txn.category().map(|c| c.as_str()).unwrap_or("-");
        Self {
            focused_field: EditField::Price,
            summary: format!("{} · {}", category, txn.note()),
            price_input: TextInput::new().content(txn.price.rupiah().to_string()),
            quantity_input: TextInput::new().content(txn.quantity.to_string()),
            error_message: None,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            EditField::Price => EditField::Quantity,
            EditField::Quantity => EditField::Price,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            EditField::Price => &mut self.price_input,
            EditField::Quantity => &mut self.quantity_input,
        }
    }

    pub fn build(&self) -> Result<AmountUpdate, String> {
        let price = Money::parse(self.price_input.value())
            .map_err(|_| "Enter a valid price".to_string())?;
        let quantity = parse_quantity(self.quantity_input.value())?;
        let update = AmountUpdate::new(price, quantity);
        update.validate().map_err(|e| e.to_string())?;
        Ok(update)
    }
}

/// Render the edit dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.edit_form;
    let area = centered_rect_fixed(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Edit Transaction ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Summary
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Price
            Constraint::Length(1), // Quantity
            Constraint::Length(1), // New total
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            form.summary.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        chunks[0],
    );
    render_field(
        frame,
        chunks[2],
        "Price",
        &form.price_input,
        form.focused_field == EditField::Price,
    );
    render_field(
        frame,
        chunks[3],
        "Quantity",
        &form.quantity_input,
        form.focused_field == EditField::Quantity,
    );

    if let Ok(update) = form.build() {
        let line = Line::from(vec![
            Span::styled(format!("{:>10}: ", "Total"), Style::default().fg(Color::Cyan)),
            Span::styled(
                update.total().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[4]);
    }

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Switch  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for the edit dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.edit_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
        KeyCode::Enter => save_edit(app),
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Backspace => {
            form.error_message = None;
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.error_message = None;
            form.focused_input().delete();
        }
        KeyCode::Char(c) => {
            form.error_message = None;
            form.focused_input().insert(c);
        }
        _ => return false,
    }
    true
}

fn save_edit(app: &mut App) {
    let ActiveDialog::EditTransaction(id) = app.active_dialog else {
        return;
    };
    let update = match app.edit_form.build() {
        Ok(update) => update,
        Err(e) => {
            app.edit_form.error_message = Some(e);
            return;
        }
    };

    let service = TransactionService::new(app.store, app.audit);
    match service.edit(id, update) {
        Ok(txn) => {
            app.close_dialog();
            app.refresh();
            app.notify(Notification::success(format!(
                "Transaction updated, total {}",
                txn.total
            )));
        }
        Err(e) => {
            let message = format!("{}: {}", UPDATE_FAILED, e);
            app.edit_form.error_message = Some(message.clone());
            app.notify(Notification::error(message));
        }
    }
}
