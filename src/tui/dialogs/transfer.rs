//! Transfer dialog
//!
//! Moves money between two of the three accounts. The available balance
//! of the source account is shown from the current snapshot.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::TRANSFER_FAILED;
use crate::models::{AccountType, Money};
use crate::services::{TransferRequest, TransferService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::{render_choice, render_field, Notification, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferField {
    #[default]
    From,
    To,
    Amount,
    Note,
}

impl TransferField {
    pub fn next(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::Amount,
            Self::Amount => Self::Note,
            Self::Note => Self::From,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::From => Self::Note,
            Self::To => Self::From,
            Self::Amount => Self::To,
            Self::Note => Self::Amount,
        }
    }
}

/// State for the transfer form
#[derive(Debug, Clone)]
pub struct TransferFormState {
    pub focused_field: TransferField,
    pub from: AccountType,
    pub to: AccountType,
    pub amount_input: TextInput,
    pub note_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for TransferFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferFormState {
    pub fn new() -> Self {
        Self {
            focused_field: TransferField::From,
            from: AccountType::Rekening,
            to: AccountType::Dana,
            amount_input: TextInput::new().placeholder("e.g. 50000 or 50rb"),
            note_input: TextInput::new().placeholder("Optional note"),
            error_message: None,
        }
    }

    /// Handle ←/→ on an account field. Returns false for text fields.
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        let step = |a: AccountType| if forward { a.next() } else { a.prev() };
        match self.focused_field {
            TransferField::From => self.from = step(self.from),
            TransferField::To => self.to = step(self.to),
            _ => return false,
        }
        true
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransferField::Amount => Some(&mut self.amount_input),
            TransferField::Note => Some(&mut self.note_input),
            _ => None,
        }
    }

    /// Parse the form into a request; balance checks happen in the service
    pub fn build(&self) -> Result<TransferRequest, String> {
        let amount = Money::parse(self.amount_input.value())
            .map_err(|_| "Enter a valid amount".to_string())?;
        let request = TransferRequest::new(self.from, self.to, amount);
        let note = self.note_input.value().trim();
        Ok(if note.is_empty() {
            request
        } else {
            request.with_note(note)
        })
    }
}

/// Render the transfer dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.transfer_form;
    let area = centered_rect_fixed(58, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Transfer ")
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
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
            Constraint::Length(1), // From
            Constraint::Length(1), // Available
            Constraint::Length(1), // To
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Note
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let focused = |field| form.focused_field == field;

    render_choice(frame, chunks[0], "From", form.from.as_str(), focused(TransferField::From));

    let available = app.snapshot.account_balance(form.from);
    let available_line = Line::from(vec![
        Span::styled(format!("{:>10}: ", "Available"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            available.to_string(),
            Style::default().fg(if available.is_positive() {
                Color::Green
            } else {
                Color::Red
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(available_line), chunks[1]);

    render_choice(frame, chunks[2], "To", form.to.as_str(), focused(TransferField::To));
    render_field(frame, chunks[3], "Amount", &form.amount_input, focused(TransferField::Amount));
    render_field(frame, chunks[4], "Note", &form.note_input, focused(TransferField::Note));

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[6],
        );
    } else if form.from == form.to {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Pick two different accounts",
                Style::default().fg(Color::Yellow),
            )),
            chunks[6],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Account  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Transfer  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[7]);
}

/// Handle key input for the transfer dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.transfer_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            form.focused_field = form.focused_field.prev();
        }
        KeyCode::Tab | KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab | KeyCode::Up => form.focused_field = form.focused_field.prev(),
        KeyCode::Enter => submit_transfer(app),
        KeyCode::Left => {
            form.error_message = None;
            if !form.cycle_choice(false) {
                if let Some(input) = form.focused_input() {
                    input.move_left();
                }
            }
        }
        KeyCode::Right => {
            form.error_message = None;
            if !form.cycle_choice(true) {
                if let Some(input) = form.focused_input() {
                    input.move_right();
                }
            }
        }
        KeyCode::Backspace => {
            form.error_message = None;
            if let Some(input) = form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            form.error_message = None;
            if let Some(input) = form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Char(c) => {
            form.error_message = None;
            match form.focused_input() {
                Some(input) => input.insert(c),
                None => return false,
            }
        }
        _ => return false,
    }
    true
}

fn submit_transfer(app: &mut App) {
    let request = match app.transfer_form.build() {
        Ok(request) => request,
        Err(e) => {
            app.transfer_form.error_message = Some(e);
            return;
        }
    };

    let service = TransferService::new(app.store, app.audit);
    match service.transfer(&request, &app.snapshot) {
        Ok(_) => {
            app.close_dialog();
            app.refresh();
            app.notify(Notification::success(format!(
                "Moved {} from {} to {}",
                request.amount, request.from, request.to
            )));
        }
        Err(e) => {
            let message = format!("{}: {}", TRANSFER_FAILED, e);
            app.transfer_form.error_message = Some(message.clone());
            app.notify(Notification::error(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_with_note() {
        let mut form = TransferFormState::new();
        form.amount_input = TextInput::new().content("50rb");
        form.note_input = TextInput::new().content(" Top up ");

        let request = form.build().unwrap();
        assert_eq!(request.from, AccountType::Rekening);
        assert_eq!(request.to, AccountType::Dana);
        assert_eq!(request.amount, Money::from_rupiah(50_000));
        assert_eq!(request.note.as_deref(), Some("Top up"));
    }

    #[test]
    fn test_blank_note_is_none() {
        let mut form = TransferFormState::new();
        form.amount_input = TextInput::new().content("1000");
        assert!(form.build().unwrap().note.is_none());
    }

    #[test]
    fn test_cycle_accounts() {
        let mut form = TransferFormState::new();
        assert!(form.cycle_choice(true));
        assert_eq!(form.from, AccountType::Dana);

        form.focused_field = TransferField::To;
        assert!(form.cycle_choice(false));
        assert_eq!(form.to, AccountType::Rekening);

        form.focused_field = TransferField::Amount;
        assert!(!form.cycle_choice(true));
    }

    #[test]
    fn test_invalid_amount() {
        let mut form = TransferFormState::new();
        form.amount_input = TextInput::new().content("banyak");
        assert!(form.build().is_err());
    }
}
