//! Add-transaction dialog
//!
//! Modal form for recording income or an expense. Type, category and
//! payment account are picked with ←/→; the rest are text fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::error::SAVE_FAILED;
use crate::models::{AccountType, Category, Money, NewTransaction, TransactionType};
use crate::services::TransactionService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::{render_choice, render_field, Notification, TextInput};

/// Which field is currently focused in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Type,
    Category,
    Price,
    Quantity,
    Note,
    Payment,
}

/// State for the add-transaction form
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub kind: TransactionType,
    pub category: Category,
    pub price_input: TextInput,
    pub quantity_input: TextInput,
    pub note_input: TextInput,
    /// Account an expense is paid from; income always lands in rekening
    pub payment: AccountType,
    pub error_message: Option<String>,
}

impl TransactionFormState {
    pub fn new(payment: AccountType) -> Self {
        let kind = TransactionType::Expense;
        Self {
            focused_field: TransactionField::default(),
            kind,
            category: first_category(kind),
            price_input: TextInput::new().placeholder("e.g. 15000 or 15rb"),
            quantity_input: TextInput::new().content("1"),
            note_input: TextInput::new().placeholder("Optional note"),
            payment,
            error_message: None,
        }
    }

    /// Fields in tab order; the payment row only exists for expenses
    fn fields(&self) -> Vec<TransactionField> {
        let mut fields = vec![
            TransactionField::Type,
            TransactionField::Category,
            TransactionField::Price,
            TransactionField::Quantity,
            TransactionField::Note,
        ];
        if self.kind == TransactionType::Expense {
            fields.push(TransactionField::Payment);
        }
        fields
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focused_field).unwrap_or(0);
        self.focused_field = fields[(idx + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focused_field).unwrap_or(0);
        self.focused_field = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Switch between income and expense, resetting the category
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
        self.category = first_category(self.kind);
    }

    /// Step through the categories of the current type
    pub fn cycle_category(&mut self, forward: bool) {
        let options = Category::for_type(self.kind);
        let idx = options.iter().position(|c| *c == self.category).unwrap_or(0);
        let next = if forward {
            (idx + 1) % options.len()
        } else {
            (idx + options.len() - 1) % options.len()
        };
        self.category = options[next];
    }

    /// Handle ←/→ on a choice field. Returns false for text fields.
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        match self.focused_field {
            TransactionField::Type => self.toggle_kind(),
            TransactionField::Category => self.cycle_category(forward),
            TransactionField::Payment => {
                self.payment = if forward {
                    self.payment.next()
                } else {
                    self.payment.prev()
                };
            }
            _ => return false,
        }
        true
    }

    /// The focused text input, if the focused field is one
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Price => Some(&mut self.price_input),
            TransactionField::Quantity => Some(&mut self.quantity_input),
            TransactionField::Note => Some(&mut self.note_input),
            _ => None,
        }
    }

    /// Build the insert payload and the paying account
    pub fn build(&self) -> Result<(NewTransaction, AccountType), String> {
        let price = Money::parse(self.price_input.value())
            .map_err(|_| "Enter a valid price".to_string())?;
        let quantity = parse_quantity(self.quantity_input.value())?;
        let note = Some(self.note_input.value().to_string());

        let input = NewTransaction::with_type(self.kind, self.category, price, quantity, note)
            .map_err(|e| e.to_string())?;

        let payment = match self.kind {
            TransactionType::Expense => self.payment,
            TransactionType::Income => AccountType::Rekening,
        };
        Ok((input, payment))
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

fn first_category(kind: TransactionType) -> Category {
    Category::for_type(kind)[0]
}

/// Parse a quantity field, rejecting zero and non-numbers
pub(crate) fn parse_quantity(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err("Quantity must be a whole number of at least 1".to_string()),
    }
}

/// Render the add-transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.transaction_form;
    let area = centered_rect_fixed(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Transaction ")
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
            Constraint::Length(1), // Type
            Constraint::Length(1), // Category
            Constraint::Length(1), // Price
            Constraint::Length(1), // Quantity
            Constraint::Length(1), // Note
            Constraint::Length(1), // Payment
            Constraint::Length(1), // Total
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let focused = |field| form.focused_field == field;

    render_choice(frame, chunks[0], "Type", form.kind.as_str(), focused(TransactionField::Type));
    render_choice(
        frame,
        chunks[1],
        "Category",
        form.category.as_str(),
        focused(TransactionField::Category),
    );
    render_field(frame, chunks[2], "Price", &form.price_input, focused(TransactionField::Price));
    render_field(
        frame,
        chunks[3],
        "Quantity",
        &form.quantity_input,
        focused(TransactionField::Quantity),
    );
    render_field(frame, chunks[4], "Note", &form.note_input, focused(TransactionField::Note));

    if form.kind == TransactionType::Expense {
        render_choice(
            frame,
            chunks[5],
            "Pay from",
            form.payment.as_str(),
            focused(TransactionField::Payment),
        );
    } else {
        let line = Line::from(Span::styled(
            "  Income is credited to rekening",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(line), chunks[5]);
    }

    if let Ok((input, _)) = form.build() {
        let line = Line::from(vec![
            Span::styled(format!("{:>10}: ", "Total"), Style::default().fg(Color::Cyan)),
            Span::styled(
                input.total().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[6]);
    }

    if let Some(ref error) = form.error_message {
        let line = Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(line), chunks[8]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Choose  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[9]);
}

/// Handle key input for the add-transaction dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => save_transaction(app),
        KeyCode::Left => {
            if !form.cycle_choice(false) {
                if let Some(input) = form.focused_input() {
                    input.move_left();
                }
            }
        }
        KeyCode::Right => {
            if !form.cycle_choice(true) {
                if let Some(input) = form.focused_input() {
                    input.move_right();
                }
            }
        }
        KeyCode::Char(' ') if form.focused_field == TransactionField::Type => form.toggle_kind(),
        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Char(c) => {
            form.clear_error();
            match form.focused_input() {
                Some(input) => input.insert(c),
                None => return false,
            }
        }
        _ => return false,
    }
    true
}

/// Validate, insert and post the transaction, then refresh
fn save_transaction(app: &mut App) {
    let (input, payment) = match app.transaction_form.build() {
        Ok(built) => built,
        Err(e) => {
            app.transaction_form.set_error(e);
            return;
        }
    };

    let service = TransactionService::new(app.store, app.audit);
    match service.add(input, payment) {
        Ok(txn) => {
            app.close_dialog();
            app.refresh();
            app.notify(Notification::success(format!(
                "{} {} saved",
                txn.kind,
                txn.total
            )));
        }
        Err(e) => {
            let message = format!("{}: {}", SAVE_FAILED, e);
            app.transaction_form.set_error(message.clone());
            app.notify(Notification::error(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};

    fn filled(price: &str, quantity: &str) -> TransactionFormState {
        let mut form = TransactionFormState::new(AccountType::Dana);
        form.price_input = TextInput::new().content(price);
        form.quantity_input = TextInput::new().content(quantity);
        form
    }

    #[test]
    fn test_build_expense() {
        let mut form = filled("15rb", "2");
        form.note_input = TextInput::new().content("  Kopi  ");
        let (input, payment) = form.build().unwrap();

        assert_eq!(input.kind, TransactionType::Expense);
        assert_eq!(input.expense_category, Some(ExpenseCategory::Foods));
        assert_eq!(input.total(), Money::from_rupiah(30_000));
        assert_eq!(input.notes.as_deref(), Some("Kopi"));
        assert_eq!(payment, AccountType::Dana);
    }

    #[test]
    fn test_income_always_goes_to_rekening() {
        let mut form = filled("5000000", "1");
        form.toggle_kind();
        let (input, payment) = form.build().unwrap();

        assert_eq!(input.income_category, Some(IncomeCategory::Salary));
        assert!(input.expense_category.is_none());
        assert_eq!(payment, AccountType::Rekening);
    }

    #[test]
    fn test_build_rejects_bad_amounts() {
        assert!(filled("", "1").build().is_err());
        assert!(filled("abc", "1").build().is_err());
        assert!(filled("0", "1").build().is_err());
        assert!(filled("1000", "0").build().is_err());
        assert!(filled("1000", "-2").build().is_err());
    }

    #[test]
    fn test_payment_field_only_for_expense() {
        let mut form = TransactionFormState::new(AccountType::Rekening);
        form.focused_field = TransactionField::Note;
        form.next_field();
        assert_eq!(form.focused_field, TransactionField::Payment);

        form.toggle_kind();
        form.focused_field = TransactionField::Note;
        form.next_field();
        assert_eq!(form.focused_field, TransactionField::Type);
    }

    #[test]
    fn test_category_cycles_within_type() {
        let mut form = TransactionFormState::new(AccountType::Rekening);
        form.cycle_category(false);
        assert_eq!(form.category, Category::Expense(ExpenseCategory::Entertainment));

        form.toggle_kind();
        form.cycle_category(true);
        form.cycle_category(true);
        assert_eq!(form.category, Category::Income(IncomeCategory::Salary));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("1.5").is_err());
    }
}
