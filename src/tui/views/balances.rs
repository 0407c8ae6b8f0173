//! Balance cards
//!
//! Income, expense and net balance from the aggregate view, then one card
//! per account. Accounts without ledger entries show Rp 0.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{AccountType, Money};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

struct Card {
    title: String,
    amount: Money,
    color: Color,
}

/// Render the six summary cards
pub fn render(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let cards = cards(app);
    let slots = layout.card_slots(cards.len());

    for (card, area) in cards.iter().zip(slots) {
        render_card(frame, card, area);
    }
}

fn cards(app: &App) -> Vec<Card> {
    let balance = app.snapshot.balance;
    let mut cards = vec![
        Card {
            title: "Pemasukan".into(),
            amount: balance.total_income,
            color: Color::Green,
        },
        Card {
            title: "Pengeluaran".into(),
            amount: balance.total_expense,
            color: Color::Red,
        },
        Card {
            title: "Saldo".into(),
            amount: balance.balance,
            color: if balance.balance.is_negative() {
                Color::Red
            } else {
                Color::Cyan
            },
        },
    ];

    cards.extend(AccountType::ALL.into_iter().map(|account| Card {
        title: account.as_str().to_string(),
        amount: app.snapshot.account_balance(account),
        color: Color::Magenta,
    }));
    cards
}

fn render_card(frame: &mut Frame, card: &Card, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", card.title))
        .title_style(Style::default().fg(card.color))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let value = Line::from(Span::styled(
        card.amount.to_string(),
        Style::default()
            .fg(card.color)
            .add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(value)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
