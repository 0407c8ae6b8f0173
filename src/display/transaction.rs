//! Transaction display formatting
//!
//! History tables for `balance list` and the detail block shown after
//! add, edit and delete.

use chrono::Local;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Transaction, TransactionWithBalance};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Balance")]
    running_balance: String,
}

impl HistoryRow {
    fn from_row(row: &TransactionWithBalance) -> Self {
        let txn = &row.transaction;
        Self {
            id: txn.id.to_string(),
            date: format_timestamp(txn),
            kind: txn.kind.to_string(),
            category: category_name(txn).to_string(),
            note: truncate(txn.note(), 28),
            quantity: txn.quantity,
            total: txn.signed_total().to_string(),
            running_balance: row.running_balance.to_string(),
        }
    }
}

/// Format history rows as a table, newest first as given
pub fn format_transaction_table(rows: &[&TransactionWithBalance]) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(rows.iter().map(|r| HistoryRow::from_row(r)));
    table
        .with(Style::rounded())
        .modify(Columns::new(5..), Alignment::right());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", format_timestamp(txn)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", category_name(txn)));
    output.push_str(&format!("Price:       {}\n", txn.price));
    output.push_str(&format!("Quantity:    {}\n", txn.quantity));
    output.push_str(&format!("Total:       {}\n", txn.total));

    if !txn.note().is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note()));
    }

    output
}

fn category_name(txn: &Transaction) -> &'static str {
    txn.category().map(|c| c.as_str()).unwrap_or("-")
}

fn format_timestamp(txn: &Transaction) -> String {
    txn.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Shorten to `max_len` characters, ending in "..." when cut
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
