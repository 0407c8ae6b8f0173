//! Balance display formatting

use crate::models::{AccountType, Money};
use crate::services::DashboardSnapshot;

/// Aggregate totals followed by the three account balances
pub fn format_summary(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();
    let balance = &snapshot.balance;

    output.push_str(&format!("{:<16}{:>18}\n", "Total Income", balance.total_income.to_string()));
    output.push_str(&format!("{:<16}{:>18}\n", "Total Expense", balance.total_expense.to_string()));
    output.push_str(&format!("{:<16}{:>18}\n", "Balance", balance.balance.to_string()));
    output.push('\n');
    output.push_str(&format_account_balances(snapshot));
    output
}

/// One line per account, zero for accounts without entries
pub fn format_account_balances(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<16}{:>18}\n", "Account", "Balance"));
    output.push_str(&format!("{:-<16}{:->18}\n", "", ""));
    for account in AccountType::ALL {
        output.push_str(&format!(
            "{:<16}{:>18}\n",
            account.to_string(),
            snapshot.account_balance(account).to_string()
        ));
    }
    output.push_str(&format!("{:-<16}{:->18}\n", "", ""));
    output.push_str(&format!(
        "{:<16}{:>18}\n",
        "TOTAL",
        snapshot.accounts_total().to_string()
    ));
    output
}

/// Money with ANSI colour: red below zero, green above
pub fn format_money_colored(amount: Money) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", amount)
    } else {
        amount.to_string()
    }
}
