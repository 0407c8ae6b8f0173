//! CLI command handler for account transfers

use crate::audit::AuditLogger;
use crate::error::BalanceResult;
use crate::models::{AccountType, Money};
use crate::services::{DashboardSnapshot, TransferRequest, TransferService};
use crate::storage::Store;

/// Handle the transfer command
///
/// Balances are fetched first so the request can be checked against the
/// source account before anything is written.
pub fn handle_transfer_command(
    store: &dyn Store,
    audit: &AuditLogger,
    from: AccountType,
    to: AccountType,
    amount: Money,
    note: Option<String>,
) -> BalanceResult<()> {
    let snapshot = DashboardSnapshot::load(store)?;
    let service = TransferService::new(store, audit);

    let mut request = TransferRequest::new(from, to, amount);
    if let Some(note) = note {
        request = request.with_note(note);
    }

    let entries = service.transfer(&request, &snapshot)?;

    println!("Transfer recorded:");
    for entry in &entries {
        println!(
            "  {:<10} {:>16}  {}",
            entry.account_type.to_string(),
            entry.amount.to_string(),
            entry.notes.as_deref().unwrap_or("")
        );
    }

    let after = DashboardSnapshot::load(store)?;
    println!();
    println!("  {} balance: {}", from, after.account_balance(from));
    println!("  {} balance: {}", to, after.account_balance(to));

    Ok(())
}
