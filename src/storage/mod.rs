//! Storage layer for balance-cli
//!
//! [`Store`] is the query/mutation seam every service talks to. It mirrors
//! what the hosted backend offers: three read-only projections and
//! insert/update/delete on the `transactions` and `account_balances` tables.
//!
//! Two implementations exist:
//! - [`RestStore`] speaks PostgREST over HTTPS
//! - [`LocalStore`] keeps both tables in a JSON file and computes the views
//!   itself, for offline use and tests

pub mod file_io;
pub mod local;
pub mod rest;

pub use file_io::{read_json, write_json_atomic};
pub use local::LocalStore;
pub use rest::RestStore;

use std::time::Duration;

use crate::config::{BackendKind, BalancePaths, Settings};
use crate::error::BalanceResult;
use crate::models::{
    AccountBalance, AmountUpdate, BalanceView, LedgerEntry, NewLedgerEntry, NewTransaction,
    Transaction, TransactionId, TransactionWithBalance,
};

/// Table holding transaction rows
pub const TRANSACTIONS_TABLE: &str = "transactions";
/// Table holding ledger entries
pub const LEDGER_TABLE: &str = "account_balances";
/// View: transactions with running balance, newest first
pub const TRANSACTIONS_VIEW: &str = "transactions_with_balance";
/// View: single row of aggregate totals
pub const BALANCE_VIEW: &str = "balance_view";
/// View: one row per account with entries
pub const ACCOUNT_BALANCE_VIEW: &str = "balance_per_account";

/// Generic query/mutation interface over the two tables and three views
pub trait Store {
    /// Short name for logs and `balance config`
    fn backend_name(&self) -> &'static str;

    /// All transactions with their running balance, newest first
    fn fetch_transactions(&self) -> BalanceResult<Vec<TransactionWithBalance>>;

    /// Aggregate totals; zeros when the view has no row
    fn fetch_balance(&self) -> BalanceResult<BalanceView>;

    /// Per-account sums. Accounts without entries may be absent.
    fn fetch_account_balances(&self) -> BalanceResult<Vec<AccountBalance>>;

    /// A single transaction row, if it exists
    fn get_transaction(&self, id: TransactionId) -> BalanceResult<Option<Transaction>>;

    /// Insert one transaction and return the stored row
    fn insert_transaction(&self, txn: &NewTransaction) -> BalanceResult<Transaction>;

    /// Insert ledger entries in a single call; all or nothing
    fn insert_ledger_entries(&self, entries: &[NewLedgerEntry]) -> BalanceResult<Vec<LedgerEntry>>;

    /// Overwrite price and quantity; the store recomputes the total
    fn update_transaction_amounts(
        &self,
        id: TransactionId,
        update: AmountUpdate,
    ) -> BalanceResult<Transaction>;

    /// Delete a transaction row
    fn delete_transaction(&self, id: TransactionId) -> BalanceResult<()>;

    /// Ledger entries linked to a transaction
    fn fetch_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<Vec<LedgerEntry>>;

    /// Delete ledger entries linked to a transaction
    fn delete_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<()>;
}

/// Open the store selected by the settings
pub fn open_store(settings: &Settings, paths: &BalancePaths) -> BalanceResult<Box<dyn Store>> {
    match settings.backend {
        BackendKind::Local => {
            tracing::debug!(path = %paths.store_file().display(), "opening local store");
            Ok(Box::new(LocalStore::open(paths.store_file())?))
        }
        BackendKind::Rest => {
            let (url, key) = settings.remote_credentials()?;
            tracing::debug!(url, "opening rest store");
            Ok(Box::new(RestStore::new(
                url,
                key,
                Duration::from_secs(settings.request_timeout_secs),
            )?))
        }
    }
}
