//! Dashboard snapshot
//!
//! The three read-only projections fetched together. Snapshots are never
//! patched in place; every mutation is followed by a fresh fetch.

use chrono::{DateTime, Utc};

use crate::config::DayBoundary;
use crate::error::{BalanceError, BalanceResult};
use crate::models::{
    balance_of, AccountBalance, AccountType, BalanceView, Money, TransactionId,
    TransactionWithBalance,
};
use crate::reports::DailyExpenses;
use crate::storage::Store;

/// Transactions, aggregate totals and per-account totals at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Newest first, as the store orders them
    pub transactions: Vec<TransactionWithBalance>,
    pub balance: BalanceView,
    pub account_balances: Vec<AccountBalance>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// A snapshot with nothing in it, shown before the first fetch
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            balance: BalanceView::default(),
            account_balances: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Fetch all three projections; any failure fails the load
    pub fn load(store: &dyn Store) -> BalanceResult<Self> {
        let transactions = store.fetch_transactions()?;
        let balance = store.fetch_balance()?;
        let account_balances = store.fetch_account_balances()?;

        tracing::debug!(
            backend = store.backend_name(),
            transactions = transactions.len(),
            accounts = account_balances.len(),
            "snapshot loaded"
        );

        Ok(Self {
            transactions,
            balance,
            account_balances,
            fetched_at: Utc::now(),
        })
    }

    /// Fetch a new snapshot, keeping this one's value for any projection
    /// that fails. Returns the first failure alongside.
    pub fn refreshed(&self, store: &dyn Store) -> (Self, Option<BalanceError>) {
        let mut first_error = None;

        let mut keep = |what: &str, err: BalanceError| {
            tracing::error!(projection = what, error = %err, "refresh failed, keeping previous");
            first_error.get_or_insert(err);
        };

        let transactions = store.fetch_transactions().unwrap_or_else(|e| {
            keep("transactions", e);
            self.transactions.clone()
        });
        let balance = store.fetch_balance().unwrap_or_else(|e| {
            keep("balance", e);
            self.balance
        });
        let account_balances = store.fetch_account_balances().unwrap_or_else(|e| {
            keep("account_balances", e);
            self.account_balances.clone()
        });

        let snapshot = Self {
            transactions,
            balance,
            account_balances,
            fetched_at: Utc::now(),
        };
        (snapshot, first_error)
    }

    /// Balance of one account; accounts without entries hold zero
    pub fn account_balance(&self, account: AccountType) -> Money {
        balance_of(&self.account_balances, account)
    }

    /// Sum over all three accounts
    pub fn accounts_total(&self) -> Money {
        AccountType::ALL
            .into_iter()
            .map(|a| self.account_balance(a))
            .sum()
    }

    pub fn find(&self, id: TransactionId) -> Option<&TransactionWithBalance> {
        self.transactions.iter().find(|t| t.transaction.id == id)
    }

    /// 14-day expense buckets ending today
    pub fn daily_expenses(&self, boundary: DayBoundary) -> DailyExpenses {
        DailyExpenses::build(
            self.transactions.iter().map(|row| &row.transaction),
            boundary.today(),
            boundary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseCategory, NewLedgerEntry, NewTransaction};
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_local_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(temp_dir.path().join("store.json")).unwrap();
        let txn = store
            .insert_transaction(&NewTransaction::new(
                Category::Expense(ExpenseCategory::Foods),
                Money::from_rupiah(20_000),
                1,
                None,
            ))
            .unwrap();
        store
            .insert_ledger_entries(&[NewLedgerEntry::posting_for(&txn, AccountType::Dana)])
            .unwrap();

        let snapshot = DashboardSnapshot::load(&store).unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.balance.total_expense, Money::from_rupiah(20_000));
        assert_eq!(snapshot.account_balance(AccountType::Dana), Money::from_rupiah(-20_000));
        assert_eq!(snapshot.account_balance(AccountType::Pocket), Money::zero());
        assert_eq!(snapshot.accounts_total(), Money::from_rupiah(-20_000));
        assert!(snapshot.find(txn.id).is_some());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = DashboardSnapshot::empty();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.accounts_total(), Money::zero());
        assert_eq!(snapshot.daily_expenses(DayBoundary::Utc).days().len(), 14);
    }
}
