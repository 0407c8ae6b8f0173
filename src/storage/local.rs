//! JSON-file store
//!
//! Holds both tables in `store.json` and derives the three views on read,
//! the same way the hosted database does:
//! - `total` is price × quantity
//! - running balance is the cumulative signed total in chronological order
//! - deleting a transaction cascades to its ledger entries

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::file_io::{read_json, write_json_atomic};
use super::Store;
use crate::error::{BalanceError, BalanceResult};
use crate::models::{
    AccountBalance, AccountType, AmountUpdate, BalanceView, LedgerEntry, LedgerEntryId, Money,
    NewLedgerEntry, NewTransaction, Transaction, TransactionId, TransactionWithBalance,
};

/// On-disk layout, one array per table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    account_balances: Vec<LedgerEntry>,
}

/// Store backed by a single JSON file
pub struct LocalStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl LocalStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> BalanceResult<Self> {
        let path = path.into();
        let data: StoreData = read_json(&path)?;
        tracing::debug!(
            path = %path.display(),
            transactions = data.transactions.len(),
            entries = data.account_balances.len(),
            "loaded local store"
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> BalanceResult<RwLockReadGuard<'_, StoreData>> {
        self.data
            .read()
            .map_err(|e| BalanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BalanceResult<RwLockWriteGuard<'_, StoreData>> {
        self.data
            .write()
            .map_err(|e| BalanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Apply `mutate` to a copy of the data, persist it, then swap it in.
    /// A failed write leaves memory and disk unchanged.
    fn mutate<T, F>(&self, mutate: F) -> BalanceResult<T>
    where
        F: FnOnce(&mut StoreData) -> BalanceResult<T>,
    {
        let mut guard = self.write()?;
        let mut next = guard.clone();
        let out = mutate(&mut next)?;
        write_json_atomic(&self.path, &next)?;
        *guard = next;
        Ok(out)
    }
}

/// Transactions oldest first, insertion order breaking ties
fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.created_at);
    sorted
}

impl Store for LocalStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn fetch_transactions(&self) -> BalanceResult<Vec<TransactionWithBalance>> {
        let data = self.read()?;

        let mut running = Money::zero();
        let mut rows: Vec<TransactionWithBalance> = chronological(&data.transactions)
            .into_iter()
            .map(|txn| {
                running += txn.signed_total();
                TransactionWithBalance {
                    transaction: txn.clone(),
                    running_balance: running,
                }
            })
            .collect();

        rows.reverse();
        Ok(rows)
    }

    fn fetch_balance(&self) -> BalanceResult<BalanceView> {
        let data = self.read()?;

        let income: Money = data
            .transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.total)
            .sum();
        let expense: Money = data
            .transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.total)
            .sum();

        Ok(BalanceView::new(income, expense))
    }

    fn fetch_account_balances(&self) -> BalanceResult<Vec<AccountBalance>> {
        let data = self.read()?;

        Ok(AccountType::ALL
            .into_iter()
            .filter_map(|account| {
                let mut entries = data
                    .account_balances
                    .iter()
                    .filter(|e| e.account_type == account)
                    .peekable();
                entries.peek()?;
                Some(AccountBalance {
                    account_type: account,
                    balance: entries.map(|e| e.amount).sum(),
                })
            })
            .collect())
    }

    fn get_transaction(&self, id: TransactionId) -> BalanceResult<Option<Transaction>> {
        let data = self.read()?;
        Ok(data.transactions.iter().find(|t| t.id == id).cloned())
    }

    fn insert_transaction(&self, txn: &NewTransaction) -> BalanceResult<Transaction> {
        txn.validate()
            .map_err(|e| BalanceError::Storage(format!("Row rejected: {}", e)))?;

        let stored = Transaction {
            id: TransactionId::new(),
            kind: txn.kind,
            expense_category: txn.expense_category,
            income_category: txn.income_category,
            notes: txn.notes.clone(),
            price: txn.price,
            quantity: txn.quantity,
            total: txn.total(),
            created_at: Utc::now(),
        };

        self.mutate(|data| {
            data.transactions.push(stored.clone());
            Ok(())
        })?;

        Ok(stored)
    }

    fn insert_ledger_entries(&self, entries: &[NewLedgerEntry]) -> BalanceResult<Vec<LedgerEntry>> {
        self.mutate(|data| {
            let now = Utc::now();
            let mut stored = Vec::with_capacity(entries.len());

            for entry in entries {
                if let Some(txn_id) = entry.transaction_id {
                    if !data.transactions.iter().any(|t| t.id == txn_id) {
                        return Err(BalanceError::Storage(format!(
                            "Ledger entry references missing transaction {}",
                            txn_id
                        )));
                    }
                }
                stored.push(LedgerEntry {
                    id: entry.id.unwrap_or_else(LedgerEntryId::new),
                    transaction_id: entry.transaction_id,
                    account_type: entry.account_type,
                    amount: entry.amount,
                    notes: entry.notes.clone(),
                    created_at: Some(now),
                });
            }

            data.account_balances.extend(stored.iter().cloned());
            Ok(stored)
        })
    }

    fn update_transaction_amounts(
        &self,
        id: TransactionId,
        update: AmountUpdate,
    ) -> BalanceResult<Transaction> {
        update
            .validate()
            .map_err(|e| BalanceError::Storage(format!("Row rejected: {}", e)))?;

        self.mutate(|data| {
            let txn = data
                .transactions
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| BalanceError::transaction_not_found(id.to_string()))?;

            txn.price = update.price;
            txn.quantity = update.quantity;
            txn.total = update.total();
            Ok(txn.clone())
        })
    }

    fn delete_transaction(&self, id: TransactionId) -> BalanceResult<()> {
        self.mutate(|data| {
            let before = data.transactions.len();
            data.transactions.retain(|t| t.id != id);
            if data.transactions.len() == before {
                return Err(BalanceError::transaction_not_found(id.to_string()));
            }
            data.account_balances
                .retain(|e| e.transaction_id != Some(id));
            Ok(())
        })
    }

    fn fetch_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<Vec<LedgerEntry>> {
        let data = self.read()?;
        Ok(data
            .account_balances
            .iter()
            .filter(|e| e.transaction_id == Some(id))
            .cloned()
            .collect())
    }

    fn delete_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<()> {
        self.mutate(|data| {
            data.account_balances
                .retain(|e| e.transaction_id != Some(id));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseCategory, IncomeCategory};
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(temp_dir.path().join("data").join("store.json")).unwrap();
        (temp_dir, store)
    }

    fn expense(price: i64, quantity: u32) -> NewTransaction {
        NewTransaction::new(
            Category::Expense(ExpenseCategory::Foods),
            Money::from_rupiah(price),
            quantity,
            Some("Makan siang".into()),
        )
    }

    fn income(price: i64) -> NewTransaction {
        NewTransaction::new(
            Category::Income(IncomeCategory::Salary),
            Money::from_rupiah(price),
            1,
            None,
        )
    }

    #[test]
    fn test_empty_store() {
        let (_dir, store) = store();
        assert!(store.fetch_transactions().unwrap().is_empty());
        assert_eq!(store.fetch_balance().unwrap(), BalanceView::default());
        assert!(store.fetch_account_balances().unwrap().is_empty());
    }

    #[test]
    fn test_insert_computes_total() {
        let (_dir, store) = store();
        let txn = store.insert_transaction(&expense(12_000, 3)).unwrap();
        assert_eq!(txn.total, Money::from_rupiah(36_000));
    }

    #[test]
    fn test_running_balance_and_order() {
        let (_dir, store) = store();
        let first = store.insert_transaction(&income(100_000)).unwrap();
        let second = store.insert_transaction(&expense(30_000, 1)).unwrap();

        let rows = store.fetch_transactions().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction.id, second.id);
        assert_eq!(rows[0].running_balance, Money::from_rupiah(70_000));
        assert_eq!(rows[1].transaction.id, first.id);
        assert_eq!(rows[1].running_balance, Money::from_rupiah(100_000));
    }

    #[test]
    fn test_balance_view() {
        let (_dir, store) = store();
        store.insert_transaction(&income(500_000)).unwrap();
        store.insert_transaction(&expense(20_000, 2)).unwrap();

        let view = store.fetch_balance().unwrap();
        assert_eq!(view.total_income, Money::from_rupiah(500_000));
        assert_eq!(view.total_expense, Money::from_rupiah(40_000));
        assert_eq!(view.balance, Money::from_rupiah(460_000));
    }

    #[test]
    fn test_account_balances_sum_entries() {
        let (_dir, store) = store();
        store
            .insert_ledger_entries(&NewLedgerEntry::transfer_pair(
                AccountType::Rekening,
                AccountType::Pocket,
                Money::from_rupiah(25_000),
                None,
            ))
            .unwrap();

        let balances = store.fetch_account_balances().unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].account_type, AccountType::Rekening);
        assert_eq!(balances[0].balance, Money::from_rupiah(-25_000));
        assert_eq!(balances[1].account_type, AccountType::Pocket);
        assert_eq!(balances[1].balance, Money::from_rupiah(25_000));
    }

    #[test]
    fn test_batch_with_dangling_link_is_rejected_whole() {
        let (_dir, store) = store();
        let txn = store.insert_transaction(&expense(1_000, 1)).unwrap();

        let good = NewLedgerEntry::posting_for(&txn, AccountType::Dana);
        let mut bad = good.clone();
        bad.transaction_id = Some(TransactionId::new());

        assert!(store.insert_ledger_entries(&[good, bad]).is_err());
        assert!(store.fetch_ledger_entries_for(txn.id).unwrap().is_empty());
    }

    #[test]
    fn test_update_amounts() {
        let (_dir, store) = store();
        let txn = store.insert_transaction(&expense(10_000, 1)).unwrap();

        let updated = store
            .update_transaction_amounts(txn.id, AmountUpdate::new(Money::from_rupiah(7_500), 4))
            .unwrap();
        assert_eq!(updated.total, Money::from_rupiah(30_000));

        let rows = store.fetch_transactions().unwrap();
        assert_eq!(rows[0].transaction.total, Money::from_rupiah(30_000));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store
            .update_transaction_amounts(
                TransactionId::new(),
                AmountUpdate::new(Money::from_rupiah(1), 1),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_cascades() {
        let (_dir, store) = store();
        let txn = store.insert_transaction(&expense(5_000, 2)).unwrap();
        store
            .insert_ledger_entries(&[NewLedgerEntry::posting_for(&txn, AccountType::Dana)])
            .unwrap();

        store.delete_transaction(txn.id).unwrap();

        assert!(store.fetch_transactions().unwrap().is_empty());
        assert!(store.fetch_ledger_entries_for(txn.id).unwrap().is_empty());
        assert!(store.fetch_account_balances().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let (dir, store) = store();
        let txn = store.insert_transaction(&expense(8_000, 1)).unwrap();
        drop(store);

        let reopened = LocalStore::open(dir.path().join("data").join("store.json")).unwrap();
        assert_eq!(reopened.get_transaction(txn.id).unwrap(), Some(txn));
    }

    #[test]
    fn test_restored_entry_keeps_id() {
        let (_dir, store) = store();
        let txn = store.insert_transaction(&expense(5_000, 1)).unwrap();
        let entries = store
            .insert_ledger_entries(&[NewLedgerEntry::posting_for(&txn, AccountType::Pocket)])
            .unwrap();

        store.delete_ledger_entries_for(txn.id).unwrap();
        let restore: Vec<NewLedgerEntry> = entries.iter().map(NewLedgerEntry::from).collect();
        let restored = store.insert_ledger_entries(&restore).unwrap();

        assert_eq!(restored[0].id, entries[0].id);
    }
}
