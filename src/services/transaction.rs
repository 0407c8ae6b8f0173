//! Transaction service
//!
//! Add, edit and delete transactions. Adding and deleting touch two tables,
//! so each is written as a short saga: if the second write fails, the first
//! is undone and the original error is returned.

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::{BalanceError, BalanceResult};
use crate::models::{
    AccountType, AmountUpdate, LedgerEntry, NewLedgerEntry, NewTransaction, Transaction,
    TransactionId,
};
use crate::storage::Store;

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a dyn Store,
    audit: &'a AuditLogger,
}

/// What a delete removed
#[derive(Debug, Clone)]
pub struct DeletedTransaction {
    pub transaction: Transaction,
    pub ledger_entries: Vec<LedgerEntry>,
}

fn entity_name(txn: &Transaction) -> Option<String> {
    txn.category().map(|c| c.to_string())
}

impl<'a> TransactionService<'a> {
    pub fn new(store: &'a dyn Store, audit: &'a AuditLogger) -> Self {
        Self { store, audit }
    }

    /// Record a transaction and its single ledger posting.
    ///
    /// Income posts `+total` to rekening; expenses post `-total` to `payment`.
    pub fn add(&self, input: NewTransaction, payment: AccountType) -> BalanceResult<Transaction> {
        input
            .validate()
            .map_err(|e| BalanceError::Validation(e.to_string()))?;

        let txn = self.store.insert_transaction(&input).map_err(|e| {
            tracing::error!(error = %e, kind = %input.kind, "failed to save transaction");
            e
        })?;

        let posting = NewLedgerEntry::posting_for(&txn, payment);
        if let Err(original) = self.store.insert_ledger_entries(std::slice::from_ref(&posting)) {
            tracing::error!(
                id = %txn.id,
                account = %posting.account_type,
                error = %original,
                "ledger posting failed, removing transaction"
            );
            return Err(self.undo_insert(&txn, original));
        }

        self.audit.record(&AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            entity_name(&txn),
            &txn,
        ));
        tracing::info!(id = %txn.id, total = %txn.total, account = %posting.account_type, "transaction added");

        Ok(txn)
    }

    /// Compensate a transaction row whose posting failed
    fn undo_insert(&self, txn: &Transaction, original: BalanceError) -> BalanceError {
        match self.store.delete_transaction(txn.id) {
            Ok(()) => {
                self.audit.record(&AuditEntry::revert(
                    EntityType::Transaction,
                    txn.id.to_string(),
                    format!("ledger posting failed: {}", original),
                    txn,
                ));
                original
            }
            Err(compensation) => {
                tracing::error!(
                    id = %txn.id,
                    error = %compensation,
                    "could not remove transaction after failed posting"
                );
                BalanceError::PartialWrite {
                    original: original.to_string(),
                    compensation: compensation.to_string(),
                }
            }
        }
    }

    /// Resolve a full id, a `txn-` display id, or a unique id prefix
    pub fn find(&self, identifier: &str) -> BalanceResult<Transaction> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self
                .store
                .get_transaction(id)?
                .ok_or_else(|| BalanceError::transaction_not_found(identifier));
        }

        let prefix = identifier
            .strip_prefix("txn-")
            .unwrap_or(identifier)
            .to_lowercase();
        if prefix.len() < 4 {
            return Err(BalanceError::Validation(format!(
                "Transaction id '{}' is too short",
                identifier
            )));
        }

        let mut matches: Vec<Transaction> = self
            .store
            .fetch_transactions()?
            .into_iter()
            .map(|row| row.transaction)
            .filter(|t| t.id.as_uuid().to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Err(BalanceError::transaction_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(BalanceError::Validation(format!(
                "Transaction id '{}' is ambiguous ({} matches)",
                identifier, n
            ))),
        }
    }

    /// Overwrite price and quantity. The ledger posting is left as recorded.
    pub fn edit(&self, id: TransactionId, update: AmountUpdate) -> BalanceResult<Transaction> {
        update
            .validate()
            .map_err(|e| BalanceError::Validation(e.to_string()))?;

        let before = self
            .store
            .get_transaction(id)?
            .ok_or_else(|| BalanceError::transaction_not_found(id.to_string()))?;

        let after = self
            .store
            .update_transaction_amounts(id, update)
            .map_err(|e| {
                tracing::error!(%id, error = %e, "failed to update transaction");
                e
            })?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.record(&AuditEntry::update(
            EntityType::Transaction,
            id.to_string(),
            entity_name(&after),
            &before,
            &after,
            diff,
        ));
        tracing::info!(%id, total = %after.total, "transaction updated");

        Ok(after)
    }

    /// Delete a transaction and its linked ledger entries.
    ///
    /// Entries go first. If the transaction delete then fails, they are
    /// re-inserted with their original ids.
    pub fn delete(&self, id: TransactionId) -> BalanceResult<DeletedTransaction> {
        let transaction = self
            .store
            .get_transaction(id)?
            .ok_or_else(|| BalanceError::transaction_not_found(id.to_string()))?;

        let ledger_entries = self.store.fetch_ledger_entries_for(id)?;
        if !ledger_entries.is_empty() {
            self.store.delete_ledger_entries_for(id).map_err(|e| {
                tracing::error!(%id, error = %e, "failed to delete ledger entries");
                e
            })?;
        }

        if let Err(original) = self.store.delete_transaction(id) {
            tracing::error!(%id, error = %original, "failed to delete transaction");
            return Err(self.restore_entries(id, &ledger_entries, original));
        }

        let deleted = DeletedTransaction {
            transaction,
            ledger_entries,
        };
        self.audit.record(&AuditEntry::delete(
            EntityType::Transaction,
            id.to_string(),
            entity_name(&deleted.transaction),
            &serde_json::json!({
                "transaction": &deleted.transaction,
                "ledger_entries": &deleted.ledger_entries,
            }),
        ));
        tracing::info!(%id, entries = deleted.ledger_entries.len(), "transaction deleted");

        Ok(deleted)
    }

    /// Put back ledger entries removed ahead of a failed transaction delete
    fn restore_entries(
        &self,
        id: TransactionId,
        entries: &[LedgerEntry],
        original: BalanceError,
    ) -> BalanceError {
        if entries.is_empty() {
            return original;
        }

        let restore: Vec<NewLedgerEntry> = entries.iter().map(NewLedgerEntry::from).collect();
        match self.store.insert_ledger_entries(&restore) {
            Ok(_) => {
                self.audit.record(&AuditEntry::revert(
                    EntityType::LedgerEntry,
                    id.to_string(),
                    format!("transaction delete failed: {}", original),
                    &entries,
                ));
                original
            }
            Err(compensation) => {
                tracing::error!(%id, error = %compensation, "could not restore ledger entries");
                BalanceError::PartialWrite {
                    original: original.to_string(),
                    compensation: compensation.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A store wrapper that fails chosen operations on demand

    use std::cell::Cell;

    use super::*;
    use crate::models::{AccountBalance, BalanceView, TransactionWithBalance};
    use crate::storage::LocalStore;

    #[derive(Default)]
    pub struct Faults {
        pub ledger_insert: Cell<bool>,
        pub transaction_delete: Cell<bool>,
        pub ledger_calls: Cell<usize>,
    }

    pub struct FlakyStore {
        pub inner: LocalStore,
        pub faults: Faults,
    }

    fn injected(what: &str) -> BalanceError {
        BalanceError::Backend {
            status: 500,
            code: None,
            message: format!("injected {} failure", what),
        }
    }

    impl Store for FlakyStore {
        fn backend_name(&self) -> &'static str {
            "flaky"
        }
        fn fetch_transactions(&self) -> BalanceResult<Vec<TransactionWithBalance>> {
            self.inner.fetch_transactions()
        }
        fn fetch_balance(&self) -> BalanceResult<BalanceView> {
            self.inner.fetch_balance()
        }
        fn fetch_account_balances(&self) -> BalanceResult<Vec<AccountBalance>> {
            self.inner.fetch_account_balances()
        }
        fn get_transaction(&self, id: TransactionId) -> BalanceResult<Option<Transaction>> {
            self.inner.get_transaction(id)
        }
        fn insert_transaction(&self, txn: &NewTransaction) -> BalanceResult<Transaction> {
            self.inner.insert_transaction(txn)
        }
        fn insert_ledger_entries(
            &self,
            entries: &[NewLedgerEntry],
        ) -> BalanceResult<Vec<LedgerEntry>> {
            let calls = self.faults.ledger_calls.get() + 1;
            self.faults.ledger_calls.set(calls);
            if self.faults.ledger_insert.get() {
                return Err(injected("ledger insert"));
            }
            self.inner.insert_ledger_entries(entries)
        }
        fn update_transaction_amounts(
            &self,
            id: TransactionId,
            update: AmountUpdate,
        ) -> BalanceResult<Transaction> {
            self.inner.update_transaction_amounts(id, update)
        }
        fn delete_transaction(&self, id: TransactionId) -> BalanceResult<()> {
            if self.faults.transaction_delete.get() {
                return Err(injected("transaction delete"));
            }
            self.inner.delete_transaction(id)
        }
        fn fetch_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<Vec<LedgerEntry>> {
            self.inner.fetch_ledger_entries_for(id)
        }
        fn delete_ledger_entries_for(&self, id: TransactionId) -> BalanceResult<()> {
            self.inner.delete_ledger_entries_for(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Faults, FlakyStore};
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Category, ExpenseCategory, IncomeCategory, Money};
    use crate::services::DashboardSnapshot;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        store: FlakyStore,
        audit: AuditLogger,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = FlakyStore {
            inner: LocalStore::open(dir.path().join("store.json")).unwrap(),
            faults: Faults::default(),
        };
        let audit = AuditLogger::new(dir.path().join("audit.log"));
        Fixture {
            _dir: dir,
            store,
            audit,
        }
    }

    fn lunch() -> NewTransaction {
        NewTransaction::new(
            Category::Expense(ExpenseCategory::Foods),
            Money::from_rupiah(25_000),
            2,
            Some("Makan siang".into()),
        )
    }

    #[test]
    fn test_add_expense_posts_to_payment_account() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);

        let txn = service.add(lunch(), AccountType::Dana).unwrap();
        assert_eq!(txn.total, Money::from_rupiah(50_000));

        let entries = fx.store.fetch_ledger_entries_for(txn.id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].account_type, AccountType::Dana);
        assert_eq!(entries[0].amount, Money::from_rupiah(-50_000));

        let audit = fx.audit.read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
    }

    #[test]
    fn test_add_income_ignores_payment_account() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);

        let salary = NewTransaction::new(
            Category::Income(IncomeCategory::Salary),
            Money::from_rupiah(4_000_000),
            1,
            None,
        );
        let txn = service.add(salary, AccountType::Pocket).unwrap();

        let snapshot = DashboardSnapshot::load(&fx.store).unwrap();
        assert_eq!(snapshot.account_balance(AccountType::Rekening), txn.total);
        assert_eq!(snapshot.account_balance(AccountType::Pocket), Money::zero());
    }

    #[test]
    fn test_add_rejects_invalid_before_any_write() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);

        let mut bad = lunch();
        bad.quantity = 0;
        let err = service.add(bad, AccountType::Rekening).unwrap_err();

        assert!(err.is_validation());
        assert!(fx.store.fetch_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_overflowing_total_before_any_write() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);

        let huge = NewTransaction::new(
            Category::Expense(ExpenseCategory::Foods),
            Money::parse("9999999999999jt").unwrap(),
            2,
            None,
        );
        let err = service.add(huge, AccountType::Rekening).unwrap_err();

        assert!(err.is_validation());
        assert!(fx.store.fetch_transactions().unwrap().is_empty());
        assert_eq!(fx.store.faults.ledger_calls.get(), 0);
    }

    #[test]
    fn test_edit_rejects_overflowing_total() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Rekening).unwrap();

        let err = service
            .edit(txn.id, AmountUpdate::new(Money::from_rupiah(i64::MAX), 3))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            fx.store.get_transaction(txn.id).unwrap().unwrap().total,
            Money::from_rupiah(50_000)
        );
    }

    #[test]
    fn test_failed_posting_removes_transaction() {
        let fx = fixture();
        fx.store.faults.ledger_insert.set(true);
        let service = TransactionService::new(&fx.store, &fx.audit);

        let err = service.add(lunch(), AccountType::Rekening).unwrap_err();

        assert!(matches!(err, BalanceError::Backend { status: 500, .. }));
        assert!(fx.store.fetch_transactions().unwrap().is_empty());
        let audit = fx.audit.read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Revert);
    }

    #[test]
    fn test_failed_posting_and_failed_compensation() {
        let fx = fixture();
        fx.store.faults.ledger_insert.set(true);
        fx.store.faults.transaction_delete.set(true);
        let service = TransactionService::new(&fx.store, &fx.audit);

        let err = service.add(lunch(), AccountType::Rekening).unwrap_err();
        assert!(matches!(err, BalanceError::PartialWrite { .. }));
    }

    #[test]
    fn test_edit_recomputes_total() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Rekening).unwrap();

        let edited = service
            .edit(txn.id, AmountUpdate::new(Money::from_rupiah(30_000), 3))
            .unwrap();
        assert_eq!(edited.total, Money::from_rupiah(90_000));
        assert_eq!(edited.notes, txn.notes);

        let audit = fx.audit.read_all().unwrap();
        let update = audit.last().unwrap();
        assert_eq!(update.operation, Operation::Update);
        assert!(update.diff_summary.as_deref().unwrap().contains("quantity: 2 -> 3"));
    }

    #[test]
    fn test_edit_rejects_zero_price() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Rekening).unwrap();

        let err = service
            .edit(txn.id, AmountUpdate::new(Money::zero(), 1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_edit_missing_transaction() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let err = service
            .edit(TransactionId::new(), AmountUpdate::new(Money::from_rupiah(1), 1))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_removes_from_next_fetch() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Pocket).unwrap();

        let deleted = service.delete(txn.id).unwrap();
        assert_eq!(deleted.ledger_entries.len(), 1);

        let snapshot = DashboardSnapshot::load(&fx.store).unwrap();
        assert!(snapshot.find(txn.id).is_none());
        assert_eq!(snapshot.account_balance(AccountType::Pocket), Money::zero());
    }

    #[test]
    fn test_failed_delete_restores_entries() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Dana).unwrap();
        let entries_before = fx.store.fetch_ledger_entries_for(txn.id).unwrap();

        fx.store.faults.transaction_delete.set(true);
        let err = service.delete(txn.id).unwrap_err();
        assert!(matches!(err, BalanceError::Backend { .. }));

        let entries_after = fx.store.fetch_ledger_entries_for(txn.id).unwrap();
        assert_eq!(entries_after.len(), 1);
        assert_eq!(entries_after[0].id, entries_before[0].id);
        assert_eq!(entries_after[0].amount, entries_before[0].amount);
    }

    #[test]
    fn test_failed_delete_and_failed_restore() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Dana).unwrap();

        fx.store.faults.transaction_delete.set(true);
        fx.store.faults.ledger_insert.set(true);
        let err = service.delete(txn.id).unwrap_err();
        assert!(matches!(err, BalanceError::PartialWrite { .. }));
    }

    #[test]
    fn test_find_by_prefix() {
        let fx = fixture();
        let service = TransactionService::new(&fx.store, &fx.audit);
        let txn = service.add(lunch(), AccountType::Rekening).unwrap();

        let full = txn.id.as_uuid().to_string();
        assert_eq!(service.find(&full).unwrap().id, txn.id);
        assert_eq!(service.find(&txn.id.to_string()).unwrap().id, txn.id);
        assert_eq!(service.find(&full[..6]).unwrap().id, txn.id);
        assert!(service.find("ab").unwrap_err().is_validation());
    }
}
