//! Transfer service
//!
//! Moves money between two accounts. A transfer is two unlinked ledger
//! entries with opposite signs, written in one batched insert.

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{BalanceError, BalanceResult};
use crate::models::{AccountType, LedgerEntry, Money, NewLedgerEntry};
use crate::services::DashboardSnapshot;
use crate::storage::Store;

/// A requested move of `amount` from one account to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: AccountType,
    pub to: AccountType,
    pub amount: Money,
    pub note: Option<String>,
}

impl TransferRequest {
    pub fn new(from: AccountType, to: AccountType, amount: Money) -> Self {
        Self {
            from,
            to,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Check the request against the balances in `snapshot`
    pub fn validate(&self, snapshot: &DashboardSnapshot) -> BalanceResult<()> {
        if self.from == self.to {
            return Err(BalanceError::Validation(
                "Cannot transfer to the same account".into(),
            ));
        }
        if self.amount < Money::from_rupiah(1) {
            return Err(BalanceError::Validation(
                "Transfer amount must be at least Rp 1".into(),
            ));
        }

        let available = snapshot.account_balance(self.from);
        if self.amount > available {
            return Err(BalanceError::InsufficientBalance {
                account: self.from.as_str().to_string(),
                needed: self.amount,
                available,
            });
        }
        Ok(())
    }
}

/// Service for transfers between accounts
pub struct TransferService<'a> {
    store: &'a dyn Store,
    audit: &'a AuditLogger,
}

impl<'a> TransferService<'a> {
    pub fn new(store: &'a dyn Store, audit: &'a AuditLogger) -> Self {
        Self { store, audit }
    }

    /// Validate against the last known balances, then write both legs.
    ///
    /// Returns the stored entries, debit leg first.
    pub fn transfer(
        &self,
        request: &TransferRequest,
        snapshot: &DashboardSnapshot,
    ) -> BalanceResult<Vec<LedgerEntry>> {
        request.validate(snapshot)?;

        let legs = NewLedgerEntry::transfer_pair(
            request.from,
            request.to,
            request.amount,
            request.note.as_deref(),
        );
        let entries = self.store.insert_ledger_entries(&legs).map_err(|e| {
            tracing::error!(
                from = %request.from,
                to = %request.to,
                amount = %request.amount,
                error = %e,
                "transfer failed"
            );
            e
        })?;

        let entity_id = entries
            .first()
            .map(|e| e.id.to_string())
            .unwrap_or_default();
        self.audit.record(&AuditEntry::create(
            EntityType::Transfer,
            entity_id,
            Some(format!("{} -> {}", request.from.as_str(), request.to.as_str())),
            &entries,
        ));
        tracing::info!(
            from = %request.from,
            to = %request.to,
            amount = %request.amount,
            "transfer recorded"
        );

        Ok(entries)
    }
}
