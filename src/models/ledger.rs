//! Account ledger entries
//!
//! Every movement of money into or out of an account is one signed row in
//! the `account_balances` table. Transaction postings link back to their
//! transaction; transfer legs do not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::ids::{LedgerEntryId, TransactionId};
use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// A stored ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,

    #[serde(default)]
    pub transaction_id: Option<TransactionId>,

    pub account_type: AccountType,

    /// Signed amount, positive into the account
    pub amount: Money,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `account_balances` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Only set when restoring a previously deleted row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LedgerEntryId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,

    pub account_type: AccountType,

    pub amount: Money,

    pub notes: Option<String>,
}

impl NewLedgerEntry {
    /// The single posting for a freshly stored transaction.
    ///
    /// Income always lands in rekening. Expenses are paid from `payment`.
    pub fn posting_for(txn: &Transaction, payment: AccountType) -> Self {
        match txn.kind {
            TransactionType::Income => Self {
                id: None,
                transaction_id: Some(txn.id),
                account_type: AccountType::Rekening,
                amount: txn.total,
                notes: Some("Income masuk ke rekening".to_string()),
            },
            TransactionType::Expense => Self {
                id: None,
                transaction_id: Some(txn.id),
                account_type: payment,
                amount: -txn.price.times(txn.quantity),
                notes: Some(format!("Bayar dari {}", payment.as_str())),
            },
        }
    }

    /// The two legs of a transfer: debit on `from`, credit on `to`.
    ///
    /// A non-blank note replaces both default notes.
    pub fn transfer_pair(
        from: AccountType,
        to: AccountType,
        amount: Money,
        note: Option<&str>,
    ) -> [Self; 2] {
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        let out_note = note
            .map(str::to_string)
            .unwrap_or_else(|| format!("Transfer ke {}", to.as_str()));
        let in_note = note
            .map(str::to_string)
            .unwrap_or_else(|| format!("Transfer dari {}", from.as_str()));

        [
            Self {
                id: None,
                transaction_id: None,
                account_type: from,
                amount: -amount,
                notes: Some(out_note),
            },
            Self {
                id: None,
                transaction_id: None,
                account_type: to,
                amount,
                notes: Some(in_note),
            },
        ]
    }
}

impl From<&LedgerEntry> for NewLedgerEntry {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: Some(entry.id),
            transaction_id: entry.transaction_id,
            account_type: entry.account_type,
            amount: entry.amount,
            notes: entry.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};

    fn txn(kind: TransactionType, price: i64, quantity: u32) -> Transaction {
        let (expense_category, income_category) = match kind {
            TransactionType::Expense => (Some(ExpenseCategory::Foods), None),
            TransactionType::Income => (None, Some(IncomeCategory::Salary)),
        };
        Transaction {
            id: TransactionId::new(),
            kind,
            expense_category,
            income_category,
            notes: None,
            price: Money::from_rupiah(price),
            quantity,
            total: Money::from_rupiah(price * quantity as i64),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_income_posts_to_rekening() {
        let t = txn(TransactionType::Income, 1_000_000, 1);
        let entry = NewLedgerEntry::posting_for(&t, AccountType::Dana);
        assert_eq!(entry.account_type, AccountType::Rekening);
        assert_eq!(entry.amount, Money::from_rupiah(1_000_000));
        assert_eq!(entry.transaction_id, Some(t.id));
        assert_eq!(entry.notes.as_deref(), Some("Income masuk ke rekening"));
    }

    #[test]
    fn test_expense_posts_negative_to_payment_account() {
        let t = txn(TransactionType::Expense, 15_000, 3);
        let entry = NewLedgerEntry::posting_for(&t, AccountType::Pocket);
        assert_eq!(entry.account_type, AccountType::Pocket);
        assert_eq!(entry.amount, Money::from_rupiah(-45_000));
        assert_eq!(entry.notes.as_deref(), Some("Bayar dari pocket"));
    }

    #[test]
    fn test_transfer_pair_default_notes() {
        let [out, inn] = NewLedgerEntry::transfer_pair(
            AccountType::Rekening,
            AccountType::Dana,
            Money::from_rupiah(200_000),
            None,
        );
        assert_eq!(out.amount, Money::from_rupiah(-200_000));
        assert_eq!(inn.amount, Money::from_rupiah(200_000));
        assert_eq!(out.amount + inn.amount, Money::zero());
        assert!(out.transaction_id.is_none() && inn.transaction_id.is_none());
        assert_eq!(out.notes.as_deref(), Some("Transfer ke dana"));
        assert_eq!(inn.notes.as_deref(), Some("Transfer dari rekening"));
    }

    #[test]
    fn test_transfer_pair_custom_note_replaces_both() {
        let [out, inn] = NewLedgerEntry::transfer_pair(
            AccountType::Dana,
            AccountType::Pocket,
            Money::from_rupiah(10_000),
            Some("top up"),
        );
        assert_eq!(out.notes.as_deref(), Some("top up"));
        assert_eq!(inn.notes.as_deref(), Some("top up"));
    }

    #[test]
    fn test_transfer_leg_omits_transaction_id_on_wire() {
        let [out, _] = NewLedgerEntry::transfer_pair(
            AccountType::Dana,
            AccountType::Pocket,
            Money::from_rupiah(10_000),
            None,
        );
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("transaction_id").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["account_type"], "dana");
        assert_eq!(json["amount"], -10_000);
    }
}
