//! Core data models for balance-cli
//!
//! This module contains the rows the store holds and the projections it
//! computes: transactions, ledger entries, accounts and balance views.

pub mod account;
pub mod balance;
pub mod category;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use account::AccountType;
pub use balance::{balance_of, AccountBalance, BalanceView};
pub use category::{Category, CategoryFilter, ExpenseCategory, IncomeCategory};
pub use ids::{LedgerEntryId, TransactionId};
pub use ledger::{LedgerEntry, NewLedgerEntry};
pub use money::Money;
pub use transaction::{
    AmountUpdate, NewTransaction, Transaction, TransactionType, TransactionValidationError,
    TransactionWithBalance,
};
