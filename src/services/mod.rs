//! Service layer for balance-cli
//!
//! Business logic on top of a [`Store`](crate::storage::Store): snapshot
//! loading, validated mutations with audit records, and history filtering.

pub mod dashboard;
pub mod filter;
pub mod transaction;
pub mod transfer;

pub use dashboard::DashboardSnapshot;
pub use filter::TransactionFilter;
pub use transaction::{DeletedTransaction, TransactionService};
pub use transfer::{TransferRequest, TransferService};
