//! Audit logging for balance-cli
//!
//! Every mutation the client issues (transaction create/update/delete,
//! transfers, and compensating reverts) is appended to `audit.log` as one
//! JSON line with before/after values.
//!
//! - `AuditEntry`: a single record
//! - `AuditLogger`: the JSONL file writer and reader
//! - `generate_diff`: a short summary of changed fields for updates

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
