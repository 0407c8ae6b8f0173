//! Export module for balance-cli
//!
//! Writes the current snapshot in one of three formats:
//! - CSV: transactions only (spreadsheet-compatible)
//! - JSON: balances and transactions, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{export_snapshot_json, ExportMetadata, SnapshotExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_snapshot_yaml;
