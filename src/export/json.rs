//! JSON export
//!
//! Writes the current snapshot with a schema version header.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, BalanceResult};
use crate::models::{AccountBalance, AccountType, BalanceView, TransactionWithBalance};
use crate::services::DashboardSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything the dashboard shows, in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub balance: BalanceView,

    /// All three accounts, zero-filled
    pub account_balances: Vec<AccountBalance>,

    /// Newest first
    pub transactions: Vec<TransactionWithBalance>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub earliest_transaction: Option<DateTime<Utc>>,
    pub latest_transaction: Option<DateTime<Utc>>,
}

impl SnapshotExport {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let transactions = snapshot.transactions.clone();
        let income_count = transactions
            .iter()
            .filter(|t| t.transaction.is_income())
            .count();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            income_count,
            expense_count: transactions.len() - income_count,
            earliest_transaction: transactions.iter().map(|t| t.transaction.created_at).min(),
            latest_transaction: transactions.iter().map(|t| t.transaction.created_at).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            balance: snapshot.balance,
            account_balances: AccountType::ALL
                .into_iter()
                .map(|account_type| AccountBalance {
                    account_type,
                    balance: snapshot.account_balance(account_type),
                })
                .collect(),
            transactions,
            metadata,
        }
    }
}

/// Export the snapshot as JSON
pub fn export_snapshot_json<W: Write>(
    snapshot: &DashboardSnapshot,
    writer: &mut W,
    pretty: bool,
) -> BalanceResult<()> {
    let export = SnapshotExport::from_snapshot(snapshot);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    written.map_err(|e| BalanceError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BalanceError::Export(e.to_string()))?;

    Ok(())
}
