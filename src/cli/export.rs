//! CLI command for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::BalanceResult;
use crate::export::{export_snapshot_json, export_snapshot_yaml, export_transactions_csv};
use crate::services::DashboardSnapshot;
use crate::storage::Store;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (balances and transactions)
    Json,
    /// YAML format (balances and transactions, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess from a file extension, falling back to JSON
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Handle `balance export`
pub fn handle_export_command(
    store: &dyn Store,
    output: PathBuf,
    format: Option<ExportFormat>,
    pretty: bool,
) -> BalanceResult<()> {
    let format = format.unwrap_or_else(|| ExportFormat::from_path(&output));
    let snapshot = DashboardSnapshot::load(store)?;

    let file = File::create(&output)?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => export_transactions_csv(&snapshot, &mut writer)?,
        ExportFormat::Json => export_snapshot_json(&snapshot, &mut writer, pretty)?,
        ExportFormat::Yaml => export_snapshot_yaml(&snapshot, &mut writer)?,
    }
    writer.flush()?;

    println!(
        "Exported {} transactions to {} ({:?})",
        snapshot.transactions.len(),
        output.display(),
        format
    );
    Ok(())
}
