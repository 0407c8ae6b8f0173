//! YAML export
//!
//! Same document as the JSON export, for reading by eye.

use std::io::Write;

use crate::error::{BalanceError, BalanceResult};
use crate::export::json::SnapshotExport;
use crate::services::DashboardSnapshot;

/// Export the snapshot as YAML
pub fn export_snapshot_yaml<W: Write>(
    snapshot: &DashboardSnapshot,
    writer: &mut W,
) -> BalanceResult<()> {
    let export = SnapshotExport::from_snapshot(snapshot);
    let io_err = |e: std::io::Error| BalanceError::Export(e.to_string());

    writeln!(writer, "# balance-cli snapshot export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BalanceError::Export(e.to_string()))?;

    Ok(())
}
