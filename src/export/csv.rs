//! CSV export
//!
//! One row per transaction, newest first, amounts in whole rupiah.

use std::io::Write;

use crate::error::{BalanceError, BalanceResult};
use crate::services::DashboardSnapshot;

const HEADER: [&str; 10] = [
    "id",
    "created_at",
    "type",
    "category",
    "notes",
    "price",
    "quantity",
    "total",
    "signed_total",
    "running_balance",
];

/// Export the snapshot's transactions to CSV
pub fn export_transactions_csv<W: Write>(
    snapshot: &DashboardSnapshot,
    writer: &mut W,
) -> BalanceResult<()> {
    let export_err = |e: ::csv::Error| BalanceError::Export(e.to_string());
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(HEADER).map_err(export_err)?;
    for row in &snapshot.transactions {
        let txn = &row.transaction;
        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.created_at.to_rfc3339(),
            txn.kind.as_str().to_string(),
            txn.category().map(|c| c.as_str()).unwrap_or("").to_string(),
            txn.note().to_string(),
            txn.price.rupiah().to_string(),
            txn.quantity.to_string(),
            txn.total.rupiah().to_string(),
            txn.signed_total().rupiah().to_string(),
            row.running_balance.rupiah().to_string(),
        ])
        .map_err(export_err)?;
    }
    csv.flush()?;

    Ok(())
}
