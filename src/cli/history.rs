//! Audit history command

use crate::audit::AuditLogger;
use crate::error::BalanceResult;

/// Handle `balance history`: the most recent audit entries, newest first
pub fn handle_history_command(audit: &AuditLogger, limit: usize) -> BalanceResult<()> {
    let entries = audit.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit history yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
