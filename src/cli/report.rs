//! Summary and chart commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::format_summary;
use crate::error::BalanceResult;
use crate::services::DashboardSnapshot;
use crate::storage::Store;

/// Handle `balance summary`
pub fn handle_summary_command(store: &dyn Store) -> BalanceResult<()> {
    let snapshot = DashboardSnapshot::load(store)?;
    print!("{}", format_summary(&snapshot));
    Ok(())
}

/// Handle `balance chart`
pub fn handle_chart_command(
    store: &dyn Store,
    settings: &Settings,
    width: usize,
    csv: Option<PathBuf>,
) -> BalanceResult<()> {
    let snapshot = DashboardSnapshot::load(store)?;
    let report = snapshot.daily_expenses(settings.day_boundary);

    match csv {
        Some(path) => {
            let file = File::create(&path)?;
            let mut writer = BufWriter::new(file);
            report.export_csv(&mut writer)?;
            println!("Chart data written to {}", path.display());
        }
        None => print!("{}", report.format_terminal(width)),
    }

    Ok(())
}
