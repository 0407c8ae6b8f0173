//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod history;
pub mod report;
pub mod transaction;
pub mod transfer;

pub use export::{handle_export_command, ExportFormat};
pub use history::handle_history_command;
pub use report::{handle_chart_command, handle_summary_command};
pub use transaction::{
    handle_transaction_command, parse_account, parse_money, TransactionCommands,
};
pub use transfer::handle_transfer_command;
