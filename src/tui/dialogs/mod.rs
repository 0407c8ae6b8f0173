//! Dialog modules for the TUI
//!
//! Contains modal dialogs for data entry and confirmation

pub mod confirm;
pub mod edit;
pub mod help;
pub mod transaction;
pub mod transfer;
