//! Display formatting for terminal output
//!
//! Plain text and table rendering used by the CLI handlers.

pub mod balance;
pub mod transaction;

pub use balance::{format_account_balances, format_money_colored, format_summary};
pub use transaction::{format_transaction_details, format_transaction_table};
