//! Reports module for balance-cli
//!
//! Derived views computed client-side from a snapshot.

pub mod daily;

pub use daily::{DailyBucket, DailyExpenses, WINDOW_DAYS};
