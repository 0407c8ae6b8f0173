//! Configuration module for balance-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Environment overrides for the store connection

pub mod paths;
pub mod settings;

pub use paths::BalancePaths;
pub use settings::{BackendKind, DayBoundary, Settings};
