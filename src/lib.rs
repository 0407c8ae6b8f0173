//! balance-cli - Terminal personal finance tracker
//!
//! Records income and expense transactions, posts them to one of three cash
//! accounts (rekening, dana, pocket), and shows balances, a 14-day expense
//! chart and a searchable history. Persistence and aggregation live in a
//! hosted PostgREST store; a JSON file store stands in for it offline.
//!
//! # Architecture
//!
//! - `config`: paths, settings file, environment overrides
//! - `error`: custom error types
//! - `models`: money, transactions, ledger entries, categories, accounts
//! - `storage`: the `Store` trait with REST and local implementations
//! - `services`: snapshot loading, validated mutations, filtering
//! - `reports`: 14-day expense buckets
//! - `audit`: append-only mutation log
//! - `display`, `export`, `cli`, `tui`: the user-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use balance_cli::config::{BalancePaths, Settings};
//! use balance_cli::services::DashboardSnapshot;
//! use balance_cli::storage::open_store;
//!
//! let paths = BalancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = open_store(&settings, &paths)?;
//! let snapshot = DashboardSnapshot::load(store.as_ref())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{BalanceError, BalanceResult};
