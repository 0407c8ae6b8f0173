//! User settings for balance-cli
//!
//! Settings live in `config.json`. Environment variables override the file
//! and command-line flags override both (applied by the binary).

use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::BalancePaths;
use crate::error::BalanceError;
use crate::models::AccountType;

pub const URL_ENV: &str = "BALANCE_SUPABASE_URL";
pub const KEY_ENV: &str = "BALANCE_SUPABASE_ANON_KEY";
pub const BACKEND_ENV: &str = "BALANCE_BACKEND";

/// Which store implementation to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted PostgREST endpoint
    #[default]
    Rest,
    /// JSON file in the data directory
    Local,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Calendar used to decide which day a timestamp belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// The machine's local timezone
    #[default]
    Local,
    Utc,
}

impl DayBoundary {
    /// Today's date in this calendar
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// The calendar date of a timestamp
    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => ts.with_timezone(&Local).date_naive(),
            Self::Utc => ts.date_naive(),
        }
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
        }
    }
}

/// User settings for balance-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub backend: BackendKind,

    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,

    /// Public anon key sent as `apikey` and bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_anon_key: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub day_boundary: DayBoundary,

    /// Account expenses are paid from when none is given
    #[serde(default)]
    pub default_payment_account: AccountType,

    /// Rows shown by `list` when no limit is given
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_request_timeout() -> u64 {
    15
}

fn default_history_limit() -> usize {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: BackendKind::default(),
            supabase_url: None,
            supabase_anon_key: None,
            request_timeout_secs: default_request_timeout(),
            day_boundary: DayBoundary::default(),
            default_payment_account: AccountType::default(),
            history_limit: default_history_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &BalancePaths) -> Result<Self, BalanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BalanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BalanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BalancePaths) -> Result<(), BalanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BalanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BalanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(URL_ENV) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = get(KEY_ENV) {
            self.supabase_anon_key = Some(key);
        }
        if let Some(backend) = get(BACKEND_ENV) {
            match BackendKind::from_str(&backend, true) {
                Ok(kind) => self.backend = kind,
                Err(_) => tracing::warn!(value = %backend, "ignoring unknown {}", BACKEND_ENV),
            }
        }
    }

    /// URL and key for the hosted store
    pub fn remote_credentials(&self) -> Result<(&str, &str), BalanceError> {
        let url = self
            .supabase_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                BalanceError::Config(format!("No store URL configured. Set {} or use --url", URL_ENV))
            })?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                BalanceError::Config(format!("No access key configured. Set {} or use --key", KEY_ENV))
            })?;
        Ok((url, key))
    }
}
