//! Path management for balance-cli
//!
//! Provides XDG-compliant path resolution for configuration and local data.
//!
//! ## Path Resolution Order
//!
//! 1. `BALANCE_CLI_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/balance-cli` (if set)
//! 3. The platform config directory (`~/.config`, `%APPDATA%`, ...) + `balance-cli`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BalanceError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BALANCE_CLI_DATA_DIR";

const APP_DIR: &str = "balance-cli";

/// Manages all paths used by balance-cli
#[derive(Debug, Clone)]
pub struct BalancePaths {
    base_dir: PathBuf,
}

impl BalancePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, BalanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BalancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the local store
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Tracing output while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("balance.log")
    }

    /// Both tables of the local store
    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BalanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BalanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BalanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BalanceError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Ok(PathBuf::from(xdg).join(APP_DIR));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR))
        .ok_or_else(|| BalanceError::Config("Could not determine a config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BalancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(DATA_DIR_ENV, custom_path);
        let paths = BalancePaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BalancePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BalancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.log_file(), temp_dir.path().join("balance.log"));
        assert_eq!(
            paths.store_file(),
            temp_dir.path().join("data").join("store.json")
        );
    }
}
