//! Custom error types for balance-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for balance-cli operations
#[derive(Error, Debug)]
pub enum BalanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and mutation intents
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Transfer source does not hold enough money
    #[error("Insufficient balance in '{account}': need {needed}, have {available}")]
    InsufficientBalance {
        account: String,
        needed: Money,
        available: Money,
    },

    /// The store answered with an error payload
    #[error("Backend error ({status}): {message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    Http(String),

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A multi-step write failed and its compensation failed too
    #[error("Partial write: {original}; compensation failed: {compensation}")]
    PartialWrite {
        original: String,
        compensation: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl BalanceError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientBalance { .. })
    }

    /// The backend error code, if the store returned one
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BalanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BalanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for BalanceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// User-facing prefixes for failed mutations
pub const SAVE_FAILED: &str = "Failed to save transaction";
pub const UPDATE_FAILED: &str = "Failed to update transaction";
pub const DELETE_FAILED: &str = "Failed to delete transaction";
pub const TRANSFER_FAILED: &str = "Failed to transfer";

/// Result type alias for balance-cli operations
pub type BalanceResult<T> = Result<T, BalanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BalanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BalanceError::transaction_not_found("txn-1234");
        assert_eq!(err.to_string(), "Transaction not found: txn-1234");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_balance_error() {
        let err = BalanceError::InsufficientBalance {
            account: "dana".into(),
            needed: Money::from_rupiah(50_000),
            available: Money::from_rupiah(30_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance in 'dana': need Rp 50.000, have Rp 30.000"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_backend_error_display() {
        let err = BalanceError::Backend {
            status: 406,
            code: Some("PGRST116".into()),
            message: "JSON object requested, multiple (or no) rows returned".into(),
        };
        assert!(err.to_string().contains("406"));
        assert_eq!(err.backend_code(), Some("PGRST116"));

        let err = BalanceError::Backend {
            status: 500,
            code: None,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Backend error (500): boom");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BalanceError = io_err.into();
        assert!(matches!(err, BalanceError::Io(_)));
    }
}
