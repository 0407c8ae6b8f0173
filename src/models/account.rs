//! Account model
//!
//! The three cash pools money is posted against. Balances are never stored on
//! the account itself; they are the sum of ledger entries per account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three cash accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Bank account, receives all income
    Rekening,
    /// DANA e-wallet
    Dana,
    /// Pocket cash
    Pocket,
}

impl AccountType {
    /// All accounts in display order
    pub const ALL: [AccountType; 3] = [Self::Rekening, Self::Dana, Self::Pocket];

    /// Wire identifier used by the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rekening => "rekening",
            Self::Dana => "dana",
            Self::Pocket => "pocket",
        }
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rekening" | "bank" => Some(Self::Rekening),
            "dana" => Some(Self::Dana),
            "pocket" | "cash" => Some(Self::Pocket),
            _ => None,
        }
    }

    /// The next account in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Rekening => Self::Dana,
            Self::Dana => Self::Pocket,
            Self::Pocket => Self::Rekening,
        }
    }

    /// The previous account in display order, wrapping around
    pub fn prev(&self) -> Self {
        match self {
            Self::Rekening => Self::Pocket,
            Self::Dana => Self::Rekening,
            Self::Pocket => Self::Dana,
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Rekening
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rekening => write!(f, "Rekening"),
            Self::Dana => write!(f, "Dana"),
            Self::Pocket => write!(f, "Pocket"),
        }
    }
}
