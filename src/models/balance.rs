//! Balance projections
//!
//! Rows of the `balance_view` and `balance_per_account` views.

use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::money::Money;

/// Aggregate income, expense and their difference over all transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceView {
    #[serde(default)]
    pub total_income: Money,
    #[serde(default)]
    pub total_expense: Money,
    #[serde(default)]
    pub balance: Money,
}

impl BalanceView {
    pub fn new(total_income: Money, total_expense: Money) -> Self {
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

/// Sum of ledger entries for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: Money,
}

/// Look up an account's balance; accounts without a row hold zero
pub fn balance_of(balances: &[AccountBalance], account: AccountType) -> Money {
    balances
        .iter()
        .filter(|b| b.account_type == account)
        .map(|b| b.balance)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_view_difference() {
        let view = BalanceView::new(Money::from_rupiah(300), Money::from_rupiah(120));
        assert_eq!(view.balance, Money::from_rupiah(180));
        assert_eq!(BalanceView::default().balance, Money::zero());
    }

    #[test]
    fn test_balance_of_missing_is_zero() {
        let balances = vec![AccountBalance {
            account_type: AccountType::Dana,
            balance: Money::from_rupiah(75_000),
        }];
        assert_eq!(balance_of(&balances, AccountType::Dana), Money::from_rupiah(75_000));
        assert_eq!(balance_of(&balances, AccountType::Pocket), Money::zero());
    }

    #[test]
    fn test_deserialize_numeric_strings() {
        let row: AccountBalance =
            serde_json::from_str(r#"{"account_type":"rekening","balance":"125000.00"}"#).unwrap();
        assert_eq!(row.balance, Money::from_rupiah(125_000));
    }
}
