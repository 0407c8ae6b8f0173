//! Transaction model
//!
//! An income or expense record with a unit price and quantity. The store
//! derives `total` and the running balance; the client only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, ExpenseCategory, IncomeCategory};
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Apply this type's sign to an unsigned total
    pub fn signed(&self, total: Money) -> Money {
        match self {
            Self::Income => total,
            Self::Expense => -total,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A stored transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub expense_category: Option<ExpenseCategory>,

    pub income_category: Option<IncomeCategory>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Unit price
    pub price: Money,

    pub quantity: u32,

    /// price × quantity, computed by the store
    pub total: Money,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Whichever category is populated
    pub fn category(&self) -> Option<Category> {
        match self.kind {
            TransactionType::Expense => self.expense_category.map(Category::Expense),
            TransactionType::Income => self.income_category.map(Category::Income),
        }
    }

    /// Total with the sign of the transaction type
    pub fn signed_total(&self) -> Money {
        self.kind.signed(self.total)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Note text, empty when absent
    pub fn note(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category().map(|c| c.as_str()).unwrap_or("-");
        write!(
            f,
            "{} {} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.kind,
            category,
            self.signed_total()
        )
    }
}

/// A transaction row from the `transactions_with_balance` view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionWithBalance {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Cumulative balance after this transaction, computed by the store
    pub running_balance: Money,
}

/// Insert payload for the `transactions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub expense_category: Option<ExpenseCategory>,

    pub income_category: Option<IncomeCategory>,

    pub notes: Option<String>,

    pub price: Money,

    pub quantity: u32,
}

impl NewTransaction {
    /// Build an insert payload. The type is taken from the category; the
    /// counterpart category column is left null.
    pub fn new(category: Category, price: Money, quantity: u32, notes: Option<String>) -> Self {
        let (kind, expense_category, income_category) = match category {
            Category::Expense(c) => (TransactionType::Expense, Some(c), None),
            Category::Income(c) => (TransactionType::Income, None, Some(c)),
        };
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            kind,
            expense_category,
            income_category,
            notes,
            price,
            quantity,
        }
    }

    /// Build a payload for an explicit type, rejecting a category of the other kind
    pub fn with_type(
        kind: TransactionType,
        category: Category,
        price: Money,
        quantity: u32,
        notes: Option<String>,
    ) -> Result<Self, TransactionValidationError> {
        if category.transaction_type() != kind {
            return Err(TransactionValidationError::CategoryMismatch { kind, category });
        }
        let txn = Self::new(category, price, quantity, notes);
        txn.validate()?;
        Ok(txn)
    }

    /// price × quantity
    pub fn total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Check amounts and that exactly one category matching the type is set
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_amounts(self.price, self.quantity)?;

        match (self.kind, self.expense_category, self.income_category) {
            (TransactionType::Expense, Some(_), None) => Ok(()),
            (TransactionType::Income, None, Some(_)) => Ok(()),
            (kind, None, None) => Err(TransactionValidationError::MissingCategory(kind)),
            (kind, _, _) => Err(TransactionValidationError::ConflictingCategories(kind)),
        }
    }
}

/// Price and quantity overwrite for an existing transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountUpdate {
    pub price: Money,
    pub quantity: u32,
}

impl AmountUpdate {
    pub fn new(price: Money, quantity: u32) -> Self {
        Self { price, quantity }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_amounts(self.price, self.quantity)
    }

    pub fn total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

fn validate_amounts(price: Money, quantity: u32) -> Result<(), TransactionValidationError> {
    if price.rupiah() < 1 {
        return Err(TransactionValidationError::InvalidPrice(price));
    }
    if quantity < 1 {
        return Err(TransactionValidationError::InvalidQuantity(quantity));
    }
    if price.checked_times(quantity).is_none() {
        return Err(TransactionValidationError::AmountTooLarge { price, quantity });
    }
    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    InvalidPrice(Money),
    InvalidQuantity(u32),
    AmountTooLarge {
        price: Money,
        quantity: u32,
    },
    MissingCategory(TransactionType),
    ConflictingCategories(TransactionType),
    CategoryMismatch {
        kind: TransactionType,
        category: Category,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrice(price) => write!(f, "Price must be at least Rp 1, got {}", price),
            Self::InvalidQuantity(qty) => write!(f, "Quantity must be at least 1, got {}", qty),
            Self::AmountTooLarge { price, quantity } => {
                write!(f, "Total of {} x {} is too large", price, quantity)
            }
            Self::MissingCategory(kind) => {
                write!(f, "{} transaction needs a category", kind)
            }
            Self::ConflictingCategories(kind) => write!(
                f,
                "{} transaction must carry only a {} category",
                kind,
                kind.as_str()
            ),
            Self::CategoryMismatch { kind, category } => write!(
                f,
                "Category '{}' is not a {} category",
                category,
                kind.as_str()
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "type": "expense",
            "expense_category": "Foods",
            "income_category": null,
            "notes": "Nasi goreng",
            "price": 25000,
            "quantity": 2,
            "total": 50000.0,
            "created_at": "2026-10-14T05:30:00.123456+00:00",
            "running_balance": -50000
        }"#
    }

    #[test]
    fn test_deserialize_view_row() {
        let row: TransactionWithBalance = serde_json::from_str(sample_json()).unwrap();
        let txn = &row.transaction;
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.category(), Some(Category::Expense(ExpenseCategory::Foods)));
        assert_eq!(txn.total, Money::from_rupiah(50_000));
        assert_eq!(txn.signed_total(), Money::from_rupiah(-50_000));
        assert_eq!(row.running_balance, Money::from_rupiah(-50_000));
        assert_eq!(txn.note(), "Nasi goreng");
    }

    #[test]
    fn test_new_transaction_sets_counterpart_null() {
        let txn = NewTransaction::new(
            Category::Income(IncomeCategory::Salary),
            Money::from_rupiah(5_000_000),
            1,
            Some("  ".into()),
        );
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.expense_category, None);
        assert_eq!(txn.notes, None);

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json["expense_category"].is_null());
        assert_eq!(json["income_category"], "Salary");
    }

    #[test]
    fn test_total() {
        let txn = NewTransaction::new(
            Category::Expense(ExpenseCategory::Equipment),
            Money::from_rupiah(12_500),
            4,
            None,
        );
        assert_eq!(txn.total(), Money::from_rupiah(50_000));
    }

    #[test]
    fn test_validate_amounts() {
        let cat = Category::Expense(ExpenseCategory::Foods);
        assert_eq!(
            NewTransaction::new(cat, Money::zero(), 1, None).validate(),
            Err(TransactionValidationError::InvalidPrice(Money::zero()))
        );
        assert_eq!(
            NewTransaction::new(cat, Money::from_rupiah(100), 0, None).validate(),
            Err(TransactionValidationError::InvalidQuantity(0))
        );
        assert!(AmountUpdate::new(Money::from_rupiah(1), 1).validate().is_ok());
        assert!(AmountUpdate::new(Money::from_rupiah(-5), 1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_total() {
        let cat = Category::Expense(ExpenseCategory::Foods);
        let huge = Money::parse("9999999999999jt").unwrap();

        assert_eq!(
            NewTransaction::new(cat, huge, 2, None).validate(),
            Err(TransactionValidationError::AmountTooLarge {
                price: huge,
                quantity: 2
            })
        );
        assert!(NewTransaction::new(cat, huge, 1, None).validate().is_ok());
        assert!(matches!(
            AmountUpdate::new(Money::from_rupiah(i64::MAX / 2 + 1), 2).validate(),
            Err(TransactionValidationError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_categories() {
        let mut txn = NewTransaction::new(
            Category::Expense(ExpenseCategory::Foods),
            Money::from_rupiah(100),
            1,
            None,
        );
        txn.income_category = Some(IncomeCategory::Etc);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::ConflictingCategories(
                TransactionType::Expense
            ))
        );

        txn.expense_category = None;
        txn.income_category = None;
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingCategory(TransactionType::Expense))
        );
    }

    #[test]
    fn test_with_type_rejects_mismatch() {
        let result = NewTransaction::with_type(
            TransactionType::Income,
            Category::Expense(ExpenseCategory::Foods),
            Money::from_rupiah(100),
            1,
            None,
        );
        assert!(matches!(
            result,
            Err(TransactionValidationError::CategoryMismatch { .. })
        ));
    }
}
