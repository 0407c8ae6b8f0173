//! Category models
//!
//! Expense and income categories are disjoint fixed sets. A transaction
//! carries exactly one of them, matching its type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionType;

/// Category of an expense transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Foods,
    Transportation,
    Equipment,
    Entertainment,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        Self::Foods,
        Self::Transportation,
        Self::Equipment,
        Self::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foods => "Foods",
            Self::Transportation => "Transportation",
            Self::Equipment => "Equipment",
            Self::Entertainment => "Entertainment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of an income transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Salary,
    Etc,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 2] = [Self::Salary, Self::Etc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Etc => "Etc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Either kind of category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Expense(ExpenseCategory),
    Income(IncomeCategory),
}

impl Category {
    /// Every category, expenses first
    pub fn all() -> Vec<Category> {
        ExpenseCategory::ALL
            .into_iter()
            .map(Self::Expense)
            .chain(IncomeCategory::ALL.into_iter().map(Self::Income))
            .collect()
    }

    /// Categories valid for a transaction type
    pub fn for_type(kind: TransactionType) -> Vec<Category> {
        match kind {
            TransactionType::Expense => ExpenseCategory::ALL.into_iter().map(Self::Expense).collect(),
            TransactionType::Income => IncomeCategory::ALL.into_iter().map(Self::Income).collect(),
        }
    }

    /// Parse a category by name (case-insensitive). Names are unique across kinds.
    pub fn parse(s: &str) -> Option<Self> {
        ExpenseCategory::parse(s)
            .map(Self::Expense)
            .or_else(|| IncomeCategory::parse(s).map(Self::Income))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense(c) => c.as_str(),
            Self::Income(c) => c.as_str(),
        }
    }

    /// The transaction type this category belongs to
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Expense(_) => TransactionType::Expense,
            Self::Income(_) => TransactionType::Income,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category selector for the transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Income,
    Expense,
    Category(Category),
}

impl CategoryFilter {
    /// All selectable filters in cycling order
    pub fn options() -> Vec<CategoryFilter> {
        let mut options = vec![Self::All, Self::Income, Self::Expense];
        options.extend(Category::all().into_iter().map(Self::Category));
        options
    }

    /// Parse "all", "income", "expense" or a category name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            other => Category::parse(other).map(Self::Category),
        }
    }

    /// The filter after this one, wrapping around
    pub fn next(&self) -> Self {
        let options = Self::options();
        let idx = options.iter().position(|o| o == self).unwrap_or(0);
        options[(idx + 1) % options.len()]
    }

    /// The filter before this one, wrapping around
    pub fn prev(&self) -> Self {
        let options = Self::options();
        let idx = options.iter().position(|o| o == self).unwrap_or(0);
        options[(idx + options.len() - 1) % options.len()]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Category(c) => write!(f, "{}", c),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "Unknown filter '{}'. Use all, income, expense or a category name",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            Category::parse("foods"),
            Some(Category::Expense(ExpenseCategory::Foods))
        );
        assert_eq!(
            Category::parse("Salary"),
            Some(Category::Income(IncomeCategory::Salary))
        );
        assert_eq!(Category::parse("Rent"), None);
    }

    #[test]
    fn test_category_type() {
        assert_eq!(
            Category::Income(IncomeCategory::Etc).transaction_type(),
            TransactionType::Income
        );
        assert_eq!(Category::for_type(TransactionType::Expense).len(), 4);
        assert_eq!(Category::all().len(), 6);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&ExpenseCategory::Transportation).unwrap();
        assert_eq!(json, "\"Transportation\"");
        let parsed: IncomeCategory = serde_json::from_str("\"Etc\"").unwrap();
        assert_eq!(parsed, IncomeCategory::Etc);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("EXPENSE"), Some(CategoryFilter::Expense));
        assert_eq!(
            CategoryFilter::parse("entertainment"),
            Some(CategoryFilter::Category(Category::Expense(
                ExpenseCategory::Entertainment
            )))
        );
        assert!("groceries".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_cycle() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 9);
        assert_eq!(CategoryFilter::All.next(), CategoryFilter::Income);
        assert_eq!(CategoryFilter::All.prev(), *options.last().unwrap());
    }
}
