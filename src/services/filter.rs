//! History filtering
//!
//! Client-side search over an already fetched transaction list. Both the
//! text query and the category selector must pass; order is preserved.

use crate::models::{CategoryFilter, Transaction, TransactionType, TransactionWithBalance};

/// Text query plus category selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub query: String,
    pub category: CategoryFilter,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// True when neither predicate restricts anything
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category == CategoryFilter::All
    }

    /// Case-insensitive substring match on the note, the category name, or
    /// the formatted total. An empty query matches everything.
    pub fn matches_query(&self, txn: &Transaction) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        txn.note().to_lowercase().contains(&needle)
            || txn
                .category()
                .is_some_and(|c| c.as_str().to_lowercase().contains(&needle))
            || txn.total.to_string().to_lowercase().contains(&needle)
    }

    pub fn matches_category(&self, txn: &Transaction) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Income => txn.kind == TransactionType::Income,
            CategoryFilter::Expense => txn.kind == TransactionType::Expense,
            CategoryFilter::Category(category) => txn.category() == Some(category),
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_category(txn) && self.matches_query(txn)
    }

    /// The rows passing both predicates, in their original order
    pub fn apply<'a>(&self, rows: &'a [TransactionWithBalance]) -> Vec<&'a TransactionWithBalance> {
        rows.iter().filter(|r| self.matches(&r.transaction)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, ExpenseCategory, IncomeCategory, Money, TransactionId,
    };
    use chrono::Utc;

    fn row(category: Category, total: i64, note: Option<&str>) -> TransactionWithBalance {
        let (kind, expense_category, income_category) = match category {
            Category::Expense(c) => (TransactionType::Expense, Some(c), None),
            Category::Income(c) => (TransactionType::Income, None, Some(c)),
        };
        TransactionWithBalance {
            transaction: Transaction {
                id: TransactionId::new(),
                kind,
                expense_category,
                income_category,
                notes: note.map(str::to_string),
                price: Money::from_rupiah(total),
                quantity: 1,
                total: Money::from_rupiah(total),
                created_at: Utc::now(),
            },
            running_balance: Money::zero(),
        }
    }

    fn rows() -> Vec<TransactionWithBalance> {
        vec![
            row(Category::Expense(ExpenseCategory::Foods), 25_000, Some("Bakso Pak Kumis")),
            row(Category::Income(IncomeCategory::Salary), 5_000_000, Some("Gaji Oktober")),
            row(Category::Expense(ExpenseCategory::Transportation), 12_000, Some("Ojek ke kantor")),
            row(Category::Income(IncomeCategory::Etc), 150_000, Some("Jual bakso frozen")),
            row(Category::Expense(ExpenseCategory::Entertainment), 75_000, None),
        ]
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let rows = rows();
        let filter = TransactionFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&rows).len(), rows.len());
    }

    #[test]
    fn test_expense_then_note_query() {
        let rows = rows();
        let filter = TransactionFilter::new()
            .category(CategoryFilter::Expense)
            .query("BAKSO");

        let result = filter.apply(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].transaction.note(), "Bakso Pak Kumis");
    }

    #[test]
    fn test_query_matches_category_name() {
        let rows = rows();
        let result = TransactionFilter::new().query("transport").apply(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].transaction.expense_category,
            Some(ExpenseCategory::Transportation)
        );
    }

    #[test]
    fn test_query_matches_formatted_total() {
        let rows = rows();
        let result = TransactionFilter::new().query("5.000.000").apply(&rows);
        assert_eq!(result.len(), 1);
        assert!(result[0].transaction.is_income());

        let result = TransactionFilter::new().query("rp 75").apply(&rows);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_specific_category() {
        let rows = rows();
        let filter = TransactionFilter::new()
            .category(CategoryFilter::Category(Category::Income(IncomeCategory::Etc)));
        let result = filter.apply(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].transaction.note(), "Jual bakso frozen");
    }

    #[test]
    fn test_order_preserved() {
        let rows = rows();
        let result = TransactionFilter::new().category(CategoryFilter::Income).apply(&rows);
        let notes: Vec<_> = result.iter().map(|r| r.transaction.note()).collect();
        assert_eq!(notes, vec!["Gaji Oktober", "Jual bakso frozen"]);
    }
}
