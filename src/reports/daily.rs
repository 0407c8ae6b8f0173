//! Daily expense report
//!
//! Buckets expenses into the 14 calendar days ending today. Buckets are
//! seeded in ascending order up front, so days without spending still
//! appear with a zero total.

use std::io::Write;

use chrono::{Duration, Locale, NaiveDate};

use crate::config::DayBoundary;
use crate::error::{BalanceError, BalanceResult};
use crate::models::{Money, Transaction};

/// Number of days covered by the chart
pub const WINDOW_DAYS: usize = 14;

const LOCALE: Locale = Locale::id_ID;

/// Expense total for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    /// "14 Okt"
    pub short_label: String,
    /// "Rabu, 14 Oktober 2026"
    pub full_label: String,
    pub expense: Money,
}

impl DailyBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            short_label: date.format_localized("%-d %b", LOCALE).to_string(),
            full_label: date.format_localized("%A, %-d %B %Y", LOCALE).to_string(),
            expense: Money::zero(),
        }
    }

    /// ISO day key, e.g. "2026-10-14"
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// The 14-day expense series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyExpenses {
    days: Vec<DailyBucket>,
}

impl DailyExpenses {
    /// Bucket `transactions` into the window ending on `today`.
    ///
    /// Income and transactions outside the window are ignored.
    pub fn build<'a, I>(transactions: I, today: NaiveDate, boundary: DayBoundary) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut days: Vec<DailyBucket> = (0..WINDOW_DAYS as i64)
            .rev()
            .map(|back| DailyBucket::new(today - Duration::days(back)))
            .collect();

        let first = days[0].date;
        for txn in transactions.into_iter().filter(|t| t.is_expense()) {
            let date = boundary.date_of(txn.created_at);
            if date < first || date > today {
                continue;
            }
            let idx = (date - first).num_days() as usize;
            days[idx].expense += txn.total;
        }

        Self { days }
    }

    /// Buckets, earliest first
    pub fn days(&self) -> &[DailyBucket] {
        &self.days
    }

    /// The last bucket, which is always today
    pub fn today(&self) -> &DailyBucket {
        &self.days[self.days.len() - 1]
    }

    pub fn today_total(&self) -> Money {
        self.today().expense
    }

    /// Sum of all buckets
    pub fn total(&self) -> Money {
        self.days.iter().map(|d| d.expense).sum()
    }

    /// Largest single-day total
    pub fn peak(&self) -> Money {
        self.days
            .iter()
            .map(|d| d.expense)
            .max()
            .unwrap_or_default()
    }

    /// Horizontal bar chart for the terminal
    pub fn format_terminal(&self, width: usize) -> String {
        let mut output = String::new();
        let peak = i128::from(self.peak().rupiah().max(1));
        let bar_width = width.max(10);

        output.push_str("Pengeluaran 14 Hari Terakhir\n");
        output.push_str(&"=".repeat(bar_width + 24));
        output.push('\n');

        for day in &self.days {
            let len = (i128::from(day.expense.rupiah()) * bar_width as i128 / peak) as usize;
            let len = if day.expense.is_positive() { len.max(1) } else { 0 };
            output.push_str(&format!(
                "{:>7} |{:<width$}| {:>8}\n",
                day.short_label,
                "#".repeat(len),
                day.expense.format_compact(),
                width = bar_width
            ));
        }

        output.push_str(&"-".repeat(bar_width + 24));
        output.push('\n');
        output.push_str(&format!("Hari ini:     {}\n", self.today_total()));
        output.push_str(&format!("Total 14 hari: {}\n", self.total()));
        output
    }

    /// One row per day: date, label, expense
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BalanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["date", "label", "expense"])
            .map_err(|e| BalanceError::Export(e.to_string()))?;
        for day in &self.days {
            csv.write_record([
                day.key(),
                day.full_label.clone(),
                day.expense.rupiah().to_string(),
            ])
            .map_err(|e| BalanceError::Export(e.to_string()))?;
        }
        csv.flush()
            .map_err(|e| BalanceError::Export(e.to_string()))?;
        Ok(())
    }
}
