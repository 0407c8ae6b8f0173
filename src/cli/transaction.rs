//! Transaction CLI commands
//!
//! `add`, `list`, `edit` and `delete`, flattened into the top-level
//! command set.

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{BalanceError, BalanceResult, DELETE_FAILED, SAVE_FAILED, UPDATE_FAILED};
use crate::models::{
    AccountType, AmountUpdate, Category, CategoryFilter, Money, NewTransaction, TransactionType,
};
use crate::services::{DashboardSnapshot, TransactionFilter, TransactionService};
use crate::storage::Store;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// income or expense
        #[arg(value_parser = parse_kind)]
        kind: TransactionType,
        /// Category (Foods, Transportation, Equipment, Entertainment, Salary, Etc)
        #[arg(short, long, value_parser = parse_category)]
        category: Category,
        /// Unit price (e.g. "25000", "25.000", "25rb")
        #[arg(short, long, value_parser = parse_money)]
        price: Money,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: u32,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Account paying for an expense (rekening, dana, pocket)
        #[arg(short, long, value_parser = parse_account)]
        from: Option<AccountType>,
    },
    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        /// Match note, category or formatted total
        #[arg(short, long)]
        query: Option<String>,
        /// all, income, expense or a category name
        #[arg(short, long, default_value = "all")]
        filter: CategoryFilter,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Change the price and quantity of a transaction
    Edit {
        /// Transaction ID (full UUID, txn- prefix, or unique prefix)
        id: String,
        /// New unit price
        #[arg(short, long, value_parser = parse_money)]
        price: Money,
        /// New quantity
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Delete a transaction and its ledger entry
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl TransactionCommands {
    /// Prefix for the error shown when the command fails
    pub fn failure_context(&self) -> &'static str {
        match self {
            Self::Add { .. } => SAVE_FAILED,
            Self::Edit { .. } => UPDATE_FAILED,
            Self::Delete { .. } => DELETE_FAILED,
            Self::List { .. } => "Failed to load transactions",
        }
    }
}

pub fn parse_kind(s: &str) -> Result<TransactionType, String> {
    TransactionType::parse(s).ok_or_else(|| format!("Expected income or expense, got '{}'", s))
}

pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        format!("Unknown category '{}'. Valid: {}", s, names.join(", "))
    })
}

pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

pub fn parse_account(s: &str) -> Result<AccountType, String> {
    AccountType::parse(s)
        .ok_or_else(|| format!("Unknown account '{}'. Valid: rekening, dana, pocket", s))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &dyn Store,
    audit: &AuditLogger,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BalanceResult<()> {
    let service = TransactionService::new(store, audit);

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            price,
            quantity,
            note,
            from,
        } => {
            let input = NewTransaction::with_type(kind, category, price, quantity, note)
                .map_err(|e| BalanceError::Validation(e.to_string()))?;
            let payment = from.unwrap_or(settings.default_payment_account);

            let txn = service.add(input, payment)?;

            println!("Added transaction:");
            print!("{}", format_transaction_details(&txn));
            if txn.is_expense() {
                println!("Paid from:   {}", payment);
            }
        }

        TransactionCommands::List {
            query,
            filter,
            limit,
        } => {
            let snapshot = DashboardSnapshot::load(store)?;
            let filter = TransactionFilter::new()
                .query(query.unwrap_or_default())
                .category(filter);
            let limit = limit.unwrap_or(settings.history_limit);

            let rows = filter.apply(&snapshot.transactions);
            let shown = &rows[..rows.len().min(limit)];
            print!("{}", format_transaction_table(shown));

            if rows.len() > shown.len() {
                println!("Showing {} of {} transactions", shown.len(), rows.len());
            }
        }

        TransactionCommands::Edit {
            id,
            price,
            quantity,
        } => {
            let txn = service.find(&id)?;
            let before = txn.total;
            let updated = service.edit(txn.id, AmountUpdate::new(price, quantity))?;

            println!("Updated transaction: {}", updated.id);
            println!("  Total: {} -> {}", before, updated.total);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.find(&id)?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.transaction.id,
                deleted.transaction.kind,
                deleted.transaction.total
            );
        }
    }

    Ok(())
}
