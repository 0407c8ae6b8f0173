use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use balance_cli::audit::AuditLogger;
use balance_cli::cli::{
    handle_chart_command, handle_export_command, handle_history_command, handle_summary_command,
    handle_transaction_command, handle_transfer_command, parse_account, parse_money, ExportFormat,
    TransactionCommands,
};
use balance_cli::config::{BackendKind, BalancePaths, Settings};
use balance_cli::error::TRANSFER_FAILED;
use balance_cli::models::{AccountType, Money};
use balance_cli::storage::open_store;

const LOG_ENV: &str = "BALANCE_LOG";

#[derive(Parser)]
#[command(
    name = "balance",
    version,
    about = "Terminal personal finance tracker",
    long_about = "balance records income and expenses across three accounts \
                  (rekening, dana, pocket) and shows balances, a 14-day \
                  expense chart and a searchable history."
)]
struct Cli {
    /// Store backend
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Store URL (overrides BALANCE_SUPABASE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Store access key (overrides BALANCE_SUPABASE_ANON_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Show aggregate and per-account balances
    Summary,

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Move money between accounts
    Transfer {
        /// Source account (rekening, dana, pocket)
        #[arg(value_parser = parse_account)]
        from: AccountType,
        /// Destination account
        #[arg(value_parser = parse_account)]
        to: AccountType,
        /// Amount (e.g. "100000", "100rb")
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Note for both ledger entries
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show expenses for the last 14 days
    Chart {
        /// Bar width in characters
        #[arg(short, long, default_value = "40")]
        width: usize,
        /// Write the daily totals to a CSV file instead
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Export balances and transactions to a file
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the audit log of recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write a settings file with the defaults if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Log to stderr, or to a file when the terminal belongs to the TUI
fn init_tracing(paths: &BalancePaths, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .with_context(|| format!("Failed to open {}", paths.log_file().display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let paths = BalancePaths::new()?;
    paths.ensure_directories()?;
    init_tracing(&paths, matches!(cli.command, Some(Commands::Tui)))?;

    let mut settings = Settings::load_or_create(&paths)?;
    // Environment and flag overrides are never persisted
    let on_disk = settings.clone();
    settings.apply_env();
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(url) = cli.url {
        settings.supabase_url = Some(url);
    }
    if let Some(key) = cli.key {
        settings.supabase_anon_key = Some(key);
    }

    let audit = AuditLogger::new(paths.audit_log());

    let command = match cli.command {
        Some(Commands::Config { init }) => {
            if init {
                init_settings(&paths, &on_disk)?;
            }
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&audit, limit)?;
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("balance - terminal personal finance tracker");
            println!();
            println!("Run 'balance --help' for usage information.");
            println!("Run 'balance tui' to launch the interactive dashboard.");
            return Ok(());
        }
    };

    let store = open_store(&settings, &paths)?;
    let store = store.as_ref();

    match command {
        Commands::Tui => balance_cli::tui::run_tui(store, &audit, &settings)?,
        Commands::Summary => handle_summary_command(store)?,
        Commands::Transaction(cmd) => {
            let context = cmd.failure_context();
            handle_transaction_command(store, &audit, &settings, cmd).context(context)?;
        }
        Commands::Transfer {
            from,
            to,
            amount,
            note,
        } => {
            handle_transfer_command(store, &audit, from, to, amount, note)
                .context(TRANSFER_FAILED)?;
        }
        Commands::Chart { width, csv } => handle_chart_command(store, &settings, width, csv)?,
        Commands::Export {
            output,
            format,
            pretty,
        } => handle_export_command(store, output, format, pretty)?,
        Commands::Config { .. } | Commands::History { .. } => {}
    }

    Ok(())
}

fn init_settings(paths: &BalancePaths, settings: &Settings) -> Result<()> {
    let file = paths.settings_file();
    if file.exists() {
        println!("Settings file already exists: {}", file.display());
    } else {
        settings.save(paths)?;
        println!("Wrote settings file: {}", file.display());
    }
    println!();
    Ok(())
}

fn print_config(paths: &BalancePaths, settings: &Settings) {
    println!("balance-cli Configuration");
    println!("=========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  Backend:          {}", settings.backend);
    match settings.backend {
        BackendKind::Rest => println!(
            "  Store URL:        {}",
            settings.supabase_url.as_deref().unwrap_or("(not set)")
        ),
        BackendKind::Local => println!("  Store file:       {}", paths.store_file().display()),
    }
    println!(
        "  Access key:       {}",
        if settings.supabase_anon_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  Request timeout:  {}s", settings.request_timeout_secs);
    println!("  Day boundary:     {}", settings.day_boundary);
    println!("  Default payment:  {}", settings.default_payment_account.as_str());
    println!("  History limit:    {}", settings.history_limit);
}
