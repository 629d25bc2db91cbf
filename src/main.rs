use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_tracker::audit::AuditLogger;
use finance_tracker::cli::{
    handle_categories_command, handle_dashboard_command, handle_export_command,
    handle_history_command, handle_transaction_command, DashboardArgs, ExportArgs,
    TransactionCommands,
};
use finance_tracker::config::{paths::TrackerPaths, settings::Settings};
use finance_tracker::display::format_load_warnings;
use finance_tracker::storage::LedgerStore;

/// Environment variable that overrides the configured log filter
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Command-line personal income and expense tracker",
    long_about = "fintrack keeps a ledger of income and expenses in a plain \
                  comma-delimited file, filters it by date and summarizes it \
                  into totals per category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show totals, expenses by category and recent transactions
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Export transactions
    Export(ExportArgs),

    /// List suggested and in-use categories
    Categories,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(&settings.log_level);

    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Transactions are stored in: {}", paths.transactions_file().display());
            println!("Run 'fintrack add --help' to record your first transaction.");
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent limit:    {}", settings.recent_limit);
            println!("  Log level:       {}", settings.log_level);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&audit, limit)?;
        }
        Some(command) => {
            paths.ensure_directories()?;
            let (mut store, report) =
                LedgerStore::open(paths.transactions_file(), settings.date_format.clone())?;
            eprint!("{}", format_load_warnings(&report, store.path()));

            let audit = settings.audit_enabled.then_some(&audit);
            match command {
                Commands::Transaction(cmd) => {
                    handle_transaction_command(&mut store, &settings, audit, cmd)?
                }
                Commands::Dashboard(args) => handle_dashboard_command(&mut store, &settings, args)?,
                Commands::Export(args) => handle_export_command(&mut store, &settings, args)?,
                Commands::Categories => handle_categories_command(&store)?,
                Commands::History { .. } | Commands::Init | Commands::Config => {}
            }

            // Read-only commands leave the file untouched, malformed lines included
            if store.is_dirty() {
                store.save()?;
            }
        }
        None => {
            println!("fintrack - personal income and expense tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so command output stays clean
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
