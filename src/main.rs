use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use pfim::audit::AuditLogger;
use pfim::cli::{
    handle_delete_command, handle_record_command, handle_report_command, handle_update_command,
    DeleteArgs, RecordArgs, ReportArgs, UpdateArgs,
};
use pfim::config::{PfimPaths, Settings};
use pfim::query::QueryBuilder;
use pfim::services::LedgerService;
use pfim::storage::SqliteStore;
use pfim::{PfimError, PfimResult};

/// Environment variable overriding the log filter
const LOG_ENV: &str = "PFIM_LOG";

#[derive(Parser)]
#[command(
    name = "pfim",
    version,
    about = "Personal finance manager for the command line",
    long_about = "PFIM records incomes and expenses in a local SQLite database \
                  and answers questions about them: filtered, sorted reports \
                  with summary statistics, bulk updates and deletions."
)]
struct Cli {
    /// Database file to use instead of the default
    #[arg(long, global = true, env = "PFIM_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an income or an expense
    #[command(alias = "add")]
    Record(RecordArgs),

    /// Show entries matching a filter, with statistics
    #[command(alias = "fetch")]
    Report(ReportArgs),

    /// Change the tag, amount or description of matching entries
    Update(UpdateArgs),

    /// Delete matching entries
    Delete(DeleteArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<PfimError>()
                .map(PfimError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Initialize paths and settings
    let mut paths = PfimPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if let Some(db) = cli.db.clone().or_else(|| settings.database_file.clone()) {
        paths = paths.with_database_file(db);
    }
    paths.ensure_directories()?;

    init_logging(&paths, &settings)?;

    match cli.command {
        Commands::Record(args) => with_service(&paths, &settings, |service| {
            handle_record_command(service, args)
        }),
        Commands::Report(args) => with_service(&paths, &settings, |service| {
            handle_report_command(service, &settings, args)
        }),
        Commands::Update(args) => with_service(&paths, &settings, |service| {
            handle_update_command(service, args)
        }),
        Commands::Delete(args) => with_service(&paths, &settings, |service| {
            handle_delete_command(service, args)
        }),
        Commands::Config => {
            print_config(&paths, &settings);
            Ok(())
        }
    }
}

/// Open the store and run `f` against a ledger service wired to it
fn with_service<F>(paths: &PfimPaths, settings: &Settings, f: F) -> Result<()>
where
    F: FnOnce(&LedgerService<'_>) -> PfimResult<()>,
{
    let store = SqliteStore::open(paths.database_file())?;
    let builder = QueryBuilder::from_settings(settings, chrono::Local::now().date_naive());
    let service =
        LedgerService::new(&store, builder).with_audit(AuditLogger::new(paths.audit_log()));

    f(&service)?;
    Ok(())
}

/// Send diagnostics to `pfim.log`; stdout stays reserved for command output
fn init_logging(paths: &PfimPaths, settings: &Settings) -> Result<()> {
    let log_path = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn print_config(paths: &PfimPaths, settings: &Settings) {
    println!("PFIM Configuration");
    println!("==================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Database:       {}", paths.database_file().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Log file:       {}", paths.log_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Default tag:       {}", settings.default_tag);
    println!("  Tag width:         {}", settings.tag_width);
    println!("  Description width: {}", settings.description_width);
    println!("  Log level:         {}", settings.log_level);
}
