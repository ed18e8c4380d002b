use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barber_ledger::cli::{handle_barber_command, handle_owner_command};
use barber_ledger::config::{LedgerPaths, Settings};
use barber_ledger::storage::{SchemaStatus, Storage};

/// Environment variable holding the log filter, e.g. `BARBER_LOG=debug`
const LOG_ENV: &str = "BARBER_LOG";

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Operations ledger and reporting engine for a barbershop",
    long_about = "Barber Ledger records clients, barbers, services and appointments \
                  and turns them into daily logs, per-day revenue reports and a \
                  rolling dashboard for the owner."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Barber mode: intake form and same-day log
    #[command(subcommand)]
    Barber(barber_ledger::cli::BarberCommands),

    /// Owner mode: reports, dashboard, management and exports
    #[command(subcommand)]
    Owner(barber_ledger::cli::OwnerCommands),

    /// Create the data directory and the four tables
    Init,

    /// Show current configuration and paths
    Config,

    /// Retry sharing the record store with the configured collaborators
    Share,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Barber(cmd)) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_barber_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Owner(cmd)) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_owner_command(&storage, &settings, &paths, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Barber Ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let storage = Storage::on_disk(&paths)?;
            for (schema, status) in storage.initialize()? {
                let state = match status {
                    SchemaStatus::Created => "created",
                    SchemaStatus::Valid => "ok",
                    SchemaStatus::Reheadered => "reheadered (old rows dropped)",
                };
                println!("  {:<14} {}", schema.name, state);
            }
            storage.share_with(&settings.collaborators());
            println!("Initialization complete!");
            println!();
            println!("Next: 'ledger owner add-service <name> --price <price>'");
            println!("      'ledger barber register <name>'");
        }
        Some(Commands::Config) => {
            println!("Barber Ledger Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Shop name:        {}", settings.shop_name);
            println!("  Currency:         {}", settings.currency_symbol);
            println!("  Dashboard window: {} days", settings.dashboard_window_days);
            println!("  Recent rows:      {}", settings.recent_rows);
            println!("  Shared with:      {}", settings.collaborators().join(", "));
        }
        Some(Commands::Share) => {
            let collaborators = settings.collaborators();
            if collaborators.is_empty() {
                println!("No collaborators configured in {}", paths.settings_file().display());
                return Ok(());
            }
            let storage = Storage::on_disk(&paths)?;
            let shared = storage.share_with(&collaborators);
            println!("Shared with {} of {} collaborator(s)", shared, collaborators.len());
        }
        None => {
            println!("Barber Ledger - barbershop operations and reports");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger barber intake --help' to record an appointment.");
        }
    }

    Ok(())
}
