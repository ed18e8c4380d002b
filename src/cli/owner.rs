//! Owner-mode CLI commands
//!
//! Reports, the rolling dashboard, barber and service management, the raw
//! data browsers, exports and the audit log.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::barber::parse_day;
use crate::config::{LedgerPaths, Settings};
use crate::display::{
    format_audit_entries, format_barber_list, format_client_list, format_raw_records,
    format_service_list,
};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export, ExportFormat};
use crate::reports::{recent_rows, PerDayReport, RollingKpis};
use crate::services::{BarberService, CatalogService};
use crate::storage::{Storage, TableSchema};

/// What an activation toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Managed {
    Barber,
    Service,
}

/// Owner-mode subcommands
#[derive(Subcommand)]
pub enum OwnerCommands {
    /// Appointment count and revenue per day
    Report {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Rolling-window KPIs
    Dashboard {
        /// Window length in days (defaults to the configured window)
        #[arg(short, long)]
        days: Option<u32>,
        /// Last day of the window (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// List all barbers
    Barbers,
    /// List all services
    Services,
    /// List all clients
    Clients,
    /// Register a barber
    AddBarber {
        /// Barber name
        name: String,
        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Commission percentage (0-100)
        #[arg(short, long, default_value = "0")]
        commission: String,
        /// Register as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Register a service
    AddService {
        /// Service name
        name: String,
        /// Price
        #[arg(short, long, default_value = "0")]
        price: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Register as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Make a barber or service selectable again
    Activate {
        /// Barber or service
        kind: Managed,
        /// Exact name
        name: String,
    },
    /// Hide a barber or service from selection lists
    Deactivate {
        /// Barber or service
        kind: Managed,
        /// Exact name
        name: String,
    },
    /// Browse the most recent rows of a table
    Data {
        /// Table: clients, barbers, services or appointments
        table: String,
        /// Number of rows (defaults to the configured value)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Export a table, or "all"
    Export {
        /// Table name, or "all" (JSON/YAML only)
        table: String,
        /// Output format: csv, json or yaml
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Output file (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Show recent audit log entries
    Audit {
        /// Number of entries
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an owner-mode command
pub fn handle_owner_command(
    storage: &Storage,
    settings: &Settings,
    paths: &LedgerPaths,
    cmd: OwnerCommands,
) -> LedgerResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        OwnerCommands::Report { csv } => {
            let report = PerDayReport::generate(&storage.snapshot()?.appointments);
            if csv {
                report.export_csv(std::io::stdout().lock())?;
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }

        OwnerCommands::Dashboard { days, as_of, csv } => {
            let as_of = match as_of {
                Some(raw) => parse_day(&raw)?,
                None => storage.clock().today(),
            };
            let days = days.unwrap_or(settings.dashboard_window_days);
            let kpis = RollingKpis::generate(&storage.snapshot()?.appointments, days, as_of);
            if csv {
                kpis.export_csv(std::io::stdout().lock())?;
            } else {
                print!("{}", kpis.format_terminal(currency));
            }
        }

        OwnerCommands::Barbers => {
            println!("{}", format_barber_list(&storage.snapshot()?.barbers));
        }

        OwnerCommands::Services => {
            println!("{}", format_service_list(&storage.snapshot()?.services, currency));
        }

        OwnerCommands::Clients => {
            println!("{}", format_client_list(&storage.snapshot()?.clients));
        }

        OwnerCommands::AddBarber {
            name,
            phone,
            commission,
            inactive,
        } => {
            let barber =
                BarberService::new(storage).register_barber(&name, &phone, &commission, !inactive)?;
            println!(
                "Registered barber: {} ({:.1}% commission)",
                barber.name, barber.commission_pct
            );
        }

        OwnerCommands::AddService {
            name,
            price,
            description,
            inactive,
        } => {
            let service = CatalogService::new(storage).register_service(
                &name,
                &price,
                &description,
                !inactive,
            )?;
            println!(
                "Registered service: {} ({})",
                service.name,
                service.price.format_with_symbol(currency)
            );
        }

        OwnerCommands::Activate { kind, name } => set_active(storage, kind, &name, true)?,

        OwnerCommands::Deactivate { kind, name } => set_active(storage, kind, &name, false)?,

        OwnerCommands::Data { table, limit } => {
            let schema = find_table(&table)?;
            let records = storage.load_records(&schema)?;
            let limit = limit.unwrap_or(settings.recent_rows);
            let rows = recent_rows(&records, &schema, limit);
            println!("{}", format_raw_records(&schema, &rows));
            println!("Showing {} of {} rows", rows.len(), records.len());
        }

        OwnerCommands::Export {
            table,
            format,
            output,
            stdout,
        } => {
            let format = ExportFormat::parse(&format).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Unknown export format '{}'. Use csv, json or yaml",
                    format
                ))
            })?;
            let schema = if table.eq_ignore_ascii_case("all") {
                None
            } else {
                Some(find_table(&table)?)
            };

            if stdout {
                export(storage, schema.as_ref(), format, std::io::stdout().lock())?;
                return Ok(());
            }

            let path = output.unwrap_or_else(|| {
                let stem = schema
                    .map(|s| s.name.to_lowercase())
                    .unwrap_or_else(|| "ledger".to_string());
                let stamp = storage.clock().now().format("%Y%m%d-%H%M%S");
                paths
                    .export_dir()
                    .join(format!("{}-{}.{}", stem, stamp, format.extension()))
            });
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(&path)?;
            export(storage, schema.as_ref(), format, BufWriter::new(file))?;
            println!("Exported to {}", path.display());
        }

        OwnerCommands::Audit { limit } => {
            let entries = match storage.audit() {
                Some(logger) => logger.read_recent(limit)?,
                None => Vec::new(),
            };
            println!("{}", format_audit_entries(&entries));
        }
    }

    Ok(())
}

fn find_table(name: &str) -> LedgerResult<TableSchema> {
    TableSchema::find(name).ok_or_else(|| LedgerError::table_not_found(name))
}

fn set_active(storage: &Storage, kind: Managed, name: &str, active: bool) -> LedgerResult<()> {
    let changed = match kind {
        Managed::Barber => BarberService::new(storage).set_active(name, active)?.len(),
        Managed::Service => CatalogService::new(storage).set_active(name, active)?.len(),
    };

    let state = if active { "active" } else { "inactive" };
    if changed == 0 {
        println!("{} is already {}", name, state);
    } else {
        println!("{} is now {} ({} row(s) updated)", name, state, changed);
    }
    Ok(())
}
