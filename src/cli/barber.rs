//! Barber-mode CLI commands
//!
//! Barber selection and registration, the intake form and the same-day log.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_service_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, PaymentMethod};
use crate::reports::DailyLog;
use crate::services::{active_barber_names, AppointmentService, BarberService, IntakeForm};
use crate::storage::rows::parse_date;
use crate::storage::Storage;

/// Barber-mode subcommands
#[derive(Subcommand)]
pub enum BarberCommands {
    /// List active barbers
    List,
    /// Register a new barber
    ///
    /// Barbers register themselves with no commission; the owner sets it
    /// with `owner add-barber --commission`.
    Register {
        /// Barber name
        name: String,
        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
    },
    /// List the active services and their prices
    Services,
    /// Record an appointment for a client
    Intake {
        /// Barber who did the service
        #[arg(short, long)]
        barber: String,
        /// Client name
        #[arg(short, long)]
        client: String,
        /// Client phone (used to find returning clients)
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Client e-mail
        #[arg(short, long, default_value = "")]
        email: String,
        /// Client birthdate (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        birthdate: String,
        /// Service name
        #[arg(short, long)]
        service: String,
        /// Amount charged (defaults to the service price)
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment method: cash, card, pix or other
        #[arg(short = 'm', long, default_value = "cash")]
        payment: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Show the appointments of a day
    Log {
        /// Only this barber's appointments
        #[arg(short, long)]
        barber: Option<String>,
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

/// Handle a barber-mode command
pub fn handle_barber_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BarberCommands,
) -> LedgerResult<()> {
    match cmd {
        BarberCommands::List => {
            let names = active_barber_names(&storage.snapshot()?);
            if names.is_empty() {
                println!("No active barbers. Register one with 'ledger barber register <name>'.");
                return Ok(());
            }
            for name in names {
                println!("{}", name);
            }
        }

        BarberCommands::Register { name, phone } => {
            let barber = BarberService::new(storage).register_barber(&name, &phone, "0", true)?;
            println!("Registered barber: {}", barber.name);
        }

        BarberCommands::Services => {
            let snapshot = storage.snapshot()?;
            let active: Vec<_> = snapshot.services.into_iter().filter(|s| s.active).collect();
            println!("{}", format_service_list(&active, &settings.currency_symbol));
        }

        BarberCommands::Intake {
            barber,
            client,
            phone,
            email,
            birthdate,
            service,
            amount,
            payment,
            notes,
        } => {
            let payment_method = PaymentMethod::parse(&payment).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Unknown payment method '{}'. Use cash, card, pix or other",
                    payment
                ))
            })?;

            let form = IntakeForm {
                barber_name: barber,
                client_name: client,
                phone,
                email,
                birthdate,
                service_name: service,
                amount: amount.as_deref().map(Money::parse_or_zero),
                payment_method,
                notes,
            };

            // Validate against the catalog as it is now, not when the form was filled
            let snapshot = storage.snapshot()?;
            let outcome = AppointmentService::new(storage).intake(&snapshot, &form)?;

            if outcome.is_new_client {
                println!("New client: {}", outcome.client);
            } else {
                println!("Returning client: {}", outcome.client);
            }
            println!(
                "Recorded {} for {} by {}: {} ({})",
                outcome.appointment.service_name,
                outcome.appointment.client_name,
                outcome.appointment.barber_name,
                outcome
                    .appointment
                    .amount
                    .format_with_symbol(&settings.currency_symbol),
                outcome.appointment.payment_method
            );
        }

        BarberCommands::Log { barber, date, csv } => {
            let date = match date {
                Some(raw) => parse_day(&raw)?,
                None => storage.clock().today(),
            };
            let snapshot = storage.snapshot()?;
            let log = DailyLog::generate(&snapshot.appointments, date, barber.as_deref());

            if csv {
                log.export_csv(std::io::stdout().lock())?;
            } else {
                print!("{}", log.format_terminal(&settings.currency_symbol));
            }
        }
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_day(raw: &str) -> LedgerResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
    })
}
