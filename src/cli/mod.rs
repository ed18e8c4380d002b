//! CLI command handlers
//!
//! Bridges clap argument parsing with the service and reporting layers.
//! Barber mode covers the intake form and the same-day log; owner mode covers
//! reports, catalog management and data access.

pub mod barber;
pub mod owner;

pub use barber::{handle_barber_command, BarberCommands};
pub use owner::{handle_owner_command, Managed, OwnerCommands};
