//! Ledger service layer
//!
//! Validation and writes for clients, barbers, services and appointments.
//! Every operation reads from a caller-supplied `Snapshot` and returns the
//! record it wrote; callers reload the snapshot afterwards.

pub mod appointment;
pub mod barber;
pub mod catalog;
pub mod client;

pub use appointment::{AppointmentInput, AppointmentService, IntakeForm, IntakeOutcome};
pub use barber::{active_barber_names, BarberService};
pub use catalog::{active_service_names, is_active_service, price_of, CatalogService};
pub use client::{next_client_id, ClientResolution, ClientService};
