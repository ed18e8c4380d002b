//! Core data models for the barbershop ledger
//!
//! The four record types (clients, barbers, services, appointments) plus the
//! value types they are built from.

pub mod appointment;
pub mod barber;
pub mod client;
pub mod coerce;
pub mod ids;
pub mod money;
pub mod service;

pub use appointment::{Appointment, PaymentMethod};
pub use barber::Barber;
pub use client::Client;
pub use coerce::{format_flag, normalize_phone, parse_flag, parse_number_or_default};
pub use ids::ClientId;
pub use money::Money;
pub use service::Service;
