//! Barber Ledger - operations ledger and reporting engine for a barbershop
//!
//! Records clients, barbers, services and appointments in four tabular
//! tables and derives the owner's reports from them.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `clock`: Shop-timezone clock
//! - `error`: Custom error types
//! - `models`: Core data models (clients, barbers, services, appointments)
//! - `storage`: Record store abstraction and table schemas
//! - `services`: Registration and appointment intake
//! - `reports`: Per-day, daily log and rolling-window reports
//! - `audit`: Audit logging of every write
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use barber_ledger::config::{LedgerPaths, Settings};
//! use barber_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
