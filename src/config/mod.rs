//! Configuration module for the barbershop ledger
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Shop settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
