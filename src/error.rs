//! Custom error types for the barbershop ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input; nothing was written
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The record store could not be read or written
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for barbers
    pub fn barber_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Barber",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for services
    pub fn service_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Service",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tables
    pub fn table_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Table",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the record store failed
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::barber_not_found("Jon");
        assert_eq!(err.to_string(), "Barber not found: Jon");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = LedgerError::Validation("Barber name is required".into());
        assert!(err.is_validation());
        assert!(!err.is_store_unavailable());
        assert_eq!(err.to_string(), "Validation error: Barber name is required");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
