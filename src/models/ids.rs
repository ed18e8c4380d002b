//! Client identifiers
//!
//! Clients carry small sequential integer ids. Id `0` never gets assigned; it
//! stands for a stored row whose id cell could not be read as a number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential client identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

impl ClientId {
    /// Placeholder for rows whose id is missing or non-numeric
    pub const UNREADABLE: ClientId = ClientId(0);

    /// The id given to the first client of an empty ledger
    pub const FIRST: ClientId = ClientId(1);

    /// Wrap a raw id
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether the id was read successfully from storage
    pub const fn is_readable(&self) -> bool {
        self.0 != 0
    }

    /// Read an id from a numeric cell value; fractions are truncated
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() && value >= 1.0 {
            Self(value as u64)
        } else {
            Self::UNREADABLE
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = ClientId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<ClientId>().unwrap(), id);
        assert!("abc".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_from_number() {
        assert_eq!(ClientId::from_number(3.0), ClientId::new(3));
        assert_eq!(ClientId::from_number(0.0), ClientId::UNREADABLE);
        assert_eq!(ClientId::from_number(-4.0), ClientId::UNREADABLE);
        assert!(!ClientId::from_number(f64::NAN).is_readable());
    }

    #[test]
    fn test_serialization() {
        let id = ClientId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
