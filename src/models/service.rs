//! Service model
//!
//! A service on the shop's menu ("Corte", "Barba", ...). Appointments copy
//! the service name and amount at intake, so later price changes never
//! rewrite history.

use serde::Serialize;
use std::fmt;

use super::money::Money;
use crate::clock::Timestamp;

/// A service offered by the shop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Service name, matched exactly
    pub name: String,

    /// Current list price
    pub price: Money,

    /// Free-text description (may be empty)
    pub description: String,

    /// Whether the service shows up in selection lists
    pub active: bool,

    /// When the service was registered
    pub created_at: Option<Timestamp>,
}

impl Service {
    /// Create a new service; negative prices are clamped to zero
    pub fn new(
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
        active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.non_negative(),
            description: description.into(),
            active,
            created_at: Some(created_at),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}
