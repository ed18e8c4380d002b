//! Barber model

use serde::Serialize;
use std::fmt;

use crate::clock::Timestamp;

/// A barber working at the shop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Barber {
    /// Barber name, matched exactly
    pub name: String,

    /// Phone number (may be empty)
    pub phone: String,

    /// Commission percentage, 0 to 100
    pub commission_pct: f64,

    /// Whether the barber shows up in selection lists
    pub active: bool,

    /// When the barber was registered
    pub created_at: Option<Timestamp>,
}

impl Barber {
    /// Create a new barber; the commission is clamped to 0..=100
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        commission_pct: f64,
        active: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            commission_pct: clamp_percentage(commission_pct),
            active,
            created_at: Some(created_at),
        }
    }
}

impl fmt::Display for Barber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
