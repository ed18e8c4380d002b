//! Client model
//!
//! Clients are created on their first appointment (or by explicit
//! registration) and are never modified afterwards.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::coerce::normalize_phone;
use super::ids::ClientId;
use crate::clock::Timestamp;

/// Date format accepted for birthdates
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// A shop client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    /// Sequential identifier
    pub id: ClientId,

    /// Client name
    pub name: String,

    /// Phone number as typed
    pub phone: String,

    /// E-mail address (may be empty)
    pub email: String,

    /// Date of birth, if known
    pub birthdate: Option<NaiveDate>,

    /// When the client was registered
    pub created_at: Option<Timestamp>,
}

impl Client {
    /// Create a new client record
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        birthdate: Option<NaiveDate>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            birthdate,
            created_at: Some(created_at),
        }
    }

    /// Phone number reduced to its digits
    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.phone)
    }

    /// Whether this client's phone matches an already-normalized phone
    ///
    /// An empty phone never matches anything.
    pub fn matches_phone(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.normalized_phone() == normalized
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}

/// Parse a birthdate typed as `YYYY-MM-DD`
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTHDATE_FORMAT).ok()
}
