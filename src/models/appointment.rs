//! Appointment model
//!
//! One completed service, recorded once and never edited. Barber, client and
//! service names are copies taken at intake, not references.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

use super::ids::ClientId;
use super::money::Money;
use crate::clock::Timestamp;

/// How the client paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Pix,
    Other,
}

impl PaymentMethod {
    /// All methods in form order
    pub const ALL: [PaymentMethod; 4] = [Self::Cash, Self::Card, Self::Pix, Self::Other];

    /// The label persisted in the `payment_method` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Pix => "Pix",
            Self::Other => "Other",
        }
    }

    /// Parse a payment method; accepts the Portuguese labels used by older data
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "dinheiro" => Some(Self::Cash),
            "card" | "cartão" | "cartao" => Some(Self::Card),
            "pix" => Some(Self::Pix),
            "other" | "outro" => Some(Self::Other),
            _ => None,
        }
    }

    /// Read a stored label; anything unrecognised is `Other`
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Other)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded service transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    /// Shop-local calendar date; `None` when the stored cell is unreadable
    pub date: Option<NaiveDate>,

    /// Shop-local time of day; `None` when the stored cell is unreadable
    pub time: Option<NaiveTime>,

    /// Barber name at intake
    pub barber_name: String,

    /// Client reference
    pub client_id: ClientId,

    /// Client name at intake
    pub client_name: String,

    /// Service name at intake
    pub service_name: String,

    /// Amount charged
    pub amount: Money,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Free-text notes
    pub notes: String,

    /// Full-precision instant the row was recorded
    pub recorded_at: Option<Timestamp>,
}

impl Appointment {
    /// Whether the appointment happened on `date`
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == Some(date)
    }

    /// Whether the appointment falls within `start..=end`
    pub fn is_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        matches!(self.date, Some(d) if d >= start && d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment_on(date: Option<NaiveDate>) -> Appointment {
        Appointment {
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0),
            barber_name: "Jon".into(),
            client_id: ClientId::new(1),
            client_name: "Ana".into(),
            service_name: "Corte".into(),
            amount: Money::from_cents(5000),
            payment_method: PaymentMethod::Pix,
            notes: String::new(),
            recorded_at: None,
        }
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!(PaymentMethod::parse("Cash"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse("PIX"), Some(PaymentMethod::Pix));
        assert_eq!(PaymentMethod::parse("Cartão"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("Dinheiro"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse("cheque"), None);
        assert_eq!(PaymentMethod::from_stored("cheque"), PaymentMethod::Other);
    }

    #[test]
    fn test_payment_method_labels() {
        let labels: Vec<_> = PaymentMethod::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["Cash", "Card", "Pix", "Other"]);
    }

    #[test]
    fn test_date_checks() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let appt = appointment_on(Some(day));

        assert!(appt.is_on(day));
        assert!(appt.is_between(day, day));
        assert!(!appt.is_between(
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        ));
    }

    #[test]
    fn test_unreadable_date_matches_nothing() {
        let appt = appointment_on(None);
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(!appt.is_on(day));
        assert!(!appt.is_between(NaiveDate::MIN, NaiveDate::MAX));
    }
}
