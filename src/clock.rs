//! Shop clock
//!
//! Every date, time and timestamp the ledger writes is taken in the shop's
//! timezone, never the host's. Reports bucket by that local calendar date.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, SubsecRound, Utc};
use chrono_tz::Tz;

/// The single timezone all records are stamped in
pub const SHOP_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Format used for the `time` column
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A recorded instant, keeping the offset it was written with
pub type Timestamp = DateTime<FixedOffset>;

/// Source of "now" for the ledger
#[derive(Debug, Clone, Copy, Default)]
pub struct ShopClock {
    fixed: Option<DateTime<Utc>>,
}

impl ShopClock {
    /// A clock reading the system time
    pub fn system() -> Self {
        Self { fixed: None }
    }

    /// A clock frozen at the given instant (useful for testing)
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self {
            fixed: Some(instant),
        }
    }

    /// Current instant in the shop timezone
    pub fn now(&self) -> DateTime<Tz> {
        self.fixed
            .unwrap_or_else(Utc::now)
            .with_timezone(&SHOP_TIMEZONE)
    }

    /// Current calendar date in the shop timezone
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current time of day in the shop timezone, whole seconds
    pub fn time_of_day(&self) -> NaiveTime {
        self.now().trunc_subsecs(0).time()
    }

    /// Current instant as a storable timestamp (microsecond precision)
    pub fn stamp(&self) -> Timestamp {
        self.now().trunc_subsecs(6).fixed_offset()
    }
}

/// ISO-8601 timestamp with offset and microseconds, e.g. `2024-01-01T09:30:00.000000-03:00`
pub fn format_timestamp(instant: &Timestamp) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a timestamp written by [`format_timestamp`] (or any RFC 3339 string)
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}
