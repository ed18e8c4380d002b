//! Table schemas
//!
//! The header rows below are the on-disk contract with any existing data and
//! must not change: header strings are compared exactly.

use std::fmt;

/// A named table with a fixed, ordered header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: &'static str,
    /// Column headers in creation order
    pub headers: &'static [&'static str],
    /// Column holding the row's write timestamp
    pub timestamp_column: &'static str,
}

pub const CLIENTS: TableSchema = TableSchema {
    name: "Clients",
    headers: &["id", "name", "phone", "email", "birthdate", "created_at"],
    timestamp_column: "created_at",
};

pub const BARBERS: TableSchema = TableSchema {
    name: "Barbers",
    headers: &["name", "phone", "commission_pct", "active", "created_at"],
    timestamp_column: "created_at",
};

pub const SERVICES: TableSchema = TableSchema {
    name: "Services",
    headers: &["service", "price", "description", "active", "created_at"],
    timestamp_column: "created_at",
};

pub const APPOINTMENTS: TableSchema = TableSchema {
    name: "Appointments",
    headers: &[
        "date",
        "time",
        "barber",
        "client_id",
        "client",
        "service",
        "amount",
        "payment_method",
        "notes",
        "timestamp",
    ],
    timestamp_column: "timestamp",
};

/// Every table the ledger owns, in creation order
pub const ALL_TABLES: [TableSchema; 4] = [CLIENTS, BARBERS, SERVICES, APPOINTMENTS];

impl TableSchema {
    /// Look a table up by name (case-insensitive)
    pub fn find(name: &str) -> Option<TableSchema> {
        ALL_TABLES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .copied()
    }

    /// Whether a stored header row is exactly this schema's
    pub fn matches(&self, headers: &[String]) -> bool {
        headers.len() == self.headers.len()
            && headers.iter().zip(self.headers).all(|(a, b)| a == b)
    }

    /// Owned copy of the header row
    pub fn header_row(&self) -> Vec<String> {
        self.headers.iter().map(|h| h.to_string()).collect()
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Outcome of making sure a table exists with the expected headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table did not exist and was created
    Created,
    /// The table existed with the expected headers
    Valid,
    /// The table had different headers; it was cleared and reheadered
    Reheadered,
}
