//! Mapping between typed models and stored rows
//!
//! Reading is lenient: a malformed cell becomes a default (0, empty, `None`)
//! instead of failing the whole table load.

use chrono::{NaiveDate, NaiveTime};

use super::record::{Cell, Record};
use super::schema::{TableSchema, APPOINTMENTS, BARBERS, CLIENTS, SERVICES};
use crate::audit::EntityType;
use crate::clock::{format_timestamp, parse_timestamp, Timestamp, TIME_FORMAT};
use crate::models::{
    format_flag, Appointment, Barber, Client, ClientId, Money, PaymentMethod, Service,
};

/// Format used for the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A model stored as one row of a table
pub trait TableRow: Sized {
    /// Table the model lives in
    const SCHEMA: TableSchema;

    /// Entity type recorded in the audit log
    const ENTITY: EntityType;

    /// Cells in the schema's header order
    fn to_cells(&self) -> Vec<Cell>;

    /// Build the model from a loaded record
    fn from_record(record: &Record) -> Self;

    /// Identifier written to the audit log
    fn audit_id(&self) -> String;

    /// Human-readable label written to the audit log
    fn audit_name(&self) -> String;
}

fn timestamp_cell(ts: &Option<Timestamp>) -> Cell {
    ts.as_ref()
        .map(|t| Cell::text(format_timestamp(t)))
        .unwrap_or_else(Cell::empty)
}

fn read_timestamp(record: &Record, column: &str) -> Option<Timestamp> {
    parse_timestamp(&record.text(column))
}

/// Parse a stored `date` cell
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok()))
}

/// Parse a stored `time` cell (`HH:MM:SS`, or `HH:MM`)
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

impl TableRow for Client {
    const SCHEMA: TableSchema = CLIENTS;
    const ENTITY: EntityType = EntityType::Client;

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Number(self.id.value() as f64),
            Cell::text(&self.name),
            Cell::text(&self.phone),
            Cell::text(&self.email),
            self.birthdate
                .map(|d| Cell::text(d.format(DATE_FORMAT).to_string()))
                .unwrap_or_else(Cell::empty),
            timestamp_cell(&self.created_at),
        ]
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: ClientId::from_number(record.number("id")),
            name: record.text("name"),
            phone: record.text("phone"),
            email: record.text("email"),
            birthdate: parse_date(&record.text("birthdate")),
            created_at: read_timestamp(record, "created_at"),
        }
    }

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_name(&self) -> String {
        self.name.clone()
    }
}

impl TableRow for Barber {
    const SCHEMA: TableSchema = BARBERS;
    const ENTITY: EntityType = EntityType::Barber;

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.name),
            Cell::text(&self.phone),
            Cell::Number(self.commission_pct),
            Cell::text(format_flag(self.active)),
            timestamp_cell(&self.created_at),
        ]
    }

    fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("name"),
            phone: record.text("phone"),
            commission_pct: record.number("commission_pct"),
            active: record.flag("active"),
            created_at: read_timestamp(record, "created_at"),
        }
    }

    fn audit_id(&self) -> String {
        self.name.clone()
    }

    fn audit_name(&self) -> String {
        self.name.clone()
    }
}

impl TableRow for Service {
    const SCHEMA: TableSchema = SERVICES;
    const ENTITY: EntityType = EntityType::Service;

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.name),
            Cell::Number(self.price.to_number()),
            Cell::text(&self.description),
            Cell::text(format_flag(self.active)),
            timestamp_cell(&self.created_at),
        ]
    }

    fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("service"),
            price: Money::from_number(record.number("price")),
            description: record.text("description"),
            active: record.flag("active"),
            created_at: read_timestamp(record, "created_at"),
        }
    }

    fn audit_id(&self) -> String {
        self.name.clone()
    }

    fn audit_name(&self) -> String {
        self.to_string()
    }
}

impl TableRow for Appointment {
    const SCHEMA: TableSchema = APPOINTMENTS;
    const ENTITY: EntityType = EntityType::Appointment;

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            self.date
                .map(|d| Cell::text(d.format(DATE_FORMAT).to_string()))
                .unwrap_or_else(Cell::empty),
            self.time
                .map(|t| Cell::text(t.format(TIME_FORMAT).to_string()))
                .unwrap_or_else(Cell::empty),
            Cell::text(&self.barber_name),
            Cell::Number(self.client_id.value() as f64),
            Cell::text(&self.client_name),
            Cell::text(&self.service_name),
            Cell::Number(self.amount.to_number()),
            Cell::text(self.payment_method.as_str()),
            Cell::text(&self.notes),
            timestamp_cell(&self.recorded_at),
        ]
    }

    fn from_record(record: &Record) -> Self {
        Self {
            date: parse_date(&record.text("date")),
            time: parse_time(&record.text("time")),
            barber_name: record.text("barber"),
            client_id: ClientId::from_number(record.number("client_id")),
            client_name: record.text("client"),
            service_name: record.text("service"),
            amount: Money::from_number(record.number("amount")),
            payment_method: PaymentMethod::from_stored(&record.text("payment_method")),
            notes: record.text("notes"),
            recorded_at: read_timestamp(record, "timestamp"),
        }
    }

    fn audit_id(&self) -> String {
        self.recorded_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default()
    }

    fn audit_name(&self) -> String {
        format!("{} / {} / {}", self.barber_name, self.client_name, self.service_name)
    }
}
