//! Audit logging for the barbershop ledger
//!
//! Every row the ledger writes (new clients, barbers, services and
//! appointments, plus activation toggles) is also recorded in an append-only
//! audit log.
//!
//! - `AuditEntry`: one entry with timestamp, operation, entity information
//!   and optional before/after values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
