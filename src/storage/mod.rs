//! Storage layer for the barbershop ledger
//!
//! The `RecordStore` trait is the tabular backend (one named table per record
//! type, fixed header rows). `Storage` ties a store to the shop clock and the
//! audit log and is what the services write through.

pub mod file_io;
pub mod json_store;
pub mod memory;
pub mod record;
pub mod rows;
pub mod schema;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonTableStore;
pub use memory::MemoryStore;
pub use record::{Cell, Record};
pub use rows::TableRow;
pub use schema::{SchemaStatus, TableSchema, ALL_TABLES};
pub use snapshot::Snapshot;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::clock::ShopClock;
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::format_flag;

/// A tabular record backend
pub trait RecordStore {
    /// Create the table, or validate its header row
    ///
    /// A table whose headers differ from the schema is cleared and
    /// reheadered; its rows are lost.
    fn ensure_table(&self, schema: &TableSchema) -> LedgerResult<SchemaStatus>;

    /// Append one row, cells in header order
    fn append(&self, schema: &TableSchema, row: Vec<Cell>) -> LedgerResult<()>;

    /// Every row of the table
    fn load_all(&self, schema: &TableSchema) -> LedgerResult<Vec<Record>>;

    /// Replace every row of the table
    fn overwrite(&self, schema: &TableSchema, rows: Vec<Vec<Cell>>) -> LedgerResult<()>;

    /// Grant a collaborator access to the underlying store
    fn share(&self, email: &str) -> LedgerResult<()> {
        Err(LedgerError::StoreUnavailable(format!(
            "Sharing with {} is not supported by this store",
            email
        )))
    }

    /// Human-readable location of the store
    fn location(&self) -> String;
}

/// Outcome of `Storage::set_flag`
#[derive(Debug)]
pub struct FlagUpdate<T> {
    /// Rows whose key matched
    pub matched: usize,
    /// `(before, after)` for each row whose flag actually flipped
    pub changed: Vec<(T, T)>,
}

/// Main storage coordinator
pub struct Storage {
    store: Box<dyn RecordStore>,
    clock: ShopClock,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Wrap a store; no audit log is written until `with_audit` is called
    pub fn new(store: Box<dyn RecordStore>, clock: ShopClock) -> Self {
        Self {
            store,
            clock,
            audit: None,
        }
    }

    /// In-memory storage with every table created
    pub fn in_memory(clock: ShopClock) -> LedgerResult<Self> {
        let storage = Self::new(Box::new(MemoryStore::new()), clock);
        storage.initialize()?;
        Ok(storage)
    }

    /// Record every write in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The on-disk store under `paths`, with auditing, before any table is touched
    pub fn on_disk(paths: &LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self::new(
            Box::new(JsonTableStore::new(paths.data_dir())),
            ShopClock::system(),
        )
        .with_audit(AuditLogger::new(paths.audit_log())))
    }

    /// Open the on-disk store under `paths`, creating or validating every
    /// table and then sharing with the configured collaborators
    pub fn open(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<Self> {
        let storage = Self::on_disk(paths)?;
        storage.initialize()?;
        storage.share_with(&settings.collaborators());
        Ok(storage)
    }

    /// Ensure all four tables exist with the expected headers
    pub fn initialize(&self) -> LedgerResult<Vec<(TableSchema, SchemaStatus)>> {
        ALL_TABLES
            .iter()
            .map(|schema| {
                let status = self.store.ensure_table(schema)?;
                match status {
                    SchemaStatus::Created => info!(table = schema.name, "created table"),
                    SchemaStatus::Reheadered => {
                        warn!(table = schema.name, "table was reheadered; existing rows dropped")
                    }
                    SchemaStatus::Valid => debug!(table = schema.name, "table schema valid"),
                }
                Ok((*schema, status))
            })
            .collect()
    }

    /// Try to share the store with every address
    ///
    /// Failures are logged and skipped. Returns how many shares succeeded.
    pub fn share_with(&self, emails: &[String]) -> usize {
        emails
            .iter()
            .filter(|email| match self.store.share(email) {
                Ok(()) => {
                    info!(email = email.as_str(), "shared record store");
                    true
                }
                Err(e) => {
                    warn!(email = email.as_str(), error = %e, "could not share record store");
                    false
                }
            })
            .count()
    }

    /// The underlying record store
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// The shop clock
    pub fn clock(&self) -> ShopClock {
        self.clock
    }

    /// The audit log, when one is attached
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load a fresh snapshot of every table
    pub fn snapshot(&self) -> LedgerResult<Snapshot> {
        Snapshot::load(self.store())
    }

    /// Raw rows of one table
    pub fn load_records(&self, schema: &TableSchema) -> LedgerResult<Vec<Record>> {
        self.store.load_all(schema)
    }

    /// Append a model as one row and audit the creation
    ///
    /// Once the row is stored the call succeeds; an audit failure is only
    /// logged.
    pub fn append_row<T: TableRow + Serialize>(&self, row: &T) -> LedgerResult<()> {
        self.store.append(&T::SCHEMA, row.to_cells())?;
        debug!(table = T::SCHEMA.name, id = %row.audit_id(), "appended row");
        self.log_create(row);
        Ok(())
    }

    /// Set the boolean `flag_column` on every row whose `key_column` equals `key`
    ///
    /// Works on the raw stored rows: only the flag cell of rows that change
    /// is rewritten, every other cell goes back exactly as it was read.
    pub fn set_flag<T: TableRow>(
        &self,
        key_column: &str,
        key: &str,
        flag_column: &str,
        value: bool,
    ) -> LedgerResult<FlagUpdate<T>> {
        let schema = T::SCHEMA;
        let mut records = self.store.load_all(&schema)?;

        let mut matched = 0;
        let mut changed = Vec::new();
        for record in records.iter_mut().filter(|r| r.text(key_column) == key) {
            matched += 1;
            if record.flag(flag_column) == value {
                continue;
            }
            let before = T::from_record(record);
            record.set(flag_column, Cell::text(format_flag(value)));
            changed.push((before, T::from_record(record)));
        }

        if !changed.is_empty() {
            let rows = records.iter().map(|r| r.to_row(schema.headers)).collect();
            self.store.overwrite(&schema, rows)?;
            debug!(table = schema.name, key, rows = changed.len(), "rewrote flag");
        }

        Ok(FlagUpdate { matched, changed })
    }

    /// Audit the creation of a row; failures are logged, not returned
    pub fn log_create<T: TableRow + Serialize>(&self, row: &T) {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::create(
                self.clock.stamp(),
                T::ENTITY,
                row.audit_id(),
                Some(row.audit_name()),
                row,
            );
            if let Err(e) = logger.log(&entry) {
                warn!(table = T::SCHEMA.name, error = %e, "could not write audit entry");
            }
        }
    }

    /// Audit a change to an existing row; failures are logged, not returned
    pub fn log_update<T: TableRow + Serialize>(&self, before: &T, after: &T) {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::update(
                self.clock.stamp(),
                T::ENTITY,
                after.audit_id(),
                Some(after.audit_name()),
                before,
                after,
            );
            if let Err(e) = logger.log(&entry) {
                warn!(table = T::SCHEMA.name, error = %e, "could not write audit entry");
            }
        }
    }
}
