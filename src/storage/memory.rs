//! In-memory record store
//!
//! Same semantics as the file store without touching disk. Sharing always
//! succeeds and is remembered, so callers can inspect who was granted access.

use std::collections::HashMap;
use std::sync::RwLock;

use super::record::{Cell, Record};
use super::schema::{SchemaStatus, TableSchema};
use super::RecordStore;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Default)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Record store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
    shared_with: RwLock<Vec<String>>,
}

fn lock_error<E: std::fmt::Display>(e: E) -> LedgerError {
    LedgerError::StoreUnavailable(format!("Failed to acquire lock: {}", e))
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with arbitrary headers and rows (for migration scenarios)
    pub fn with_table(self, name: &str, headers: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(
                name.to_string(),
                Table {
                    headers: headers.iter().map(|h| h.to_string()).collect(),
                    rows,
                },
            );
        }
        self
    }

    /// Addresses the store has been shared with
    pub fn shared_with(&self) -> LedgerResult<Vec<String>> {
        Ok(self.shared_with.read().map_err(lock_error)?.clone())
    }

    /// Number of rows in a table
    pub fn row_count(&self, schema: &TableSchema) -> LedgerResult<usize> {
        let tables = self.tables.read().map_err(lock_error)?;
        Ok(tables.get(schema.name).map(|t| t.rows.len()).unwrap_or(0))
    }
}

fn missing_table(schema: &TableSchema) -> LedgerError {
    LedgerError::StoreUnavailable(format!("Table {} has not been created", schema.name))
}

impl RecordStore for MemoryStore {
    fn ensure_table(&self, schema: &TableSchema) -> LedgerResult<SchemaStatus> {
        let mut tables = self.tables.write().map_err(lock_error)?;
        let fresh = Table {
            headers: schema.header_row(),
            rows: Vec::new(),
        };

        match tables.get(schema.name) {
            None => {
                tables.insert(schema.name.to_string(), fresh);
                Ok(SchemaStatus::Created)
            }
            Some(table) if schema.matches(&table.headers) => Ok(SchemaStatus::Valid),
            Some(_) => {
                tables.insert(schema.name.to_string(), fresh);
                Ok(SchemaStatus::Reheadered)
            }
        }
    }

    fn append(&self, schema: &TableSchema, row: Vec<Cell>) -> LedgerResult<()> {
        let mut tables = self.tables.write().map_err(lock_error)?;
        let table = tables
            .get_mut(schema.name)
            .ok_or_else(|| missing_table(schema))?;
        table.rows.push(row);
        Ok(())
    }

    fn load_all(&self, schema: &TableSchema) -> LedgerResult<Vec<Record>> {
        let tables = self.tables.read().map_err(lock_error)?;
        let table = tables.get(schema.name).ok_or_else(|| missing_table(schema))?;
        Ok(table
            .rows
            .iter()
            .map(|row| Record::from_row(&table.headers, row))
            .collect())
    }

    fn overwrite(&self, schema: &TableSchema, rows: Vec<Vec<Cell>>) -> LedgerResult<()> {
        let mut tables = self.tables.write().map_err(lock_error)?;
        let table = tables
            .get_mut(schema.name)
            .ok_or_else(|| missing_table(schema))?;
        table.rows = rows;
        Ok(())
    }

    fn share(&self, email: &str) -> LedgerResult<()> {
        let mut shared = self.shared_with.write().map_err(lock_error)?;
        if !shared.iter().any(|e| e == email) {
            shared.push(email.to_string());
        }
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
