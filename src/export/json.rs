//! JSON export of raw tables

use std::io::Write;

use serde::Serialize;

use crate::clock::Timestamp;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{Record, TableSchema};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One table, rows as column-to-value maps in header order
#[derive(Debug, Clone, Serialize)]
pub struct TableExport {
    pub table: String,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub rows: Vec<Record>,
}

impl TableExport {
    /// Wrap the loaded rows of `schema`
    pub fn new(schema: &TableSchema, rows: Vec<Record>) -> Self {
        Self {
            table: schema.name.to_string(),
            headers: schema.header_row(),
            row_count: rows.len(),
            rows,
        }
    }
}

/// Top-level export document
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    pub schema_version: String,
    pub exported_at: Timestamp,
    pub app_version: String,
    pub tables: Vec<TableExport>,
}

impl LedgerExport {
    /// Build an export stamped with `exported_at`
    pub fn new(exported_at: Timestamp, tables: Vec<TableExport>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            tables,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_json<W: Write>(export: &LedgerExport, mut writer: W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut writer, export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
