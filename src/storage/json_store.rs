//! JSON-file record store
//!
//! Each table lives in its own file under the data directory:
//!
//! ```json
//! { "table": "Barbers", "headers": ["name", ...], "rows": [["Jon", "", 0.0, "True", "..."]] }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::file_io::{read_json, write_json_atomic};
use super::record::{Cell, Record};
use super::schema::{SchemaStatus, TableSchema};
use super::RecordStore;
use crate::error::{LedgerError, LedgerResult};

/// On-disk layout of one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TableFile {
    table: String,
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Cell>>,
}

impl TableFile {
    fn empty(schema: &TableSchema) -> Self {
        Self {
            table: schema.name.to_string(),
            headers: schema.header_row(),
            rows: Vec::new(),
        }
    }
}

/// Record store keeping one JSON file per table
pub struct JsonTableStore {
    data_dir: PathBuf,
}

impl JsonTableStore {
    /// Create a store rooted at `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the file backing a table
    pub fn table_path(&self, schema: &TableSchema) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", schema.name.to_lowercase()))
    }

    fn read_table(&self, schema: &TableSchema) -> LedgerResult<TableFile> {
        let path = self.table_path(schema);
        if !path.exists() {
            return Err(LedgerError::StoreUnavailable(format!(
                "Table {} has not been created ({})",
                schema.name,
                path.display()
            )));
        }
        read_json(path)
    }

    fn write_table(&self, schema: &TableSchema, table: &TableFile) -> LedgerResult<()> {
        write_json_atomic(self.table_path(schema), table)
    }
}

impl RecordStore for JsonTableStore {
    fn ensure_table(&self, schema: &TableSchema) -> LedgerResult<SchemaStatus> {
        let path = self.table_path(schema);
        if !path.exists() {
            debug!(table = schema.name, path = %path.display(), "creating table");
            self.write_table(schema, &TableFile::empty(schema))?;
            return Ok(SchemaStatus::Created);
        }

        let table = self.read_table(schema)?;
        if schema.matches(&table.headers) {
            return Ok(SchemaStatus::Valid);
        }

        warn!(
            table = schema.name,
            found = ?table.headers,
            dropped_rows = table.rows.len(),
            "header row does not match schema; clearing table"
        );
        self.write_table(schema, &TableFile::empty(schema))?;
        Ok(SchemaStatus::Reheadered)
    }

    fn append(&self, schema: &TableSchema, row: Vec<Cell>) -> LedgerResult<()> {
        let mut table = self.read_table(schema)?;
        table.rows.push(row);
        debug!(table = schema.name, rows = table.rows.len(), "appended row");
        self.write_table(schema, &table)
    }

    fn load_all(&self, schema: &TableSchema) -> LedgerResult<Vec<Record>> {
        let table = self.read_table(schema)?;
        Ok(table
            .rows
            .iter()
            .map(|row| Record::from_row(&table.headers, row))
            .collect())
    }

    fn overwrite(&self, schema: &TableSchema, rows: Vec<Vec<Cell>>) -> LedgerResult<()> {
        let mut table = self.read_table(schema)?;
        table.rows = rows;
        self.write_table(schema, &table)
    }

    fn location(&self) -> String {
        self.data_dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{BARBERS, CLIENTS};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonTableStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonTableStore::new(temp_dir.path().join("data"));
        (temp_dir, store)
    }

    fn barber_row(name: &str) -> Vec<Cell> {
        vec![
            Cell::text(name),
            Cell::empty(),
            Cell::Number(0.0),
            Cell::text("True"),
            Cell::text("2024-01-01T09:00:00.000000-03:00"),
        ]
    }

    #[test]
    fn test_ensure_table_is_idempotent() {
        let (_temp_dir, store) = create_test_store();

        assert_eq!(store.ensure_table(&BARBERS).unwrap(), SchemaStatus::Created);
        assert_eq!(store.ensure_table(&BARBERS).unwrap(), SchemaStatus::Valid);
        assert!(store.table_path(&BARBERS).ends_with("barbers.json"));
    }

    #[test]
    fn test_append_and_load() {
        let (_temp_dir, store) = create_test_store();
        store.ensure_table(&BARBERS).unwrap();

        store.append(&BARBERS, barber_row("Jon")).unwrap();
        store.append(&BARBERS, barber_row("Leo")).unwrap();

        let records = store.load_all(&BARBERS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("name"), "Jon");
        assert_eq!(records[1].text("name"), "Leo");
        assert_eq!(records[0].get("commission_pct"), Some(&Cell::Number(0.0)));
    }

    #[test]
    fn test_mismatched_headers_are_cleared() {
        let (_temp_dir, store) = create_test_store();
        let legacy = TableFile {
            table: "Barbers".into(),
            headers: vec!["nome".into(), "telefone".into()],
            rows: vec![vec![Cell::text("Jon"), Cell::empty()]],
        };
        store.write_table(&BARBERS, &legacy).unwrap();

        assert_eq!(store.ensure_table(&BARBERS).unwrap(), SchemaStatus::Reheadered);
        assert!(store.load_all(&BARBERS).unwrap().is_empty());
        assert_eq!(store.ensure_table(&BARBERS).unwrap(), SchemaStatus::Valid);
    }

    #[test]
    fn test_append_to_missing_table_fails() {
        let (_temp_dir, store) = create_test_store();
        let err = store.append(&CLIENTS, vec![Cell::Number(1.0)]).unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_overwrite_replaces_rows() {
        let (_temp_dir, store) = create_test_store();
        store.ensure_table(&BARBERS).unwrap();
        store.append(&BARBERS, barber_row("Jon")).unwrap();

        store
            .overwrite(&BARBERS, vec![barber_row("Leo"), barber_row("Rui")])
            .unwrap();

        let names: Vec<_> = store
            .load_all(&BARBERS)
            .unwrap()
            .iter()
            .map(|r| r.text("name"))
            .collect();
        assert_eq!(names, vec!["Leo", "Rui"]);
    }

    #[test]
    fn test_sharing_not_supported() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.share("owner@example.com").is_err());
    }
}
