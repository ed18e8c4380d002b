//! Raw data export
//!
//! Any of the four tables can be exported exactly as stored:
//! - CSV: one table, header row first (spreadsheet-compatible)
//! - JSON: one table or every table, with export metadata
//! - YAML: same structure as JSON, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;

pub use self::csv::export_table_csv;
pub use json::{export_json, LedgerExport, TableExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::{Storage, TableSchema, ALL_TABLES};

/// Output format for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Parse a format name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Export one table (`Some`) or every table (`None`)
///
/// CSV holds a single table, so exporting everything as CSV is rejected.
pub fn export<W: Write>(
    storage: &Storage,
    table: Option<&TableSchema>,
    format: ExportFormat,
    writer: W,
) -> LedgerResult<()> {
    let schemas: Vec<TableSchema> = match table {
        Some(schema) => vec![*schema],
        None => ALL_TABLES.to_vec(),
    };

    if format == ExportFormat::Csv {
        let [schema] = schemas.as_slice() else {
            return Err(LedgerError::Validation(
                "CSV export needs a single table".into(),
            ));
        };
        return export_table_csv(schema, &storage.load_records(schema)?, writer);
    }

    let mut tables = Vec::with_capacity(schemas.len());
    for schema in &schemas {
        tables.push(TableExport::new(schema, storage.load_records(schema)?));
    }
    let export = LedgerExport::new(storage.clock().stamp(), tables);

    match format {
        ExportFormat::Json => export_json(&export, writer),
        _ => export_yaml(&export, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ShopClock;
    use crate::services::BarberService;
    use crate::storage::schema::BARBERS;

    fn storage_with_barber() -> Storage {
        let storage = Storage::in_memory(ShopClock::system()).unwrap();
        BarberService::new(&storage)
            .register_barber("Jon", "", "40", true)
            .unwrap();
        storage
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("yml"), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::parse("xlsx"), None);
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_export_single_table_csv() {
        let storage = storage_with_barber();
        let mut buffer = Vec::new();
        export(&storage, Some(&BARBERS), ExportFormat::Csv, &mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("name,phone,commission_pct,active,created_at\n"));
        assert!(csv.contains("Jon,,40,True,"));
    }

    #[test]
    fn test_export_all_as_csv_rejected() {
        let storage = storage_with_barber();
        let err = export(&storage, None, ExportFormat::Csv, Vec::new()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_export_all_as_json() {
        let storage = storage_with_barber();
        let mut buffer = Vec::new();
        export(&storage, None, ExportFormat::Json, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["tables"].as_array().unwrap().len(), 4);
        assert_eq!(value["tables"][1]["table"], "Barbers");
        assert_eq!(value["tables"][1]["rows"][0]["name"], "Jon");
    }
}
