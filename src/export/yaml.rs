//! YAML export of raw tables

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;

/// Write the export as YAML, preceded by a comment header
pub fn export_yaml<W: Write>(export: &LedgerExport, mut writer: W) -> LedgerResult<()> {
    let tables: Vec<&str> = export.tables.iter().map(|t| t.table.as_str()).collect();
    let header = format!(
        "# Barber ledger export\n# Generated: {}\n# Tables: {}\n\n",
        export.exported_at.to_rfc3339(),
        tables.join(", ")
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}
