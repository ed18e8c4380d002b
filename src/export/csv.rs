//! CSV export of a raw table

use std::io::Write;

use crate::error::LedgerResult;
use crate::storage::{Record, TableSchema};

/// Write the header row, then every record's cells in header order
///
/// Numbers are written without a trailing `.0`; booleans stay `True`/`False`.
pub fn export_table_csv<W: Write>(
    schema: &TableSchema,
    records: &[Record],
    writer: W,
) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(schema.headers)?;

    for record in records {
        csv.write_record(schema.headers.iter().map(|column| record.text(column)))?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::SERVICES;
    use crate::storage::Cell;

    #[test]
    fn test_export_services() {
        let records = vec![
            Record::from_row(
                &SERVICES.header_row(),
                &[
                    Cell::text("Corte"),
                    Cell::Number(50.0),
                    Cell::text("Corte, lavagem e finalização"),
                    Cell::text("True"),
                    Cell::text("2024-01-01T09:00:00.000000-03:00"),
                ],
            ),
            Record::from_row(&SERVICES.header_row(), &[Cell::text("Barba"), Cell::Number(27.5)]),
        ];

        let mut buffer = Vec::new();
        export_table_csv(&SERVICES, &records, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "service,price,description,active,created_at");
        assert_eq!(
            lines[1],
            "Corte,50,\"Corte, lavagem e finalização\",True,2024-01-01T09:00:00.000000-03:00"
        );
        assert_eq!(lines[2], "Barba,27.5,,,");
    }

    #[test]
    fn test_export_empty_table() {
        let mut buffer = Vec::new();
        export_table_csv(&SERVICES, &[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "service,price,description,active,created_at\n"
        );
    }
}
