//! Most recent rows of a raw table

use crate::clock::parse_timestamp;
use crate::storage::{Record, TableSchema};

/// The `limit` newest rows by the table's timestamp column, newest first
///
/// Rows with an unreadable timestamp come last; equal timestamps keep their
/// stored order.
pub fn recent_rows(records: &[Record], schema: &TableSchema, limit: usize) -> Vec<Record> {
    let mut keyed: Vec<_> = records
        .iter()
        .map(|r| (parse_timestamp(&r.text(schema.timestamp_column)), r))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    keyed
        .into_iter()
        .take(limit)
        .map(|(_, record)| record.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::BARBERS;
    use crate::storage::Cell;

    fn barber(name: &str, created_at: &str) -> Record {
        Record::from_row(
            &BARBERS.header_row(),
            &[
                Cell::text(name),
                Cell::empty(),
                Cell::Number(0.0),
                Cell::text("True"),
                Cell::text(created_at),
            ],
        )
    }

    fn names(rows: &[Record]) -> Vec<String> {
        rows.iter().map(|r| r.text("name")).collect()
    }

    #[test]
    fn test_newest_first_with_limit() {
        let records = vec![
            barber("Jon", "2024-01-01T09:00:00.000000-03:00"),
            barber("Leo", "2024-01-03T09:00:00.000000-03:00"),
            barber("Rui", "2024-01-02T09:00:00.000000-03:00"),
        ];

        assert_eq!(names(&recent_rows(&records, &BARBERS, 2)), vec!["Leo", "Rui"]);
        assert_eq!(recent_rows(&records, &BARBERS, 10).len(), 3);
    }

    #[test]
    fn test_offsets_compared_as_instants() {
        let records = vec![
            barber("Jon", "2024-01-01T12:00:00.000000+00:00"),
            barber("Leo", "2024-01-01T10:00:00.000000-03:00"),
        ];
        assert_eq!(names(&recent_rows(&records, &BARBERS, 1)), vec!["Leo"]);
    }

    #[test]
    fn test_unreadable_last_and_stable() {
        let records = vec![
            barber("Gil", ""),
            barber("Jon", "2024-01-01T09:00:00.000000-03:00"),
            barber("Zeca", "ontem"),
            barber("Leo", "2024-01-01T09:00:00.000000-03:00"),
        ];
        assert_eq!(
            names(&recent_rows(&records, &BARBERS, 4)),
            vec!["Jon", "Leo", "Gil", "Zeca"]
        );
    }
}
