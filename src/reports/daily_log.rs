//! Daily log
//!
//! The same-day view shown in barber mode: every appointment on one date,
//! optionally narrowed to one barber, latest first.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::TIME_FORMAT;
use crate::error::LedgerResult;
use crate::models::{Appointment, Money};

/// Appointments of one day
#[derive(Debug, Clone, Serialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Barber the log was narrowed to, if any
    pub barber: Option<String>,
    pub count: usize,
    pub revenue: Money,
    /// Most frequent service; ties go to the one seen first
    pub top_service: Option<String>,
    /// Latest first
    pub rows: Vec<Appointment>,
}

impl DailyLog {
    /// Build the log for `date`, optionally for a single barber (exact match)
    pub fn generate(appointments: &[Appointment], date: NaiveDate, barber: Option<&str>) -> Self {
        let mut rows: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.is_on(date))
            .filter(|a| barber.map_or(true, |b| a.barber_name == b))
            .cloned()
            .collect();

        let revenue = rows.iter().map(|a| a.amount).sum();
        let top_service = most_frequent_service(&rows);

        // None sorts before Some, so descending order puts unreadable times last
        rows.sort_by(|a, b| (b.time, b.recorded_at).cmp(&(a.time, a.recorded_at)));

        Self {
            date,
            barber: barber.map(str::to_string),
            count: rows.len(),
            revenue,
            top_service,
            rows,
        }
    }

    /// Format the log for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        let scope = match &self.barber {
            Some(barber) => format!(" ({})", barber),
            None => String::new(),
        };
        output.push_str(&format!("Daily Log: {}{}\n", self.date.format("%Y-%m-%d"), scope));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Appointments: {}\n", self.count));
        output.push_str(&format!(
            "Revenue: {}\n",
            self.revenue.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Top service: {}\n\n",
            self.top_service.as_deref().unwrap_or("-")
        ));

        if self.rows.is_empty() {
            output.push_str("No appointments recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:<14} {:<18} {:<14} {:>10} {:<6}\n",
            "Time", "Barber", "Client", "Service", "Amount", "Paid"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:<14} {:<18} {:<14} {:>10} {:<6}\n",
                row.time
                    .map(|t| t.format(TIME_FORMAT).to_string())
                    .unwrap_or_else(|| "?".into()),
                row.barber_name,
                row.client_name,
                row.service_name,
                row.amount.format_with_symbol(currency),
                row.payment_method
            ));
        }

        output
    }

    /// Export the rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "date", "time", "barber", "client_id", "client", "service", "amount", "payment_method",
            "notes",
        ])?;
        for row in &self.rows {
            csv.write_record([
                self.date.format("%Y-%m-%d").to_string(),
                row.time
                    .map(|t| t.format(TIME_FORMAT).to_string())
                    .unwrap_or_default(),
                row.barber_name.clone(),
                row.client_id.to_string(),
                row.client_name.clone(),
                row.service_name.clone(),
                format!("{:.2}", row.amount.to_number()),
                row.payment_method.to_string(),
                row.notes.clone(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Service with the highest occurrence count; first seen wins ties
fn most_frequent_service(rows: &[Appointment]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(name, _)| *name == row.service_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((&row.service_name, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::appointment;
    use chrono::NaiveTime;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn example_log() -> Vec<Appointment> {
        vec![
            appointment("2024-01-01", "10:00:00", "Jon", "Corte", 5000),
            appointment("2024-01-01", "11:00:00", "Leo", "Barba", 3000),
            appointment("2024-01-02", "09:00:00", "Jon", "Corte", 5000),
        ]
    }

    #[test]
    fn test_example_day() {
        let log = DailyLog::generate(&example_log(), jan(1), None);

        assert_eq!(log.count, 2);
        assert_eq!(log.revenue, Money::from_cents(8000));
        assert_eq!(log.top_service.as_deref(), Some("Corte"));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let log = vec![
            appointment("2024-01-01", "12:00:00", "Jon", "Barba", 3000),
            appointment("2024-01-01", "10:00:00", "Jon", "Corte", 5000),
        ];
        let daily = DailyLog::generate(&log, jan(1), None);
        assert_eq!(daily.top_service.as_deref(), Some("Barba"));
    }

    #[test]
    fn test_most_frequent_beats_order() {
        let log = vec![
            appointment("2024-01-01", "09:00:00", "Jon", "Barba", 3000),
            appointment("2024-01-01", "10:00:00", "Jon", "Corte", 5000),
            appointment("2024-01-01", "11:00:00", "Leo", "Corte", 5000),
        ];
        let daily = DailyLog::generate(&log, jan(1), None);
        assert_eq!(daily.top_service.as_deref(), Some("Corte"));
    }

    #[test]
    fn test_barber_filter() {
        let log = DailyLog::generate(&example_log(), jan(1), Some("Leo"));

        assert_eq!(log.count, 1);
        assert_eq!(log.revenue, Money::from_cents(3000));
        assert_eq!(log.top_service.as_deref(), Some("Barba"));
        assert_eq!(log.barber.as_deref(), Some("Leo"));

        let nobody = DailyLog::generate(&example_log(), jan(1), Some("leo"));
        assert_eq!(nobody.count, 0);
        assert_eq!(nobody.top_service, None);
    }

    #[test]
    fn test_rows_latest_first() {
        let mut log = example_log();
        log.push(appointment("2024-01-01", "??", "Jon", "Corte", 5000));
        log.push(appointment("2024-01-01", "18:30:00", "Jon", "Corte", 5000));

        let daily = DailyLog::generate(&log, jan(1), None);
        let times: Vec<_> = daily.rows.iter().map(|r| r.time).collect();
        assert_eq!(
            times,
            vec![
                NaiveTime::from_hms_opt(18, 30, 0),
                NaiveTime::from_hms_opt(11, 0, 0),
                NaiveTime::from_hms_opt(10, 0, 0),
                None,
            ]
        );
    }

    #[test]
    fn test_empty_day() {
        let log = DailyLog::generate(&example_log(), jan(5), None);
        assert_eq!(log.count, 0);
        assert_eq!(log.revenue, Money::zero());
        assert!(log.format_terminal("R$").contains("No appointments recorded."));
    }

    #[test]
    fn test_export_csv_quotes_fields() {
        let mut log = example_log();
        log[0].notes = "cliente novo, pagou adiantado".into();

        let mut buffer = Vec::new();
        DailyLog::generate(&log, jan(1), None)
            .export_csv(&mut buffer)
            .unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("date,time,barber,client_id"));
        assert!(csv.contains("\"cliente novo, pagou adiantado\""));
    }
}
