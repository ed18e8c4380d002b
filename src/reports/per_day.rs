//! Per-day report
//!
//! Appointment count and revenue for every calendar date that has at least
//! one appointment. Rows whose date could not be read fall in no day but are
//! still part of the totals.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{Appointment, Money};

/// Count and revenue for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub count: usize,
    pub revenue: Money,
}

/// Group appointments by date, oldest first
///
/// Only dates with at least one appointment appear.
pub fn group_by_day<'a, I>(appointments: I) -> Vec<DayTotal>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut days: BTreeMap<NaiveDate, (usize, Money)> = BTreeMap::new();
    for appointment in appointments {
        if let Some(date) = appointment.date {
            let entry = days.entry(date).or_insert((0, Money::zero()));
            entry.0 += 1;
            entry.1 += appointment.amount;
        }
    }

    days.into_iter()
        .map(|(date, (count, revenue))| DayTotal {
            date,
            count,
            revenue,
        })
        .collect()
}

/// Per-day aggregates over the whole appointment log
#[derive(Debug, Clone, Serialize)]
pub struct PerDayReport {
    /// One entry per date, oldest first
    pub days: Vec<DayTotal>,
    /// Every appointment, including those with an unreadable date
    pub total_count: usize,
    /// Revenue of every appointment, including those with an unreadable date
    pub total_revenue: Money,
}

impl PerDayReport {
    /// Aggregate the full appointment set
    pub fn generate(appointments: &[Appointment]) -> Self {
        Self {
            days: group_by_day(appointments),
            total_count: appointments.len(),
            total_revenue: appointments.iter().map(|a| a.amount).sum(),
        }
    }

    /// `(date, count)` pairs, oldest first
    pub fn count_series(&self) -> Vec<(NaiveDate, usize)> {
        self.days.iter().map(|d| (d.date, d.count)).collect()
    }

    /// `(date, revenue)` pairs, oldest first
    pub fn revenue_series(&self) -> Vec<(NaiveDate, Money)> {
        self.days.iter().map(|d| (d.date, d.revenue)).collect()
    }

    /// Days newest first, as shown to the owner
    pub fn newest_first(&self) -> impl Iterator<Item = &DayTotal> {
        self.days.iter().rev()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Appointments per Day\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>8} {:>16}\n", "Date", "Count", "Revenue"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for day in self.newest_first() {
            output.push_str(&format!(
                "{:<12} {:>8} {:>16}\n",
                day.date.format("%Y-%m-%d"),
                day.count,
                day.revenue.format_with_symbol(currency)
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>8} {:>16}\n",
            "TOTAL",
            self.total_count,
            self.total_revenue.format_with_symbol(currency)
        ));

        let undated = self.total_count - self.days.iter().map(|d| d.count).sum::<usize>();
        if undated > 0 {
            output.push_str(&format!("({} appointment(s) with an unreadable date)\n", undated));
        }

        output
    }

    /// Export the report to CSV, newest day first
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["date", "count", "revenue"])?;
        for day in self.newest_first() {
            csv.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                day.count.to_string(),
                format!("{:.2}", day.revenue.to_number()),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::appointment;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn example_log() -> Vec<Appointment> {
        vec![
            appointment("2024-01-01", "10:00:00", "Jon", "Corte", 5000),
            appointment("2024-01-01", "11:00:00", "Jon", "Barba", 3000),
            appointment("2024-01-02", "09:00:00", "Leo", "Corte", 5000),
        ]
    }

    #[test]
    fn test_example_series() {
        let report = PerDayReport::generate(&example_log());

        assert_eq!(
            report.count_series(),
            vec![(date("2024-01-01"), 2), (date("2024-01-02"), 1)]
        );
        assert_eq!(
            report.revenue_series(),
            vec![
                (date("2024-01-01"), Money::from_cents(8000)),
                (date("2024-01-02"), Money::from_cents(5000)),
            ]
        );
        assert_eq!(report.total_count, 3);
        assert_eq!(report.total_revenue, Money::from_cents(13000));
    }

    #[test]
    fn test_order_independent() {
        let forward = PerDayReport::generate(&example_log());

        let mut reversed = example_log();
        reversed.reverse();
        let backward = PerDayReport::generate(&reversed);

        let mut rotated = example_log();
        rotated.rotate_left(1);
        let shuffled = PerDayReport::generate(&rotated);

        assert_eq!(forward.days, backward.days);
        assert_eq!(forward.days, shuffled.days);
        assert_eq!(forward.total_revenue, backward.total_revenue);
    }

    #[test]
    fn test_unreadable_dates_only_in_totals() {
        let mut log = example_log();
        log.push(appointment("ontem", "10:00:00", "Jon", "Corte", 2000));

        let report = PerDayReport::generate(&log);
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.total_count, 4);
        assert_eq!(report.total_revenue, Money::from_cents(15000));
        assert!(report
            .format_terminal("R$")
            .contains("1 appointment(s) with an unreadable date"));
    }

    #[test]
    fn test_oversized_amounts_do_not_overflow() {
        let mut log = example_log();
        log[0].amount = Money::from_number(1e17);
        log[1].amount = Money::from_cents(i64::MAX);

        let report = PerDayReport::generate(&log);
        assert_eq!(report.days[0].revenue, Money::from_cents(i64::MAX));
        assert_eq!(report.total_revenue, Money::from_cents(i64::MAX));
        assert_eq!(report.total_count, 3);
    }

    #[test]
    fn test_empty_log() {
        let report = PerDayReport::generate(&[]);
        assert!(report.days.is_empty());
        assert_eq!(report.total_revenue, Money::zero());
    }

    #[test]
    fn test_terminal_newest_first() {
        let output = PerDayReport::generate(&example_log()).format_terminal("R$");
        let first = output.find("2024-01-02").unwrap();
        let second = output.find("2024-01-01").unwrap();
        assert!(first < second);
        assert!(output.contains("R$80.00"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        PerDayReport::generate(&example_log())
            .export_csv(&mut buffer)
            .unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "date,count,revenue");
        assert_eq!(lines[1], "2024-01-02,1,50.00");
        assert_eq!(lines[2], "2024-01-01,2,80.00");
    }
}
