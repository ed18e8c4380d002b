//! Rolling-window KPIs
//!
//! The owner dashboard: totals over the trailing `window_days` ending on a
//! reference date, both ends inclusive.

use std::io::Write;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::per_day::{group_by_day, DayTotal};
use crate::error::LedgerResult;
use crate::models::{Appointment, Money};

/// Revenue earned by one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRevenue {
    pub service: String,
    pub count: usize,
    pub revenue: Money,
}

/// KPIs over `[as_of - window_days, as_of]`
#[derive(Debug, Clone, Serialize)]
pub struct RollingKpis {
    pub as_of: NaiveDate,
    pub window_days: u32,
    /// First date inside the window
    pub start: NaiveDate,
    pub count: usize,
    pub revenue: Money,
    /// Revenue per appointment; zero when there are none
    pub avg_ticket: Money,
    /// Distinct barbers with at least one appointment in the window
    pub active_barbers: usize,
    /// Days with at least one appointment, oldest first (not zero-filled)
    pub per_day: Vec<DayTotal>,
    /// Highest revenue first
    pub revenue_by_service: Vec<ServiceRevenue>,
}

impl RollingKpis {
    /// Compute the KPIs for the window ending on `as_of`
    pub fn generate(appointments: &[Appointment], window_days: u32, as_of: NaiveDate) -> Self {
        let start = as_of
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(NaiveDate::MIN);

        let in_window: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.is_between(start, as_of))
            .collect();

        let count = in_window.len();
        let revenue: Money = in_window.iter().map(|a| a.amount).sum();

        let mut barbers: Vec<&str> = Vec::new();
        for appointment in &in_window {
            if !barbers.contains(&appointment.barber_name.as_str()) {
                barbers.push(&appointment.barber_name);
            }
        }

        Self {
            as_of,
            window_days,
            start,
            count,
            revenue,
            avg_ticket: revenue.average(count),
            active_barbers: barbers.len(),
            per_day: group_by_day(in_window.iter().copied()),
            revenue_by_service: revenue_by_service(&in_window),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Dashboard: last {} days ({} to {})\n",
            self.window_days,
            self.start.format("%Y-%m-%d"),
            self.as_of.format("%Y-%m-%d")
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Appointments:   {}\n", self.count));
        output.push_str(&format!(
            "Revenue:        {}\n",
            self.revenue.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Average ticket: {}\n",
            self.avg_ticket.format_with_symbol(currency)
        ));
        output.push_str(&format!("Active barbers: {}\n", self.active_barbers));

        output.push_str("\nRevenue by service\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for row in &self.revenue_by_service {
            output.push_str(&format!(
                "{:<30} {:>8} {:>16}\n",
                row.service,
                row.count,
                row.revenue.format_with_symbol(currency)
            ));
        }

        output.push_str("\nPer day\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        let peak = self.per_day.iter().map(|d| d.count).max().unwrap_or(0);
        for day in &self.per_day {
            output.push_str(&format!(
                "{:<12} {:>4} {:>14}  {}\n",
                day.date.format("%Y-%m-%d"),
                day.count,
                day.revenue.format_with_symbol(currency),
                bar(day.count, peak, 20)
            ));
        }

        output
    }

    /// Export the per-day series and the service breakdown to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["section", "key", "count", "revenue"])?;
        csv.write_record([
            "total".to_string(),
            format!("{}..{}", self.start, self.as_of),
            self.count.to_string(),
            format!("{:.2}", self.revenue.to_number()),
        ])?;
        for day in &self.per_day {
            csv.write_record([
                "day".to_string(),
                day.date.format("%Y-%m-%d").to_string(),
                day.count.to_string(),
                format!("{:.2}", day.revenue.to_number()),
            ])?;
        }
        for row in &self.revenue_by_service {
            csv.write_record([
                "service".to_string(),
                row.service.clone(),
                row.count.to_string(),
                format!("{:.2}", row.revenue.to_number()),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Revenue per service name, highest first; equal revenue keeps first-seen order
fn revenue_by_service(appointments: &[&Appointment]) -> Vec<ServiceRevenue> {
    let mut rows: Vec<ServiceRevenue> = Vec::new();
    for appointment in appointments {
        match rows
            .iter_mut()
            .find(|r| r.service == appointment.service_name)
        {
            Some(row) => {
                row.count += 1;
                row.revenue += appointment.amount;
            }
            None => rows.push(ServiceRevenue {
                service: appointment.service_name.clone(),
                count: 1,
                revenue: appointment.amount,
            }),
        }
    }

    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

fn bar(value: usize, peak: usize, width: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    "#".repeat((value * width).div_ceil(peak))
}
