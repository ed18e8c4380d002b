//! Reporting engine
//!
//! Pure functions over a snapshot of the appointment log. Nothing is cached:
//! every report is recomputed from the full set of rows.

pub mod daily_log;
pub mod per_day;
pub mod recent;
pub mod rolling;

pub use daily_log::DailyLog;
pub use per_day::{group_by_day, DayTotal, PerDayReport};
pub use recent::recent_rows;
pub use rolling::{RollingKpis, ServiceRevenue};
