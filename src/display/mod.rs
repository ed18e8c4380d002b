//! Display formatting for terminal output
//!
//! Tables for the owner's management lists, the raw data browsers and the
//! audit log.

pub mod audit;
pub mod records;

pub use audit::format_audit_entries;
pub use records::{format_barber_list, format_client_list, format_raw_records, format_service_list};
