//! Point-in-time copy of the four record sets
//!
//! Ledger operations read from a snapshot passed in by the caller and never
//! refresh it themselves; after a write the caller loads a new one.

use serde::Serialize;

use super::rows::TableRow;
use super::RecordStore;
use crate::error::LedgerResult;
use crate::models::{Appointment, Barber, Client, Service};

/// Every record set, typed
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub barbers: Vec<Barber>,
    pub services: Vec<Service>,
    pub appointments: Vec<Appointment>,
}

impl Snapshot {
    /// Load all four tables from the store
    pub fn load(store: &dyn RecordStore) -> LedgerResult<Self> {
        Ok(Self {
            clients: load_table(store)?,
            barbers: load_table(store)?,
            services: load_table(store)?,
            appointments: load_table(store)?,
        })
    }

    /// Whether no table holds any row
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.barbers.is_empty()
            && self.services.is_empty()
            && self.appointments.is_empty()
    }
}

/// Load one table as typed rows
pub fn load_table<T: TableRow>(store: &dyn RecordStore) -> LedgerResult<Vec<T>> {
    Ok(store
        .load_all(&T::SCHEMA)?
        .iter()
        .map(T::from_record)
        .collect())
}
