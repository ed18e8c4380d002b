//! Barber service
//!
//! Registration and activation of barbers. Names are not required to be
//! unique; selection lists show the de-duplicated set of active names.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_number_or_default, Barber};
use crate::storage::{Snapshot, Storage};

/// Service for barber management
pub struct BarberService<'a> {
    storage: &'a Storage,
}

impl<'a> BarberService<'a> {
    /// Create a new barber service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a barber
    ///
    /// A commission that does not parse as a number becomes 0.
    pub fn register_barber(
        &self,
        name: &str,
        phone: &str,
        commission_pct: &str,
        active: bool,
    ) -> LedgerResult<Barber> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Barber name cannot be empty".into()));
        }

        let barber = Barber::new(
            name,
            phone.trim(),
            parse_number_or_default(commission_pct, 0.0),
            active,
            self.storage.clock().stamp(),
        );
        self.storage.append_row(&barber)?;
        info!(barber = %barber.name, active, "registered barber");

        Ok(barber)
    }

    /// Flip `active` on every stored barber row named `name`
    ///
    /// Works on the rows as currently stored, not on a snapshot, and rewrites
    /// only their `active` cell. Returns the rows that changed.
    pub fn set_active(&self, name: &str, active: bool) -> LedgerResult<Vec<Barber>> {
        let name = name.trim();
        let update = self
            .storage
            .set_flag::<Barber>("name", name, "active", active)?;
        if update.matched == 0 {
            return Err(LedgerError::barber_not_found(name));
        }

        for (before, after) in &update.changed {
            self.storage.log_update(before, after);
        }
        if !update.changed.is_empty() {
            info!(barber = name, active, rows = update.changed.len(), "updated barber");
        }

        Ok(update.changed.into_iter().map(|(_, after)| after).collect())
    }
}

/// Sorted, de-duplicated names of active barbers
pub fn active_barber_names(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .barbers
        .iter()
        .filter(|b| b.active && !b.name.is_empty())
        .map(|b| b.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
