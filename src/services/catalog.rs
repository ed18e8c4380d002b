//! Service catalog
//!
//! The shop's menu of services and their current prices. Appointments copy
//! the price at intake, so changing the catalog never rewrites history.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Service};
use crate::storage::{Snapshot, Storage};

/// Service for catalog management
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a service
    ///
    /// A price that does not parse as a number becomes 0; negative prices are
    /// clamped to 0.
    pub fn register_service(
        &self,
        name: &str,
        price: &str,
        description: &str,
        active: bool,
    ) -> LedgerResult<Service> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Service name cannot be empty".into()));
        }

        let service = Service::new(
            name,
            Money::parse_or_zero(price),
            description.trim(),
            active,
            self.storage.clock().stamp(),
        );
        self.storage.append_row(&service)?;
        info!(service = %service, active, "registered service");

        Ok(service)
    }

    /// Flip `active` on every stored service row named `name`
    ///
    /// Works on the rows as currently stored, not on a snapshot, and rewrites
    /// only their `active` cell. Returns the rows that changed.
    pub fn set_active(&self, name: &str, active: bool) -> LedgerResult<Vec<Service>> {
        let name = name.trim();
        let update = self
            .storage
            .set_flag::<Service>("service", name, "active", active)?;
        if update.matched == 0 {
            return Err(LedgerError::service_not_found(name));
        }

        for (before, after) in &update.changed {
            self.storage.log_update(before, after);
        }
        if !update.changed.is_empty() {
            info!(service = name, active, rows = update.changed.len(), "updated service");
        }

        Ok(update.changed.into_iter().map(|(_, after)| after).collect())
    }
}

/// Sorted, de-duplicated names of active services
pub fn active_service_names(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .services
        .iter()
        .filter(|s| s.active && !s.name.is_empty())
        .map(|s| s.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `name` is an active service in the snapshot
pub fn is_active_service(snapshot: &Snapshot, name: &str) -> bool {
    snapshot.services.iter().any(|s| s.active && s.name == name)
}

/// Current price of the first service row named `name`; zero when absent
pub fn price_of(snapshot: &Snapshot, name: &str) -> Money {
    snapshot
        .services
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.price)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ShopClock;
    use crate::storage::schema::SERVICES;
    use crate::storage::{Cell, RecordStore};

    fn create_test_storage() -> Storage {
        Storage::in_memory(ShopClock::system()).unwrap()
    }

    #[test]
    fn test_register_and_price() {
        let storage = create_test_storage();
        let service = CatalogService::new(&storage)
            .register_service("Corte", "50", "Corte masculino", true)
            .unwrap();
        assert_eq!(service.price, Money::from_cents(5000));

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(price_of(&snapshot, "Corte"), Money::from_cents(5000));
        assert_eq!(price_of(&snapshot, "Barba"), Money::zero());
        assert_eq!(snapshot.services[0].description, "Corte masculino");
    }

    #[test]
    fn test_price_coercion() {
        let storage = create_test_storage();
        let catalog = CatalogService::new(&storage);

        let free = catalog.register_service("Lavagem", "grátis", "", true).unwrap();
        assert_eq!(free.price, Money::zero());

        let negative = catalog.register_service("Promo", "-10", "", true).unwrap();
        assert_eq!(negative.price, Money::zero());

        let decimal = catalog.register_service("Barba", "30.5", "", true).unwrap();
        assert_eq!(decimal.price, Money::from_cents(3050));
    }

    #[test]
    fn test_inactive_services_hidden() {
        let storage = create_test_storage();
        let catalog = CatalogService::new(&storage);
        catalog.register_service("Corte", "50", "", true).unwrap();
        catalog.register_service("Barba", "30", "", false).unwrap();

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(active_service_names(&snapshot), vec!["Corte"]);
        assert!(is_active_service(&snapshot, "Corte"));
        assert!(!is_active_service(&snapshot, "Barba"));
        assert!(!is_active_service(&snapshot, "corte"));
    }

    #[test]
    fn test_deactivate_service() {
        let storage = create_test_storage();
        let catalog = CatalogService::new(&storage);
        catalog.register_service("Corte", "50", "", true).unwrap();

        catalog.set_active("Corte", false).unwrap();

        let snapshot = storage.snapshot().unwrap();
        assert!(active_service_names(&snapshot).is_empty());
        // deactivation keeps the price
        assert_eq!(price_of(&snapshot, "Corte"), Money::from_cents(5000));
    }

    #[test]
    fn test_deactivate_leaves_other_rows_as_stored() {
        let storage = create_test_storage();
        let odd_price = vec![
            Cell::text("Pezinho"),
            Cell::Number(10.006),
            Cell::text("só a nuca"),
            Cell::text("True"),
            Cell::text("ontem"),
        ];
        storage.store().append(&SERVICES, odd_price.clone()).unwrap();
        let catalog = CatalogService::new(&storage);
        catalog.register_service("Corte", "50", "", true).unwrap();

        catalog.set_active("Corte", false).unwrap();

        let records = storage.load_records(&SERVICES).unwrap();
        assert_eq!(records[0].to_row(SERVICES.headers), odd_price);
        assert_eq!(records[1].text("active"), "False");
    }

    #[test]
    fn test_set_active_unknown_service() {
        let storage = create_test_storage();
        let err = CatalogService::new(&storage)
            .set_active("Relaxamento", true)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
