//! Client service
//!
//! Clients are de-duplicated by phone number (digits only). An existing
//! client is returned as stored; a repeat submission never overwrites it.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_phone, Client, ClientId};
use crate::storage::{Snapshot, Storage};

/// A resolved client and whether it was just created
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResolution {
    pub client: Client,
    pub is_new: bool,
}

/// Service for client lookup and creation
pub struct ClientService<'a> {
    storage: &'a Storage,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Return the client with this phone, or register a new one
    ///
    /// An empty phone never matches, so such clients are always created.
    pub fn find_or_create_client(
        &self,
        snapshot: &Snapshot,
        name: &str,
        phone: &str,
        email: &str,
        birthdate: Option<NaiveDate>,
    ) -> LedgerResult<ClientResolution> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Client name is required".into()));
        }

        if let Some(existing) = find_by_phone(&snapshot.clients, phone) {
            debug!(client = %existing, "matched existing client by phone");
            return Ok(ClientResolution {
                client: existing.clone(),
                is_new: false,
            });
        }

        let client = Client::new(
            next_client_id(&snapshot.clients),
            name,
            phone.trim(),
            email.trim(),
            birthdate,
            self.storage.clock().stamp(),
        );
        self.storage.append_row(&client)?;
        info!(client = %client, "registered client");

        Ok(ClientResolution {
            client,
            is_new: true,
        })
    }
}

/// First client whose normalized phone equals `phone`'s
pub fn find_by_phone<'c>(clients: &'c [Client], phone: &str) -> Option<&'c Client> {
    let normalized = normalize_phone(phone);
    clients.iter().find(|c| c.matches_phone(&normalized))
}

/// Id for the next client
///
/// One past the largest readable id. When rows exist but none has a readable
/// id, falls back to the row count plus one.
pub fn next_client_id(clients: &[Client]) -> ClientId {
    let max = clients
        .iter()
        .filter(|c| c.id.is_readable())
        .map(|c| c.id.value())
        .max();

    match max {
        Some(max) => ClientId::new(max + 1),
        None => ClientId::new(clients.len() as u64 + 1),
    }
}
