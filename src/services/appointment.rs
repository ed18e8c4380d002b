//! Appointment service
//!
//! Records completed services. Appointments are append-only: once written
//! they are never edited or removed.

use tracing::info;

use super::catalog::{is_active_service, price_of};
use super::client::{ClientResolution, ClientService};
use crate::error::{LedgerError, LedgerResult};
use crate::models::client::parse_birthdate;
use crate::models::{Appointment, Client, Money, PaymentMethod};
use crate::storage::{Snapshot, Storage};

/// What was done and how it was paid, for one appointment
#[derive(Debug, Clone, Default)]
pub struct AppointmentInput {
    pub barber_name: String,
    pub service_name: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// The barber-mode intake form, as submitted
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub barber_name: String,
    pub client_name: String,
    pub phone: String,
    pub email: String,
    /// `YYYY-MM-DD`; anything else is dropped
    pub birthdate: String,
    pub service_name: String,
    /// Defaults to the service's current price
    pub amount: Option<Money>,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// Result of a successful intake
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub client: Client,
    pub is_new_client: bool,
    pub appointment: Appointment,
}

/// Service for recording appointments
pub struct AppointmentService<'a> {
    storage: &'a Storage,
}

impl<'a> AppointmentService<'a> {
    /// Create a new appointment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append one appointment for an already-resolved client
    ///
    /// The service must be active in `snapshot`. Pass a snapshot loaded at
    /// submit time so a service deactivated since the form was shown is
    /// rejected.
    pub fn record_appointment(
        &self,
        snapshot: &Snapshot,
        client: &Client,
        input: &AppointmentInput,
    ) -> LedgerResult<Appointment> {
        let barber_name = input.barber_name.trim();
        let service_name = input.service_name.trim();
        validate_barber(barber_name)?;
        if client.name.trim().is_empty() {
            return Err(LedgerError::Validation("Client name is required".into()));
        }
        validate_service(snapshot, service_name)?;

        let clock = self.storage.clock();
        let appointment = Appointment {
            date: Some(clock.today()),
            time: Some(clock.time_of_day()),
            barber_name: barber_name.to_string(),
            client_id: client.id,
            client_name: client.name.clone(),
            service_name: service_name.to_string(),
            amount: input.amount.non_negative(),
            payment_method: input.payment_method,
            notes: input.notes.trim().to_string(),
            recorded_at: Some(clock.stamp()),
        };

        self.storage.append_row(&appointment)?;
        info!(
            barber = %appointment.barber_name,
            client = %client,
            service = %appointment.service_name,
            amount = %appointment.amount,
            "recorded appointment"
        );

        Ok(appointment)
    }

    /// Submit the intake form: resolve the client, then record the appointment
    ///
    /// Every field is validated before anything is written. The client write
    /// and the appointment write are independent; if the second fails the new
    /// client stays.
    pub fn intake(&self, snapshot: &Snapshot, form: &IntakeForm) -> LedgerResult<IntakeOutcome> {
        let service_name = form.service_name.trim();
        validate_barber(form.barber_name.trim())?;
        if form.client_name.trim().is_empty() {
            return Err(LedgerError::Validation("Client name is required".into()));
        }
        validate_service(snapshot, service_name)?;

        let ClientResolution { client, is_new } = ClientService::new(self.storage)
            .find_or_create_client(
                snapshot,
                &form.client_name,
                &form.phone,
                &form.email,
                parse_birthdate(&form.birthdate),
            )?;

        let input = AppointmentInput {
            barber_name: form.barber_name.clone(),
            service_name: service_name.to_string(),
            amount: form
                .amount
                .unwrap_or_else(|| price_of(snapshot, service_name)),
            payment_method: form.payment_method,
            notes: form.notes.clone(),
        };
        let appointment = self.record_appointment(snapshot, &client, &input)?;

        Ok(IntakeOutcome {
            client,
            is_new_client: is_new,
            appointment,
        })
    }
}

fn validate_barber(barber_name: &str) -> LedgerResult<()> {
    if barber_name.is_empty() {
        return Err(LedgerError::Validation("Select a barber first".into()));
    }
    Ok(())
}

fn validate_service(snapshot: &Snapshot, service_name: &str) -> LedgerResult<()> {
    if service_name.is_empty() {
        return Err(LedgerError::Validation("Service is required".into()));
    }
    if !is_active_service(snapshot, service_name) {
        return Err(LedgerError::Validation(format!(
            "'{}' is not an active service",
            service_name
        )));
    }
    Ok(())
}
