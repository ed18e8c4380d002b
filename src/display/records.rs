//! Record tables

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::clock::Timestamp;
use crate::models::{format_flag, Barber, Client, Service};
use crate::storage::{Record, TableSchema};

fn registered(ts: &Option<Timestamp>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Tabled)]
struct BarberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Commission %")]
    commission: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Registered")]
    created_at: String,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "E-mail")]
    email: String,
    #[tabled(rename = "Birthdate")]
    birthdate: String,
}

/// Barber management list
pub fn format_barber_list(barbers: &[Barber]) -> String {
    if barbers.is_empty() {
        return "No barbers registered.".to_string();
    }

    let rows = barbers.iter().map(|b| BarberRow {
        name: b.name.clone(),
        phone: b.phone.clone(),
        commission: format!("{:.1}", b.commission_pct),
        active: format_flag(b.active),
        created_at: registered(&b.created_at),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Service management list
pub fn format_service_list(services: &[Service], currency: &str) -> String {
    if services.is_empty() {
        return "No services registered.".to_string();
    }

    let rows = services.iter().map(|s| ServiceRow {
        name: s.name.clone(),
        price: s.price.format_with_symbol(currency),
        description: s.description.clone(),
        active: format_flag(s.active),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Client list
pub fn format_client_list(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients registered.".to_string();
    }

    let rows = clients.iter().map(|c| ClientRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        phone: c.phone.clone(),
        email: c.email.clone(),
        birthdate: c.birthdate.map(|d| d.to_string()).unwrap_or_default(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Raw rows exactly as stored, one column per header
pub fn format_raw_records(schema: &TableSchema, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("{} is empty.", schema.name);
    }

    let mut builder = Builder::default();
    builder.push_record(schema.headers.iter().map(|h| h.to_string()));
    for record in records {
        builder.push_record(schema.headers.iter().map(|h| record.text(h)));
    }
    builder.build().with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ShopClock;
    use crate::models::{ClientId, Money};
    use crate::storage::schema::BARBERS;
    use crate::storage::Cell;

    #[test]
    fn test_barber_list() {
        let barbers = vec![
            Barber::new("Jon", "11 9999", 40.0, true, ShopClock::system().stamp()),
            Barber::new("Leo", "", 0.0, false, ShopClock::system().stamp()),
        ];
        let output = format_barber_list(&barbers);

        assert!(output.contains("Commission %"));
        assert!(output.contains("Jon"));
        assert!(output.contains("40.0"));
        assert!(output.contains("False"));
    }

    #[test]
    fn test_service_list_uses_currency() {
        let services = vec![Service::new(
            "Corte",
            Money::from_cents(5000),
            "",
            true,
            ShopClock::system().stamp(),
        )];
        assert!(format_service_list(&services, "R$ ").contains("R$ 50.00"));
    }

    #[test]
    fn test_client_list() {
        let clients = vec![Client::new(
            ClientId::new(3),
            "Ana",
            "",
            "ana@example.com",
            None,
            ShopClock::system().stamp(),
        )];
        let output = format_client_list(&clients);
        assert!(output.contains("ana@example.com"));
        assert!(output.contains("3"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_barber_list(&[]), "No barbers registered.");
        assert_eq!(format_client_list(&[]), "No clients registered.");
        assert_eq!(format_raw_records(&BARBERS, &[]), "Barbers is empty.");
    }

    #[test]
    fn test_raw_records_show_all_headers() {
        let record = Record::from_row(
            &BARBERS.header_row(),
            &[Cell::text("Jon"), Cell::empty(), Cell::Number(40.0)],
        );
        let output = format_raw_records(&BARBERS, &[record]);

        for header in BARBERS.headers {
            assert!(output.contains(header));
        }
        assert!(output.contains("Jon"));
    }
}
