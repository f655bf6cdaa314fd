#![allow(dead_code)]

use aircare_core::{
    params::{CreateAirconUnit, CreateBooking, CreateCustomer, CreateTechnician},
    AirconUnit, Customer, ServiceDesk, ServiceDeskBuilder, Technician,
};
use jiff::civil::date;
use tempfile::TempDir;

/// A desk on a fresh database with "today" pinned to 2025-03-01.
pub async fn create_test_desk() -> (TempDir, ServiceDesk) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let desk = ServiceDeskBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(date(2025, 3, 1))
        .build()
        .await
        .expect("Failed to create service desk");
    (temp_dir, desk)
}

/// Reference data every lifecycle test needs.
pub struct Fixture {
    pub customer: Customer,
    pub unit: AirconUnit,
    pub technician: Technician,
}

pub async fn seed(desk: &ServiceDesk) -> Fixture {
    let customer = desk
        .create_customer(&CreateCustomer {
            name: "Goh Mei Ling".to_string(),
            email: Some("meiling@example.com".to_string()),
            phone: "+65 9123 4567".to_string(),
            address: Some("12 Orchard Road".to_string()),
        })
        .await
        .expect("Failed to create customer");
    let unit = desk
        .create_aircon_unit(&CreateAirconUnit {
            customer_id: customer.id,
            brand: "Daikin".to_string(),
            model: "FTKM25".to_string(),
            location: Some("Living room".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create aircon unit");
    let technician = desk
        .create_technician(&CreateTechnician {
            name: "Muthu Arasan".to_string(),
            phone: "+65 8222 3333".to_string(),
            specialization: Some("inverter systems".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create technician");

    Fixture {
        customer,
        unit,
        technician,
    }
}

pub fn booking_for(fixture: &Fixture, service_type: &str, date: &str, slot: &str) -> CreateBooking {
    CreateBooking {
        customer_id: fixture.customer.id,
        aircon_unit_id: Some(fixture.unit.id),
        service_type: service_type.to_string(),
        preferred_date: date.to_string(),
        preferred_time: slot.to_string(),
        service_address: "12 Orchard Road".to_string(),
        postal_code: Some("238841".to_string()),
        contact_phone: "+65 9123 4567".to_string(),
        ..Default::default()
    }
}
