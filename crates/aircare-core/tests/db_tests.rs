use aircare_core::{
    models::{
        AssignmentFilter, BookingFilter, NewBooking, NewServiceRecord, UpdateBookingRequest,
    },
    AssignmentStatus, BookingStatus, Database, ServiceError, ServiceRecordStatus, ServiceType,
    TimeSlot,
};
use jiff::civil::date;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Customer, unit and technician IDs for a seeded database
fn seed(db: &mut Database) -> (u64, u64, u64) {
    let customer = db
        .create_customer("Tan Wei Ming", None, "+65 9111 2222", Some("5 Jurong West"))
        .expect("Failed to create customer");
    let unit = db
        .create_aircon_unit(customer.id, "LG", "Dual Inverter", None, None, None)
        .expect("Failed to create unit");
    let technician = db
        .create_technician("Siti Rahmah", "+65 8123 0000", None, None)
        .expect("Failed to create technician");
    (customer.id, unit.id, technician.id)
}

fn new_booking(customer_id: u64, unit_id: Option<u64>, day: u8, slot: TimeSlot) -> NewBooking {
    NewBooking {
        customer_id,
        aircon_unit_id: unit_id,
        service_type: ServiceType::Maintenance,
        preferred_date: date(2025, 3, day as i8),
        preferred_time: slot,
        service_address: "5 Jurong West".to_string(),
        postal_code: None,
        contact_phone: "+65 9111 2222".to_string(),
        aircon_brand: None,
        aircon_model: None,
        issue_description: None,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert!(db.list_customers().unwrap().is_empty());
}

#[test]
fn test_reopen_keeps_data() {
    let temp_file = NamedTempFile::new().unwrap();
    {
        let mut db = Database::new(temp_file.path()).unwrap();
        db.create_customer("Chen Jia Hui", None, "+65 9000 0001", None)
            .unwrap();
    }

    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(db.list_customers().unwrap().len(), 1);
}

#[test]
fn test_create_and_get_booking() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, unit, _) = seed(&mut db);

    let booking = db
        .create_booking(&new_booking(customer, Some(unit), 10, TimeSlot::Morning))
        .expect("Failed to create booking");
    assert!(booking.id > 0);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.technician_id, None);

    let fetched = db
        .get_booking(booking.id)
        .expect("Failed to get booking")
        .expect("Booking should exist");
    assert_eq!(fetched, booking);

    assert!(db.get_booking(booking.id + 100).unwrap().is_none());
}

#[test]
fn test_unit_requires_customer() {
    let (_temp_file, mut db) = create_test_db();

    assert!(matches!(
        db.create_aircon_unit(9, "Daikin", "FTKF", None, None, None),
        Err(ServiceError::NotFound {
            entity: "Customer",
            id: 9
        })
    ));
}

#[test]
fn test_unit_owner_lookup() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, unit, _) = seed(&mut db);

    assert_eq!(db.aircon_unit_owner(unit).unwrap(), Some(customer));
    assert_eq!(db.aircon_unit_owner(unit + 1).unwrap(), None);
    assert!(db.ensure_unit_belongs_to(unit, customer).is_ok());
    assert!(matches!(
        db.ensure_unit_belongs_to(unit, customer + 1),
        Err(ServiceError::ReferentialViolation { .. })
    ));
}

#[test]
fn test_list_bookings_newest_first() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, unit, _) = seed(&mut db);

    let first = db
        .create_booking(&new_booking(customer, Some(unit), 10, TimeSlot::Morning))
        .unwrap();
    let second = db
        .create_booking(&new_booking(customer, None, 11, TimeSlot::Evening))
        .unwrap();

    let all = db.list_bookings(&BookingFilter::default()).unwrap();
    let ids: Vec<u64> = all.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert_eq!(db.list_bookings_by_customer(customer).unwrap().len(), 2);
    assert_eq!(db.list_bookings_by_customer(customer + 1).unwrap().len(), 0);
}

#[test]
fn test_list_bookings_by_date_range() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, _) = seed(&mut db);

    for day in [3, 8, 15, 22] {
        db.create_booking(&new_booking(customer, None, day, TimeSlot::Afternoon))
            .unwrap();
    }

    let filter = BookingFilter {
        start_date: Some(date(2025, 3, 8)),
        end_date: Some(date(2025, 3, 15)),
        ..Default::default()
    };
    let bookings = db.list_bookings(&filter).unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings
        .iter()
        .all(|b| b.preferred_date >= date(2025, 3, 8) && b.preferred_date <= date(2025, 3, 15)));
}

#[test]
fn test_update_booking_fields() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, None, 10, TimeSlot::Morning))
        .unwrap();

    let updated = db
        .update_booking(
            booking.id,
            &UpdateBookingRequest {
                preferred_time: Some(TimeSlot::Evening),
                issue_description: Some("Leaking water".to_string()),
                technician_id: Some(technician),
                ..Default::default()
            },
        )
        .expect("Failed to update booking")
        .expect("Booking should exist");

    assert_eq!(updated.preferred_time, TimeSlot::Evening);
    assert_eq!(updated.issue_description.as_deref(), Some("Leaking water"));
    assert_eq!(updated.technician_id, Some(technician));
    assert_eq!(updated.service_address, booking.service_address);
    assert!(updated.updated_at >= booking.updated_at);
}

#[test]
fn test_update_booking_rejects_unknown_technician() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, None, 10, TimeSlot::Morning))
        .unwrap();

    let result = db.update_booking(
        booking.id,
        &UpdateBookingRequest {
            technician_id: Some(technician + 10),
            ..Default::default()
        },
    );
    assert!(matches!(
        result,
        Err(ServiceError::NotFound {
            entity: "Technician",
            ..
        })
    ));
}

#[test]
fn test_update_missing_booking_returns_none() {
    let (_temp_file, mut db) = create_test_db();

    let result = db
        .update_booking_status(77, BookingStatus::Confirmed)
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_assignment_uniqueness() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, None, 10, TimeSlot::Morning))
        .unwrap();

    let assignment = db
        .create_assignment(booking.id, technician, Some(date(2025, 3, 10)), None, None)
        .expect("Failed to create assignment");
    assert_eq!(assignment.status, AssignmentStatus::Assigned);

    assert!(matches!(
        db.create_assignment(booking.id, technician, None, None, None),
        Err(ServiceError::Conflict { .. })
    ));
    assert_eq!(
        db.list_assignments(&AssignmentFilter::default())
            .unwrap()
            .len(),
        1
    );

    let booking = db.get_booking(booking.id).unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Assigned);
    assert_eq!(booking.technician_id, Some(technician));
}

#[test]
fn test_assignment_status_completes_booking() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, None, 10, TimeSlot::Morning))
        .unwrap();
    let assignment = db
        .create_assignment(booking.id, technician, None, None, None)
        .unwrap();

    let (in_progress, touched) = db
        .update_assignment_status(assignment.id, AssignmentStatus::InProgress, date(2025, 3, 10))
        .unwrap()
        .unwrap();
    assert_eq!(in_progress.status, AssignmentStatus::InProgress);
    assert!(touched.is_none());

    let (completed, booking) = db
        .update_assignment_status(assignment.id, AssignmentStatus::Completed, date(2025, 3, 10))
        .unwrap()
        .unwrap();
    assert_eq!(completed.completion_date, Some(date(2025, 3, 10)));
    assert_eq!(booking.map(|b| b.status), Some(BookingStatus::Completed));
}

#[test]
fn test_list_assignments_by_technician() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, technician) = seed(&mut db);
    let other = db
        .create_technician("Ahmad Faizal", "+65 8765 4321", None, None)
        .unwrap();

    for (day, tech) in [(10, technician), (11, technician), (12, other.id)] {
        let booking = db
            .create_booking(&new_booking(customer, None, day, TimeSlot::Morning))
            .unwrap();
        db.create_assignment(booking.id, tech, Some(date(2025, 3, day as i8)), None, None)
            .unwrap();
    }

    assert_eq!(db.list_assignments_by_technician(technician).unwrap().len(), 2);
    let filtered = db
        .list_assignments(&AssignmentFilter {
            scheduled_date: Some(date(2025, 3, 12)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].technician_id, other.id);
}

#[test]
fn test_service_record_links() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, unit, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, Some(unit), 10, TimeSlot::Morning))
        .unwrap();

    let record = db
        .create_service_record(&NewServiceRecord {
            aircon_unit_id: unit,
            booking_id: Some(booking.id),
            service_date: date(2025, 3, 10),
            description: "Chemical wash".to_string(),
            technician_id: Some(technician),
            next_due_date: Some(date(2025, 6, 10)),
            status: ServiceRecordStatus::Completed,
            cost: Decimal::new(8000, 2),
        })
        .expect("Failed to create record");

    assert!(db.has_service_record_for_booking(booking.id).unwrap());
    assert_eq!(db.list_service_records(Some(unit), None).unwrap(), vec![record]);

    let orphan = NewServiceRecord {
        aircon_unit_id: unit + 5,
        booking_id: None,
        service_date: date(2025, 3, 10),
        description: "Unknown unit".to_string(),
        technician_id: None,
        next_due_date: None,
        status: ServiceRecordStatus::Scheduled,
        cost: Decimal::ZERO,
    };
    assert!(matches!(
        db.create_service_record(&orphan),
        Err(ServiceError::NotFound {
            entity: "Aircon unit",
            ..
        })
    ));
}

#[test]
fn test_service_record_once_per_booking() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, unit, technician) = seed(&mut db);
    let booking = db
        .create_booking(&new_booking(customer, Some(unit), 11, TimeSlot::Evening))
        .unwrap();
    let record = NewServiceRecord {
        aircon_unit_id: unit,
        booking_id: Some(booking.id),
        service_date: date(2025, 3, 11),
        description: "maintenance service completed for booking #1".to_string(),
        technician_id: Some(technician),
        next_due_date: Some(date(2025, 6, 11)),
        status: ServiceRecordStatus::Completed,
        cost: Decimal::ZERO,
    };

    let first = db
        .create_service_record_once(booking.id, || Ok(record.clone()))
        .expect("Failed to create record");
    assert!(first.is_some());

    let second = db
        .create_service_record_once(booking.id, || panic!("record already exists"))
        .unwrap();
    assert_eq!(second, None);
    assert_eq!(db.list_service_records(None, Some(booking.id)).unwrap().len(), 1);
}

#[test]
fn test_schema_indexes_service_records_by_booking() {
    let (temp_file, _db) = create_test_db();

    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    let indexed: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1)",
            ["idx_service_records_booking"],
            |row| row.get(0),
        )
        .unwrap();
    assert!(indexed);
}

#[test]
fn test_slot_rows_cover_range() {
    let (_temp_file, mut db) = create_test_db();
    let (customer, _, _) = seed(&mut db);

    db.create_booking(&new_booking(customer, None, 5, TimeSlot::Morning))
        .unwrap();
    db.create_booking(&new_booking(customer, None, 6, TimeSlot::Evening))
        .unwrap();
    db.create_booking(&new_booking(customer, None, 20, TimeSlot::Morning))
        .unwrap();

    let rows = db.slot_rows(date(2025, 3, 1), date(2025, 3, 10)).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|row| row.preferred_time == "evening"));
}

#[test]
fn test_deactivate_missing_technician() {
    let (_temp_file, mut db) = create_test_db();

    assert!(db.set_technician_active(3, false).unwrap().is_none());
}
