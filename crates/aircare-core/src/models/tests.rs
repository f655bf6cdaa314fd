use std::str::FromStr;

use jiff::{civil::date, Timestamp};
use rust_decimal::Decimal;

use super::*;

#[test]
fn test_booking_status_round_trips_through_db_string() {
    for status in BookingStatus::ALL {
        assert_eq!(BookingStatus::from_str(status.as_str()), Ok(status));
    }
    assert!(BookingStatus::from_str("IN_PROGRESS").is_err());
    assert!(BookingStatus::from_str("archived").is_err());
    assert!(BookingStatus::from_str("in progress").is_err());
}

#[test]
fn test_booking_status_terminal() {
    assert!(BookingStatus::Completed.is_terminal());
    assert!(BookingStatus::Cancelled.is_terminal());
    assert!(!BookingStatus::InProgress.is_terminal());
    assert_eq!(BookingStatus::default(), BookingStatus::Pending);
}

#[test]
fn test_assignment_status_parsing() {
    for status in AssignmentStatus::ALL {
        assert_eq!(AssignmentStatus::from_str(status.as_str()), Ok(status));
    }
    assert!(AssignmentStatus::from_str("confirmed").is_err());
    assert!(AssignmentStatus::from_str("Completed").is_err());
}

#[test]
fn test_service_record_status_casing() {
    assert_eq!(ServiceRecordStatus::InProgress.as_str(), "In Progress");
    assert_eq!(
        ServiceRecordStatus::from_str("in progress"),
        Ok(ServiceRecordStatus::InProgress)
    );
    assert_eq!(
        ServiceRecordStatus::from_str("in_progress"),
        Ok(ServiceRecordStatus::InProgress)
    );
    assert_eq!(
        serde_json::to_string(&ServiceRecordStatus::InProgress).unwrap(),
        "\"In Progress\""
    );
    assert_eq!(
        serde_json::to_string(&BookingStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
}

#[test]
fn test_service_type_preserves_unknown_values() {
    assert_eq!(ServiceType::from("Repair"), ServiceType::Repair);

    let other = ServiceType::from("Duct Cleaning");
    assert!(!other.is_known());
    assert_eq!(other.as_str(), "Duct Cleaning");

    let json = serde_json::to_string(&other).unwrap();
    assert_eq!(json, "\"Duct Cleaning\"");
    let back: ServiceType = serde_json::from_str(&json).unwrap();
    assert_eq!(back, other);
}

#[test]
fn test_time_slot_parsing() {
    assert_eq!(TimeSlot::from_str(" Morning "), Ok(TimeSlot::Morning));
    assert_eq!(TimeSlot::from_str("EVENING"), Ok(TimeSlot::Evening));
    assert!(TimeSlot::from_str("night").is_err());
    assert_eq!(TimeSlot::Afternoon.to_string(), "afternoon");
}

#[test]
fn test_booking_serializes_wire_format() {
    let booking = Booking {
        id: 1,
        customer_id: 2,
        aircon_unit_id: None,
        service_type: ServiceType::Installation,
        preferred_date: date(2025, 7, 1),
        preferred_time: TimeSlot::Morning,
        service_address: "3 Changi Road".to_string(),
        postal_code: None,
        contact_phone: "+65 6111 2222".to_string(),
        aircon_brand: None,
        aircon_model: None,
        issue_description: None,
        technician_id: None,
        status: BookingStatus::InProgress,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    };
    let value = serde_json::to_value(&booking).unwrap();

    assert_eq!(value["preferred_date"], "2025-07-01");
    assert_eq!(value["preferred_time"], "morning");
    assert_eq!(value["service_type"], "installation");
    assert_eq!(value["status"], "in_progress");
}

#[test]
fn test_service_record_omits_missing_booking_link() {
    let record = ServiceRecord {
        id: 1,
        aircon_unit_id: 4,
        booking_id: None,
        service_date: date(2025, 2, 10),
        description: "Gas top-up".to_string(),
        technician_id: None,
        next_due_date: None,
        status: ServiceRecordStatus::Scheduled,
        cost: Decimal::new(4500, 2),
        created_at: Timestamp::UNIX_EPOCH,
    };
    let value = serde_json::to_value(&record).unwrap();

    assert!(value.get("booking_id").is_none());
    assert_eq!(value["status"], "Scheduled");
}

#[test]
fn test_update_requests_track_changes() {
    assert!(UpdateBookingRequest::default().is_empty());
    assert!(UpdateAssignmentRequest::default().is_empty());

    let request = UpdateAssignmentRequest {
        actual_cost: Some(Decimal::new(12050, 2)),
        notes: Some("Replaced capacitor".to_string()),
        ..Default::default()
    };
    assert_eq!(
        request.changes(),
        vec!["Actual cost set to 120.50", "Updated notes"]
    );
}
