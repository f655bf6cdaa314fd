mod common;

use aircare_core::{
    params::{
        AssignTechnician, AvailabilityRange, DeleteBooking, Id, ListAssignments, ListBookings,
        ListServiceRecords, UpdateAssignment, UpdateAssignmentStatus, UpdateBookingStatus,
    },
    AssignmentStatus, BookingStatus, Database, RecordOutcome, ServiceError, ServiceRecordStatus,
    TimeSlot,
};
use common::{booking_for, create_test_desk, seed};
use jiff::civil::date;
use tokio::task::JoinSet;

fn status(id: u64, status: &str) -> UpdateBookingStatus {
    UpdateBookingStatus {
        id,
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_status_setter_accepts_every_value_from_every_value() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-04-01", "morning"))
        .await
        .expect("Failed to create booking");

    for from in BookingStatus::ALL {
        for to in BookingStatus::ALL {
            desk.update_booking_status(&status(booking.id, from.as_str()))
                .await
                .expect("Failed to set starting status");
            let change = desk
                .update_booking_status(&status(booking.id, to.as_str()))
                .await
                .unwrap_or_else(|e| panic!("{from:?} -> {to:?} failed: {e}"));
            assert_eq!(change.resource.status, to);
        }
    }

    // Reopening a cancelled booking is allowed
    desk.update_booking_status(&status(booking.id, "cancelled"))
        .await
        .unwrap();
    let reopened = desk
        .update_booking_status(&status(booking.id, "pending"))
        .await
        .unwrap();
    assert_eq!(reopened.resource.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_status_update_on_missing_booking() {
    let (_temp_dir, desk) = create_test_desk().await;

    assert!(matches!(
        desk.update_booking_status(&status(12, "confirmed")).await,
        Err(ServiceError::NotFound {
            entity: "Booking",
            id: 12
        })
    ));
}

#[tokio::test]
async fn test_completing_twice_creates_one_record() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "inspection", "2025-04-02", "afternoon"))
        .await
        .unwrap();

    let first = desk
        .update_booking_status(&status(booking.id, "completed"))
        .await
        .unwrap();
    assert!(first.record.created().is_some());

    let second = desk
        .update_booking_status(&status(booking.id, "completed"))
        .await
        .unwrap();
    assert_eq!(second.record, RecordOutcome::AlreadyRecorded);

    let records = desk
        .list_service_records(&ListServiceRecords {
            booking_id: Some(booking.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_completions_create_one_record() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;

    for round in 0..5u8 {
        let booking = desk
            .create_booking(&booking_for(
                &fixture,
                "maintenance",
                &format!("2025-04-{:02}", 10 + round),
                "evening",
            ))
            .await
            .unwrap();

        let mut workers = JoinSet::new();
        for _ in 0..8 {
            let desk = desk.clone();
            let id = booking.id;
            workers.spawn(async move {
                desk.update_booking_status(&status(id, "completed")).await
            });
        }
        let mut created = 0;
        while let Some(joined) = workers.join_next().await {
            let change = joined
                .expect("worker panicked")
                .expect("Failed to complete booking");
            assert_eq!(change.resource.status, BookingStatus::Completed);
            match change.record {
                RecordOutcome::Created(_) => created += 1,
                RecordOutcome::AlreadyRecorded => {}
                other => panic!("unexpected record outcome: {other:?}"),
            }
        }
        assert_eq!(created, 1);

        let records = desk
            .list_service_records(&ListServiceRecords {
                booking_id: Some(booking.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}

#[tokio::test]
async fn test_completion_record_for_booking_42() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;

    // Burn through IDs 1..=41 so the booking under test is #42
    {
        let mut db = Database::new(desk.database_path()).unwrap();
        for _ in 0..41 {
            let filler = booking_for(&fixture, "repair", "2025-05-01", "evening")
                .validate(date(2025, 3, 1))
                .unwrap();
            let created = db.create_booking(&filler).unwrap();
            db.delete_booking(created.id).unwrap();
        }
    }

    let booking = desk
        .create_booking(&booking_for(&fixture, "maintenance", "2025-06-15", "morning"))
        .await
        .unwrap();
    assert_eq!(booking.id, 42);

    let change = desk
        .update_booking_status(&status(42, "completed"))
        .await
        .unwrap();
    assert!(change.warning().is_none());

    let record = change.record.created().expect("record created").clone();
    assert_eq!(record.aircon_unit_id, fixture.unit.id);
    assert_eq!(record.booking_id, Some(42));
    assert_eq!(record.service_date, date(2025, 6, 15));
    assert_eq!(record.next_due_date, Some(date(2025, 9, 15)));
    assert_eq!(record.status, ServiceRecordStatus::Completed);
    assert_eq!(record.cost.to_string(), "0.00");
    assert!(record
        .description
        .contains("maintenance service completed for booking #42"));

    let stored = desk
        .get_service_record(&Id { id: record.id })
        .await
        .unwrap()
        .expect("record stored");
    assert_eq!(stored, record);
}

#[tokio::test]
async fn test_installation_next_due_clamps_to_month_end() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "installation", "2026-01-31", "morning"))
        .await
        .unwrap();

    let change = desk
        .update_booking_status(&status(booking.id, "completed"))
        .await
        .unwrap();
    let record = change.record.created().expect("record created");
    assert_eq!(record.next_due_date, Some(date(2026, 2, 28)));
}

#[tokio::test]
async fn test_completion_without_unit_keeps_status_and_warns() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let mut params = booking_for(&fixture, "repair", "2025-04-03", "evening");
    params.aircon_unit_id = None;
    params.aircon_brand = Some("Panasonic".to_string());
    let booking = desk.create_booking(&params).await.unwrap();

    let change = desk
        .update_booking_status(&status(booking.id, "completed"))
        .await
        .expect("status update must not fail");

    assert_eq!(change.resource.status, BookingStatus::Completed);
    assert!(matches!(change.record, RecordOutcome::Failed { .. }));
    assert!(change.warning().is_some());

    let stored = desk.get_booking(&Id { id: booking.id }).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_non_completed_status_writes_no_record() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-04-04", "morning"))
        .await
        .unwrap();

    let change = desk
        .update_booking_status(&status(booking.id, "in_progress"))
        .await
        .unwrap();
    assert_eq!(change.record, RecordOutcome::NotTriggered);

    let records = desk
        .list_service_records(&ListServiceRecords::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_assign_technician_sets_booking_assigned() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "maintenance", "2025-04-05", "morning"))
        .await
        .unwrap();

    let assignment = desk
        .assign_technician(&AssignTechnician {
            booking_id: booking.id,
            technician_id: fixture.technician.id,
            scheduled_date: Some("2025-04-05".to_string()),
            scheduled_time: Some("09:30".to_string()),
            notes: None,
        })
        .await
        .expect("Failed to assign technician");
    assert_eq!(assignment.status, AssignmentStatus::Assigned);
    assert_eq!(assignment.scheduled_date, Some(date(2025, 4, 5)));

    let updated = desk.get_booking(&Id { id: booking.id }).await.unwrap().unwrap();
    assert_eq!(updated.status, BookingStatus::Assigned);
    assert_eq!(updated.technician_id, Some(fixture.technician.id));

    let by_booking = desk
        .get_assignment_by_booking(&Id { id: booking.id })
        .await
        .unwrap();
    assert_eq!(by_booking, Some(assignment));
}

#[tokio::test]
async fn test_second_assignment_conflicts() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-04-06", "afternoon"))
        .await
        .unwrap();
    let assign = AssignTechnician {
        booking_id: booking.id,
        technician_id: fixture.technician.id,
        ..Default::default()
    };

    desk.assign_technician(&assign).await.unwrap();
    assert!(matches!(
        desk.assign_technician(&assign).await,
        Err(ServiceError::Conflict { .. })
    ));

    let assignments = desk
        .list_assignments(&ListAssignments::default())
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);
}

#[tokio::test]
async fn test_completing_assignment_completes_booking() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-04-07", "morning"))
        .await
        .unwrap();
    let assignment = desk
        .assign_technician(&AssignTechnician {
            booking_id: booking.id,
            technician_id: fixture.technician.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let in_progress = desk
        .update_assignment_status(&UpdateAssignmentStatus {
            id: assignment.id,
            status: "in_progress".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(in_progress.record, RecordOutcome::NotTriggered);

    let change = desk
        .update_assignment_status(&UpdateAssignmentStatus {
            id: assignment.id,
            status: "completed".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(change.resource.status, AssignmentStatus::Completed);
    assert_eq!(change.resource.completion_date, Some(date(2025, 3, 1)));

    let record = change.record.created().expect("record created");
    assert_eq!(record.booking_id, Some(booking.id));
    assert_eq!(record.technician_id, Some(fixture.technician.id));
    assert_eq!(record.next_due_date, Some(date(2025, 10, 7)));

    let completed = desk.get_booking(&Id { id: booking.id }).await.unwrap().unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);

    // Completing the booking afterwards does not duplicate the record
    let again = desk
        .update_booking_status(&status(booking.id, "completed"))
        .await
        .unwrap();
    assert_eq!(again.record, RecordOutcome::AlreadyRecorded);
}

#[tokio::test]
async fn test_assign_to_missing_booking() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-04-08", "morning"))
        .await
        .unwrap();

    assert!(matches!(
        desk.assign_technician(&AssignTechnician {
            booking_id: booking.id + 1,
            technician_id: fixture.technician.id,
            ..Default::default()
        })
        .await,
        Err(ServiceError::NotFound {
            entity: "Booking",
            ..
        })
    ));

    let unchanged = desk.get_booking(&Id { id: booking.id }).await.unwrap().unwrap();
    assert_eq!(unchanged, booking);
    let assignments = desk
        .list_assignments(&ListAssignments::default())
        .await
        .unwrap();
    assert!(assignments.is_empty());
}

#[tokio::test]
async fn test_status_update_on_missing_assignment() {
    let (_temp_dir, desk) = create_test_desk().await;

    assert!(matches!(
        desk.update_assignment_status(&UpdateAssignmentStatus {
            id: 9,
            status: "completed".to_string(),
        })
        .await,
        Err(ServiceError::NotFound {
            entity: "Assignment",
            id: 9
        })
    ));
}

#[tokio::test]
async fn test_invalid_assignment_status() {
    let (_temp_dir, desk) = create_test_desk().await;

    assert!(matches!(
        desk.update_assignment_status(&UpdateAssignmentStatus {
            id: 1,
            status: "confirmed".to_string(),
        })
        .await,
        Err(ServiceError::InvalidStatus {
            kind: "assignment",
            ..
        })
    ));
}

#[tokio::test]
async fn test_reassignment_updates_booking_technician() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let backup = desk
        .create_technician(&aircare_core::params::CreateTechnician {
            name: "Lee Jun Hao".to_string(),
            phone: "+65 8333 4444".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let booking = desk
        .create_booking(&booking_for(&fixture, "inspection", "2025-04-08", "evening"))
        .await
        .unwrap();
    let assignment = desk
        .assign_technician(&AssignTechnician {
            booking_id: booking.id,
            technician_id: fixture.technician.id,
            ..Default::default()
        })
        .await
        .unwrap();

    let (updated, changes) = desk
        .update_assignment(&UpdateAssignment {
            id: assignment.id,
            technician_id: Some(backup.id),
            actual_cost: Some("95.00".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.technician_id, backup.id);
    assert_eq!(changes.len(), 2);

    let stored = desk.get_booking(&Id { id: booking.id }).await.unwrap().unwrap();
    assert_eq!(stored.technician_id, Some(backup.id));
}

#[tokio::test]
async fn test_availability_excludes_cancelled_and_empty_dates() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;

    desk.create_booking(&booking_for(&fixture, "repair", "2025-03-04", "morning"))
        .await
        .unwrap();
    desk.create_booking(&booking_for(&fixture, "repair", "2025-03-04", "evening"))
        .await
        .unwrap();
    let cancelled = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-03-05", "morning"))
        .await
        .unwrap();
    desk.update_booking_status(&status(cancelled.id, "cancelled"))
        .await
        .unwrap();
    // Outside the window
    desk.create_booking(&booking_for(&fixture, "repair", "2025-04-01", "morning"))
        .await
        .unwrap();

    let availability = desk
        .get_availability(&AvailabilityRange {
            start_date: "2025-03-01".to_string(),
            end_date: "2025-03-31".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(availability.len(), 1);
    let day = availability.get(date(2025, 3, 4)).expect("2025-03-04 present");
    assert_eq!(day.get(TimeSlot::Morning), 1);
    assert_eq!(day.get(TimeSlot::Afternoon), 0);
    assert_eq!(day.get(TimeSlot::Evening), 1);
    assert!(availability.get(date(2025, 3, 5)).is_none());
    assert!(availability.get(date(2025, 3, 6)).is_none());
}

#[tokio::test]
async fn test_availability_rejects_reversed_range() {
    let (_temp_dir, desk) = create_test_desk().await;

    assert!(matches!(
        desk.get_availability(&AvailabilityRange {
            start_date: "2025-03-31".to_string(),
            end_date: "2025-03-01".to_string(),
        })
        .await,
        Err(ServiceError::InvalidRange { .. })
    ));
}

#[tokio::test]
async fn test_availability_calendar_flags() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    for slot in ["morning", "afternoon", "evening"] {
        desk.create_booking(&booking_for(&fixture, "maintenance", "2025-03-02", slot))
            .await
            .unwrap();
    }

    let calendar = desk
        .availability_calendar(&AvailabilityRange {
            start_date: "2025-02-28".to_string(),
            end_date: "2025-03-03".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(calendar.len(), 4);
    assert!(calendar.0[0].past);
    assert!(!calendar.0[2].available);
    let bookable: Vec<_> = calendar.bookable_days().map(|day| day.date).collect();
    assert_eq!(bookable, vec![date(2025, 3, 1), date(2025, 3, 3)]);
}

#[tokio::test]
async fn test_list_bookings_filters() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let first = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-03-10", "morning"))
        .await
        .unwrap();
    desk.create_booking(&booking_for(&fixture, "maintenance", "2025-03-20", "morning"))
        .await
        .unwrap();
    desk.update_booking_status(&status(first.id, "confirmed"))
        .await
        .unwrap();

    let confirmed = desk
        .list_bookings(&ListBookings {
            status: Some("confirmed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, first.id);

    let in_window = desk
        .list_bookings(&ListBookings {
            start_date: Some("2025-03-15".to_string()),
            end_date: Some("2025-03-31".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(in_window.len(), 1);

    let maintenance = desk
        .list_bookings(&ListBookings {
            customer_id: Some(fixture.customer.id),
            service_type: Some("Maintenance".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(maintenance.len(), 1);

    assert!(matches!(
        desk.list_bookings(&ListBookings {
            status: Some("done".to_string()),
            ..Default::default()
        })
        .await,
        Err(ServiceError::InvalidStatus { .. })
    ));
}

#[tokio::test]
async fn test_delete_booking_requires_confirmation_and_cascades() {
    let (_temp_dir, desk) = create_test_desk().await;
    let fixture = seed(&desk).await;
    let booking = desk
        .create_booking(&booking_for(&fixture, "repair", "2025-03-12", "morning"))
        .await
        .unwrap();
    desk.assign_technician(&AssignTechnician {
        booking_id: booking.id,
        technician_id: fixture.technician.id,
        ..Default::default()
    })
    .await
    .unwrap();
    desk.update_booking_status(&status(booking.id, "completed"))
        .await
        .unwrap();

    assert!(matches!(
        desk.delete_booking(&DeleteBooking {
            id: booking.id,
            confirmed: false,
        })
        .await,
        Err(ServiceError::InvalidInput { .. })
    ));

    let deleted = desk
        .delete_booking(&DeleteBooking {
            id: booking.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.map(|b| b.id), Some(booking.id));

    assert!(desk
        .get_assignment_by_booking(&Id { id: booking.id })
        .await
        .unwrap()
        .is_none());

    // Service history survives with the booking link cleared
    let records = desk
        .list_service_records(&ListServiceRecords {
            aircon_unit_id: Some(fixture.unit.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].booking_id, None);
}
