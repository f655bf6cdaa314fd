//! Booking completion rules.
//!
//! A booking reaching `completed`, directly or through its assignment, gets
//! one service record synthesised from its own fields. Producing that record
//! is best effort: the status change has already been committed when the
//! record is attempted, and a failure is reported next to the result rather
//! than instead of it.

use jiff::{civil::Date, ToSpan};
use rust_decimal::Decimal;

use crate::{
    error::{Result, ServiceError},
    models::{Booking, NewServiceRecord, ServiceRecord, ServiceRecordStatus, ServiceType},
};

/// Date the next service falls due after servicing on `from`.
///
/// Adds calendar months, clamping to the last day of the target month when
/// the day does not exist there.
///
/// ```rust
/// use aircare_core::{lifecycle::next_due_date, models::ServiceType};
/// use jiff::civil::date;
///
/// assert_eq!(
///     next_due_date(&ServiceType::Maintenance, date(2025, 6, 15)).unwrap(),
///     date(2025, 9, 15)
/// );
/// assert_eq!(
///     next_due_date(&ServiceType::Installation, date(2025, 1, 31)).unwrap(),
///     date(2025, 2, 28)
/// );
/// ```
pub fn next_due_date(service_type: &ServiceType, from: Date) -> Result<Date> {
    let months = service_type.follow_up_months();
    from.checked_add(months.months()).map_err(|e| {
        ServiceError::invalid_input("next_due_date")
            .with_reason(format!("Cannot add {months} months to {from}: {e}"))
    })
}

/// Description written on an auto-generated record.
pub fn completion_description(booking: &Booking) -> String {
    format!(
        "{} service completed for booking #{}",
        booking.service_type, booking.id
    )
}

/// Build the record a completed booking leaves behind.
///
/// # Errors
///
/// * `ServiceError::ReferentialViolation` - the booking has no aircon unit on
///   file, so there is nothing to attach the record to
pub fn completion_record(booking: &Booking) -> Result<NewServiceRecord> {
    let aircon_unit_id = booking
        .aircon_unit_id
        .ok_or_else(|| ServiceError::ReferentialViolation {
            reason: format!(
                "Booking #{} has no aircon unit on file; service records need a unit",
                booking.id
            ),
        })?;

    Ok(NewServiceRecord {
        aircon_unit_id,
        booking_id: Some(booking.id),
        service_date: booking.preferred_date,
        description: completion_description(booking),
        technician_id: booking.technician_id,
        next_due_date: Some(next_due_date(&booking.service_type, booking.preferred_date)?),
        status: ServiceRecordStatus::Completed,
        cost: Decimal::new(0, 2),
    })
}

/// What happened to the service record side effect of a status change.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The new status does not produce a record
    NotTriggered,
    /// A record was written for this completion
    Created(ServiceRecord),
    /// The booking already had a record; nothing was written
    AlreadyRecorded,
    /// Writing the record failed; the status change still stands
    Failed { reason: String },
}

impl RecordOutcome {
    pub fn created(&self) -> Option<&ServiceRecord> {
        match self {
            RecordOutcome::Created(record) => Some(record),
            _ => None,
        }
    }

    /// Diagnostic for the caller when the side effect could not be applied.
    pub fn warning(&self) -> Option<&str> {
        match self {
            RecordOutcome::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Result of a status change: the updated resource plus the outcome of the
/// completion side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange<T> {
    pub resource: T,
    pub record: RecordOutcome,
}

impl<T> StatusChange<T> {
    pub fn new(resource: T, record: RecordOutcome) -> Self {
        Self { resource, record }
    }

    pub fn warning(&self) -> Option<&str> {
        self.record.warning()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{BookingStatus, TimeSlot};

    fn booking(id: u64, service_type: ServiceType, preferred_date: Date) -> Booking {
        Booking {
            id,
            customer_id: 1,
            aircon_unit_id: Some(9),
            service_type,
            preferred_date,
            preferred_time: TimeSlot::Afternoon,
            service_address: "5 Jalan Besar".to_string(),
            postal_code: None,
            contact_phone: "+65 6000 0000".to_string(),
            aircon_brand: None,
            aircon_model: None,
            issue_description: None,
            technician_id: Some(4),
            status: BookingStatus::Completed,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_next_due_offsets_by_service_type() {
        let from = date(2025, 6, 15);
        assert_eq!(
            next_due_date(&ServiceType::Maintenance, from).unwrap(),
            date(2025, 9, 15)
        );
        assert_eq!(
            next_due_date(&ServiceType::Repair, from).unwrap(),
            date(2025, 12, 15)
        );
        assert_eq!(
            next_due_date(&ServiceType::Installation, from).unwrap(),
            date(2025, 7, 15)
        );
        assert_eq!(
            next_due_date(&ServiceType::Inspection, from).unwrap(),
            date(2025, 12, 15)
        );
        assert_eq!(
            next_due_date(&ServiceType::Other("duct cleaning".into()), from).unwrap(),
            date(2025, 9, 15)
        );
    }

    #[test]
    fn test_next_due_clamps_to_month_end() {
        assert_eq!(
            next_due_date(&ServiceType::Installation, date(2025, 1, 31)).unwrap(),
            date(2025, 2, 28)
        );
        assert_eq!(
            next_due_date(&ServiceType::Installation, date(2024, 1, 31)).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            next_due_date(&ServiceType::Maintenance, date(2025, 11, 30)).unwrap(),
            date(2026, 2, 28)
        );
    }

    #[test]
    fn test_next_due_crosses_year() {
        assert_eq!(
            next_due_date(&ServiceType::Repair, date(2025, 8, 31)).unwrap(),
            date(2026, 2, 28)
        );
    }

    #[test]
    fn test_completion_record_fields() {
        let record = completion_record(&booking(42, ServiceType::Maintenance, date(2025, 6, 15)))
            .expect("record");

        assert_eq!(record.aircon_unit_id, 9);
        assert_eq!(record.booking_id, Some(42));
        assert_eq!(record.service_date, date(2025, 6, 15));
        assert_eq!(record.next_due_date, Some(date(2025, 9, 15)));
        assert_eq!(record.technician_id, Some(4));
        assert_eq!(record.status, ServiceRecordStatus::Completed);
        assert_eq!(record.cost.to_string(), "0.00");
        assert_eq!(
            record.description,
            "maintenance service completed for booking #42"
        );
    }

    #[test]
    fn test_completion_record_requires_unit() {
        let mut without_unit = booking(7, ServiceType::Repair, date(2025, 6, 15));
        without_unit.aircon_unit_id = None;

        assert!(matches!(
            completion_record(&without_unit),
            Err(ServiceError::ReferentialViolation { .. })
        ));
    }

    #[test]
    fn test_record_outcome_warning() {
        let failed = RecordOutcome::Failed {
            reason: "disk full".into(),
        };
        assert_eq!(failed.warning(), Some("disk full"));
        assert!(failed.created().is_none());
        assert_eq!(RecordOutcome::AlreadyRecorded.warning(), None);
        assert_eq!(RecordOutcome::NotTriggered.warning(), None);
    }
}
