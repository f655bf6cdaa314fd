//! Booking assignment model definition.

use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssignmentStatus;

/// Link between a booking and the technician performing it.
///
/// A booking has at most one assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingAssignment {
    pub id: u64,

    pub booking_id: u64,

    pub technician_id: u64,

    /// Date the technician plans to visit
    pub scheduled_date: Option<Date>,

    /// Free-form time of the visit, e.g. "09:30"
    pub scheduled_time: Option<String>,

    /// Date the work was finished
    pub completion_date: Option<Date>,

    /// Amount actually charged for the visit
    pub actual_cost: Option<Decimal>,

    pub notes: Option<String>,

    pub status: AssignmentStatus,

    /// Timestamp when the technician was assigned (UTC)
    pub assigned_date: Timestamp,
}
