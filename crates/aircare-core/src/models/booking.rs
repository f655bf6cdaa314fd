//! Booking model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{BookingStatus, ServiceType, TimeSlot};

/// A customer's request for a service visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: u64,

    /// Customer who requested the visit
    pub customer_id: u64,

    /// Unit on file to be serviced, if any
    pub aircon_unit_id: Option<u64>,

    pub service_type: ServiceType,

    /// Requested visit date
    pub preferred_date: Date,

    /// Requested slot within the day
    pub preferred_time: TimeSlot,

    pub service_address: String,

    pub postal_code: Option<String>,

    pub contact_phone: String,

    /// Brand of the unit when it is not on file
    pub aircon_brand: Option<String>,

    /// Model of the unit when it is not on file
    pub aircon_model: Option<String>,

    pub issue_description: Option<String>,

    /// Technician handling the visit, once assigned
    pub technician_id: Option<u64>,

    pub status: BookingStatus,

    /// Timestamp when the booking was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the booking was last updated (UTC)
    pub updated_at: Timestamp,
}

/// Validated fields for a booking that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub customer_id: u64,
    pub aircon_unit_id: Option<u64>,
    pub service_type: ServiceType,
    pub preferred_date: Date,
    pub preferred_time: TimeSlot,
    pub service_address: String,
    pub postal_code: Option<String>,
    pub contact_phone: String,
    pub aircon_brand: Option<String>,
    pub aircon_model: Option<String>,
    pub issue_description: Option<String>,
}
