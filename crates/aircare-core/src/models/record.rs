//! Service record model definition.

use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ServiceRecordStatus;

/// Historical record of a service performed on a specific unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub id: u64,

    pub aircon_unit_id: u64,

    /// Booking the record was generated from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<u64>,

    pub service_date: Date,

    pub description: String,

    pub technician_id: Option<u64>,

    /// When the unit should next be serviced
    pub next_due_date: Option<Date>,

    pub status: ServiceRecordStatus,

    pub cost: Decimal,

    /// Timestamp when the record was written (UTC)
    pub created_at: Timestamp,
}

/// Fields for a service record that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRecord {
    pub aircon_unit_id: u64,
    pub booking_id: Option<u64>,
    pub service_date: Date,
    pub description: String,
    pub technician_id: Option<u64>,
    pub next_due_date: Option<Date>,
    pub status: ServiceRecordStatus,
    pub cost: Decimal,
}
