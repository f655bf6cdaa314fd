//! Reference entities the booking lifecycle consumes but does not own.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: Timestamp,
}

/// An air conditioning unit installed at a customer's premises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirconUnit {
    pub id: u64,
    /// Owner of the unit
    pub customer_id: u64,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub installation_date: Option<Date>,
    /// Where on the premises the unit sits, e.g. "Master bedroom"
    pub location: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Technician {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub specialization: Option<String>,
    /// Inactive technicians stay on file but are not offered for new work
    pub active: bool,
    pub created_at: Timestamp,
}
