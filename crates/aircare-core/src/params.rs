//! Parameter structures for service desk operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde and the optional JSON schema.
//! Values arrive in their wire form: dates as `YYYY-MM-DD` strings, statuses
//! and slots as strings, money as decimal strings. Each structure validates
//! itself into the typed request the desk works with, so malformed input is
//! rejected before anything touches the store.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::str::FromStr;

use jiff::civil::Date;
use rust_decimal::Decimal;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ServiceError},
    models::{
        AssignmentFilter, AssignmentStatus, BookingFilter, BookingStatus, NewBooking,
        NewServiceRecord, ServiceRecordStatus, ServiceType, TimeSlot, UpdateAssignmentRequest,
        UpdateBookingRequest,
    },
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for registering a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateCustomer {
    /// Full name of the customer (required)
    pub name: String,
    pub email: Option<String>,
    /// Contact phone number (required)
    pub phone: String,
    pub address: Option<String>,
}

impl CreateCustomer {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)
    }
}

/// Parameters for registering an aircon unit to a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateAirconUnit {
    /// Owner of the unit
    pub customer_id: u64,
    pub brand: String,
    pub model: String,
    pub serial_number: Option<String>,
    /// Installation date (YYYY-MM-DD)
    pub installation_date: Option<String>,
    /// Location on the premises
    pub location: Option<String>,
}

impl CreateAirconUnit {
    /// Returns the parsed installation date.
    pub fn validate(&self) -> Result<Option<Date>> {
        require_text("brand", &self.brand)?;
        require_text("model", &self.model)?;
        parse_optional_date("installation_date", self.installation_date.as_deref())
    }
}

/// Parameters for listing aircon units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListAirconUnits {
    /// Only units owned by this customer
    pub customer_id: Option<u64>,
}

/// Parameters for registering a technician.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTechnician {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Area of expertise, e.g. "inverter systems"
    pub specialization: Option<String>,
}

impl CreateTechnician {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)
    }
}

/// Parameters for listing technicians.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTechnicians {
    /// Hide technicians that are no longer active
    #[serde(default)]
    pub active_only: bool,
}

/// Parameters for marking a technician active or inactive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTechnicianActive {
    pub id: u64,
    pub active: bool,
}

/// Parameters for booking a service visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateBooking {
    /// Customer requesting the visit
    pub customer_id: u64,
    /// Unit on file to be serviced; must belong to the customer
    pub aircon_unit_id: Option<u64>,
    /// One of 'maintenance', 'repair', 'installation', 'inspection'
    pub service_type: String,
    /// Requested date (YYYY-MM-DD), today or later
    pub preferred_date: String,
    /// One of 'morning', 'afternoon', 'evening'
    pub preferred_time: String,
    pub service_address: String,
    pub postal_code: Option<String>,
    pub contact_phone: String,
    /// Brand of the unit when none is on file
    pub aircon_brand: Option<String>,
    /// Model of the unit when none is on file
    pub aircon_model: Option<String>,
    /// What the customer reports is wrong
    pub issue_description: Option<String>,
}

impl CreateBooking {
    /// Validate the request against the calendar date `today`.
    ///
    /// # Errors
    ///
    /// * `ServiceError::InvalidInput` - unknown service type or slot, malformed
    ///   or past date, empty address or phone
    pub fn validate(&self, today: Date) -> Result<NewBooking> {
        let service_type = ServiceType::from(self.service_type.as_str());
        if !service_type.is_known() {
            let known: Vec<&str> = ServiceType::KNOWN.iter().map(ServiceType::as_str).collect();
            return Err(ServiceError::invalid_input("service_type").with_reason(format!(
                "Unknown service type '{}'. Must be one of: {}",
                self.service_type,
                known.join(", ")
            )));
        }

        let preferred_date = parse_date("preferred_date", &self.preferred_date)?;
        if preferred_date < today {
            return Err(ServiceError::invalid_input("preferred_date").with_reason(format!(
                "Preferred date {preferred_date} is in the past (today is {today})"
            )));
        }

        let preferred_time = parse_slot("preferred_time", &self.preferred_time)?;
        require_text("service_address", &self.service_address)?;
        require_text("contact_phone", &self.contact_phone)?;

        Ok(NewBooking {
            customer_id: self.customer_id,
            aircon_unit_id: self.aircon_unit_id,
            service_type,
            preferred_date,
            preferred_time,
            service_address: self.service_address.trim().to_string(),
            postal_code: self.postal_code.clone(),
            contact_phone: self.contact_phone.trim().to_string(),
            aircon_brand: self.aircon_brand.clone(),
            aircon_model: self.aircon_model.clone(),
            issue_description: self.issue_description.clone(),
        })
    }
}

/// Parameters for listing bookings. All filters are optional and combine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListBookings {
    pub customer_id: Option<u64>,
    pub technician_id: Option<u64>,
    /// Booking status to match
    pub status: Option<String>,
    /// Service type to match
    pub service_type: Option<String>,
    /// Earliest preferred date (YYYY-MM-DD), inclusive
    pub start_date: Option<String>,
    /// Latest preferred date (YYYY-MM-DD), inclusive
    pub end_date: Option<String>,
}

impl TryFrom<&ListBookings> for BookingFilter {
    type Error = ServiceError;

    fn try_from(params: &ListBookings) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(parse_booking_status)
            .transpose()?;
        let start_date = parse_optional_date("start_date", params.start_date.as_deref())?;
        let end_date = parse_optional_date("end_date", params.end_date.as_deref())?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            ensure_range(start, end)?;
        }

        Ok(BookingFilter {
            customer_id: params.customer_id,
            technician_id: params.technician_id,
            status,
            service_type: params.service_type.as_deref().map(ServiceType::from),
            start_date,
            end_date,
        })
    }
}

/// Parameters for editing a booking's fields. Status changes go through
/// [`UpdateBookingStatus`] instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateBooking {
    /// Booking ID to update (required)
    pub id: u64,
    pub aircon_unit_id: Option<u64>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub service_address: Option<String>,
    pub postal_code: Option<String>,
    pub contact_phone: Option<String>,
    pub aircon_brand: Option<String>,
    pub aircon_model: Option<String>,
    pub issue_description: Option<String>,
    pub technician_id: Option<u64>,
}

impl UpdateBooking {
    pub fn validate(&self) -> Result<UpdateBookingRequest> {
        if let Some(address) = &self.service_address {
            require_text("service_address", address)?;
        }
        if let Some(phone) = &self.contact_phone {
            require_text("contact_phone", phone)?;
        }

        Ok(UpdateBookingRequest {
            aircon_unit_id: self.aircon_unit_id,
            preferred_date: parse_optional_date("preferred_date", self.preferred_date.as_deref())?,
            preferred_time: self
                .preferred_time
                .as_deref()
                .map(|slot| parse_slot("preferred_time", slot))
                .transpose()?,
            service_address: self.service_address.clone(),
            postal_code: self.postal_code.clone(),
            contact_phone: self.contact_phone.clone(),
            aircon_brand: self.aircon_brand.clone(),
            aircon_model: self.aircon_model.clone(),
            issue_description: self.issue_description.clone(),
            technician_id: self.technician_id,
        })
    }
}

/// Parameters for moving a booking to a new status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateBookingStatus {
    pub id: u64,
    /// One of 'pending', 'confirmed', 'assigned', 'in_progress', 'completed',
    /// 'cancelled'
    pub status: String,
}

/// Parameters for permanently deleting a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteBooking {
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for assigning a technician to a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AssignTechnician {
    pub booking_id: u64,
    pub technician_id: u64,
    /// Planned visit date (YYYY-MM-DD)
    pub scheduled_date: Option<String>,
    /// Planned visit time, free form (e.g. "09:30")
    pub scheduled_time: Option<String>,
    pub notes: Option<String>,
}

impl AssignTechnician {
    /// Returns the parsed scheduled date.
    pub fn validate(&self) -> Result<Option<Date>> {
        parse_optional_date("scheduled_date", self.scheduled_date.as_deref())
    }
}

/// Parameters for listing assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListAssignments {
    pub technician_id: Option<u64>,
    /// Assignment status to match
    pub status: Option<String>,
    /// Scheduled date to match (YYYY-MM-DD)
    pub date: Option<String>,
}

impl TryFrom<&ListAssignments> for AssignmentFilter {
    type Error = ServiceError;

    fn try_from(params: &ListAssignments) -> Result<Self> {
        Ok(AssignmentFilter {
            technician_id: params.technician_id,
            status: params
                .status
                .as_deref()
                .map(parse_assignment_status)
                .transpose()?,
            scheduled_date: parse_optional_date("date", params.date.as_deref())?,
        })
    }
}

/// Parameters for editing an assignment's scheduling and billing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateAssignment {
    pub id: u64,
    pub technician_id: Option<u64>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub completion_date: Option<String>,
    /// Amount charged, as a decimal string (e.g. "120.50")
    pub actual_cost: Option<String>,
    pub notes: Option<String>,
}

impl UpdateAssignment {
    pub fn validate(&self) -> Result<UpdateAssignmentRequest> {
        Ok(UpdateAssignmentRequest {
            technician_id: self.technician_id,
            scheduled_date: parse_optional_date("scheduled_date", self.scheduled_date.as_deref())?,
            scheduled_time: self.scheduled_time.clone(),
            completion_date: parse_optional_date(
                "completion_date",
                self.completion_date.as_deref(),
            )?,
            actual_cost: self
                .actual_cost
                .as_deref()
                .map(|cost| parse_cost("actual_cost", cost))
                .transpose()?,
            notes: self.notes.clone(),
        })
    }
}

/// Parameters for moving an assignment to a new status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateAssignmentStatus {
    pub id: u64,
    /// One of 'assigned', 'in_progress', 'completed', 'cancelled'
    pub status: String,
}

/// Parameters for recording a service by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateServiceRecord {
    pub aircon_unit_id: u64,
    /// Booking the service was performed for, if any
    pub booking_id: Option<u64>,
    /// Date of the service (YYYY-MM-DD)
    pub service_date: String,
    pub description: String,
    pub technician_id: Option<u64>,
    /// Date the next service is due (YYYY-MM-DD)
    pub next_due_date: Option<String>,
    /// One of 'Scheduled', 'Pending', 'In Progress', 'Completed'; defaults
    /// to 'Scheduled'
    pub status: Option<String>,
    /// Cost as a decimal string; defaults to 0.00
    pub cost: Option<String>,
}

impl CreateServiceRecord {
    pub fn validate(&self) -> Result<NewServiceRecord> {
        require_text("description", &self.description)?;

        let status = match self.status.as_deref() {
            Some(raw) => {
                ServiceRecordStatus::from_str(raw).map_err(|_| ServiceError::InvalidStatus {
                    kind: "service record",
                    value: raw.to_string(),
                })?
            }
            None => ServiceRecordStatus::default(),
        };

        let cost = match self.cost.as_deref() {
            Some(raw) => parse_cost("cost", raw)?,
            None => Decimal::new(0, 2),
        };

        Ok(NewServiceRecord {
            aircon_unit_id: self.aircon_unit_id,
            booking_id: self.booking_id,
            service_date: parse_date("service_date", &self.service_date)?,
            description: self.description.trim().to_string(),
            technician_id: self.technician_id,
            next_due_date: parse_optional_date("next_due_date", self.next_due_date.as_deref())?,
            status,
            cost,
        })
    }
}

/// Parameters for listing service records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListServiceRecords {
    pub aircon_unit_id: Option<u64>,
    pub booking_id: Option<u64>,
}

/// Inclusive date window for slot availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AvailabilityRange {
    /// First date of the window (YYYY-MM-DD)
    pub start_date: String,
    /// Last date of the window (YYYY-MM-DD), not before start_date
    pub end_date: String,
}

impl AvailabilityRange {
    /// Returns the parsed `(start, end)` pair.
    ///
    /// # Errors
    ///
    /// * `ServiceError::InvalidInput` - either date is malformed
    /// * `ServiceError::InvalidRange` - end precedes start
    ///
    /// ```rust
    /// use aircare_core::{params::AvailabilityRange, ServiceError};
    ///
    /// let range = AvailabilityRange {
    ///     start_date: "2025-03-31".to_string(),
    ///     end_date: "2025-03-01".to_string(),
    /// };
    /// assert!(matches!(range.validate(), Err(ServiceError::InvalidRange { .. })));
    /// ```
    pub fn validate(&self) -> Result<(Date, Date)> {
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        ensure_range(start, end)?;
        Ok((start, end))
    }
}

/// Parse a booking status, reporting `InvalidStatus` for unknown values.
pub fn parse_booking_status(value: &str) -> Result<BookingStatus> {
    BookingStatus::from_str(value).map_err(|_| ServiceError::InvalidStatus {
        kind: "booking",
        value: value.to_string(),
    })
}

/// Parse an assignment status, reporting `InvalidStatus` for unknown values.
pub fn parse_assignment_status(value: &str) -> Result<AssignmentStatus> {
    AssignmentStatus::from_str(value).map_err(|_| ServiceError::InvalidStatus {
        kind: "assignment",
        value: value.to_string(),
    })
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        ServiceError::invalid_input(field).with_reason(format!(
            "Expected a YYYY-MM-DD date, got '{value}': {e}"
        ))
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value.map(|raw| parse_date(field, raw)).transpose()
}

fn parse_slot(field: &str, value: &str) -> Result<TimeSlot> {
    TimeSlot::from_str(value).map_err(|_| {
        ServiceError::invalid_input(field).with_reason(format!(
            "Unknown time slot '{value}'. Must be 'morning', 'afternoon', or 'evening'"
        ))
    })
}

fn parse_cost(field: &str, value: &str) -> Result<Decimal> {
    let cost = Decimal::from_str(value.trim()).map_err(|e| {
        ServiceError::invalid_input(field).with_reason(format!("Invalid amount '{value}': {e}"))
    })?;
    if cost.is_sign_negative() {
        return Err(ServiceError::invalid_input(field).with_reason("Amount cannot be negative"));
    }
    Ok(cost)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid_input(field).with_reason("Value cannot be empty"));
    }
    Ok(())
}

fn ensure_range(start: Date, end: Date) -> Result<()> {
    if end < start {
        return Err(ServiceError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
