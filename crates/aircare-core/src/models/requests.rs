//! Request types for partially updating models.

use jiff::civil::Date;
use rust_decimal::Decimal;

use super::TimeSlot;

/// Field edits for a booking. `None` leaves the stored value untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateBookingRequest {
    pub aircon_unit_id: Option<u64>,
    pub preferred_date: Option<Date>,
    pub preferred_time: Option<TimeSlot>,
    pub service_address: Option<String>,
    pub postal_code: Option<String>,
    pub contact_phone: Option<String>,
    pub aircon_brand: Option<String>,
    pub aircon_model: Option<String>,
    pub issue_description: Option<String>,
    pub technician_id: Option<u64>,
}

impl UpdateBookingRequest {
    /// Human-readable list of the fields this request touches.
    ///
    /// ```rust
    /// use aircare_core::models::{TimeSlot, UpdateBookingRequest};
    ///
    /// let request = UpdateBookingRequest {
    ///     preferred_time: Some(TimeSlot::Evening),
    ///     contact_phone: Some("+65 8000 0000".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     request.changes(),
    ///     vec!["Changed preferred time to evening", "Updated contact phone"]
    /// );
    /// ```
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(unit) = self.aircon_unit_id {
            changes.push(format!("Linked aircon unit {unit}"));
        }
        if let Some(date) = self.preferred_date {
            changes.push(format!("Changed preferred date to {date}"));
        }
        if let Some(slot) = self.preferred_time {
            changes.push(format!("Changed preferred time to {slot}"));
        }
        if self.service_address.is_some() {
            changes.push("Updated service address".to_string());
        }
        if self.postal_code.is_some() {
            changes.push("Updated postal code".to_string());
        }
        if self.contact_phone.is_some() {
            changes.push("Updated contact phone".to_string());
        }
        if self.aircon_brand.is_some() || self.aircon_model.is_some() {
            changes.push("Updated aircon details".to_string());
        }
        if self.issue_description.is_some() {
            changes.push("Updated issue description".to_string());
        }
        if let Some(technician) = self.technician_id {
            changes.push(format!("Set technician to {technician}"));
        }
        changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

/// Scheduling and billing edits for an assignment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateAssignmentRequest {
    pub technician_id: Option<u64>,
    pub scheduled_date: Option<Date>,
    pub scheduled_time: Option<String>,
    pub completion_date: Option<Date>,
    pub actual_cost: Option<Decimal>,
    pub notes: Option<String>,
}

impl UpdateAssignmentRequest {
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(technician) = self.technician_id {
            changes.push(format!("Reassigned to technician {technician}"));
        }
        if let Some(date) = self.scheduled_date {
            changes.push(format!("Scheduled for {date}"));
        }
        if let Some(time) = &self.scheduled_time {
            changes.push(format!("Scheduled time set to {time}"));
        }
        if let Some(date) = self.completion_date {
            changes.push(format!("Completion date set to {date}"));
        }
        if let Some(cost) = self.actual_cost {
            changes.push(format!("Actual cost set to {cost}"));
        }
        if self.notes.is_some() {
            changes.push("Updated notes".to_string());
        }
        changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}
