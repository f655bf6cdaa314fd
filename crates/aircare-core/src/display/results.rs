//! Result wrapper types for displaying operation outcomes.
//!
//! These wrap a resource returned by a create, update, delete or status
//! operation and print a one-line confirmation above the resource itself.

use std::fmt;

use crate::{
    lifecycle::{RecordOutcome, StatusChange},
    models::{AirconUnit, Booking, BookingAssignment, Customer, ServiceRecord, Technician},
};

/// A resource that confirmation messages can name.
pub trait Described: fmt::Display {
    /// Lowercase noun used in messages, e.g. "booking"
    const NOUN: &'static str;

    fn resource_id(&self) -> u64;
}

impl Described for Booking {
    const NOUN: &'static str = "booking";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Described for BookingAssignment {
    const NOUN: &'static str = "assignment";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Described for ServiceRecord {
    const NOUN: &'static str = "service record";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Described for Customer {
    const NOUN: &'static str = "customer";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Described for AirconUnit {
    const NOUN: &'static str = "aircon unit";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Described for Technician {
    const NOUN: &'static str = "technician";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// ```rust
/// use aircare_core::{display::CreateResult, models::Customer};
/// use jiff::Timestamp;
///
/// let customer = Customer {
///     id: 5,
///     name: "Siti Rahman".to_string(),
///     email: None,
///     phone: "+65 8123 0000".to_string(),
///     address: None,
///     created_at: Timestamp::now(),
/// };
/// let output = CreateResult::new(customer).to_string();
/// assert!(output.starts_with("Created customer with ID: 5"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Described> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} with ID: {}",
            T::NOUN,
            self.resource.resource_id()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Described> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated {} with ID: {}",
            T::NOUN,
            self.resource.resource_id()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Described> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} with ID: {}",
            T::NOUN,
            self.resource.resource_id()
        )
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOutcome::NotTriggered => Ok(()),
            RecordOutcome::Created(record) => {
                writeln!(f, "Service record #{} created.", record.id)?;
                writeln!(f)?;
                write!(f, "{record}")
            }
            RecordOutcome::AlreadyRecorded => {
                writeln!(f, "A service record already exists for this booking.")
            }
            RecordOutcome::Failed { reason } => writeln!(f, "Warning: {reason}"),
        }
    }
}

impl<T: Described> fmt::Display for StatusChange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated {} status (ID: {})",
            T::NOUN,
            self.resource.resource_id()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)?;
        if self.record != RecordOutcome::NotTriggered {
            writeln!(f)?;
            write!(f, "{}", self.record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{BookingStatus, ServiceType, TimeSlot};

    fn booking() -> Booking {
        Booking {
            id: 8,
            customer_id: 1,
            aircon_unit_id: Some(2),
            service_type: ServiceType::Inspection,
            preferred_date: date(2025, 5, 2),
            preferred_time: TimeSlot::Morning,
            service_address: "1 Marina Boulevard".to_string(),
            postal_code: None,
            contact_phone: "+65 6000 1111".to_string(),
            aircon_brand: None,
            aircon_model: None,
            issue_description: None,
            technician_id: None,
            status: BookingStatus::Completed,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            booking(),
            vec!["Updated contact phone".to_string()],
        );
        let output = result.to_string();

        assert!(output.starts_with("Updated booking with ID: 8"));
        assert!(output.contains("Changes made:\n- Updated contact phone"));
    }

    #[test]
    fn test_delete_result() {
        assert_eq!(
            DeleteResult::new(booking()).to_string(),
            "Deleted booking with ID: 8\n"
        );
    }

    #[test]
    fn test_status_change_shows_warning() {
        let change = StatusChange::new(
            booking(),
            RecordOutcome::Failed {
                reason: "Service record was not created: no unit".to_string(),
            },
        );
        let output = change.to_string();

        assert!(output.starts_with("Updated booking status (ID: 8)"));
        assert!(output.contains("Warning: Service record was not created: no unit"));
    }

    #[test]
    fn test_status_change_without_side_effect() {
        let change = StatusChange::new(booking(), RecordOutcome::NotTriggered);
        assert!(!change.to_string().contains("Service record"));
    }
}
