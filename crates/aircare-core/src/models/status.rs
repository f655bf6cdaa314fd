//! Status enumerations for bookings, assignments and service records.
//!
//! Booking and assignment statuses travel as lowercase snake_case
//! (`in_progress`), service record statuses as Title Case (`In Progress`).
//! Both spellings are part of the wire contract.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a customer's booking.
///
/// Any value may be set from any other value; nothing here models which
/// transitions are allowed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Newly requested, awaiting confirmation
    #[default]
    Pending,

    /// Accepted by the business
    Confirmed,

    /// A technician has been assigned
    Assigned,

    /// Work is under way
    InProgress,

    /// Work finished
    Completed,

    /// Withdrawn by customer or admin
    Cancelled,
}

impl BookingStatus {
    /// Every booking status in lifecycle order.
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Assigned,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Assigned => "assigned",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the status ends the lifecycle.
    ///
    /// Informational only: a terminal booking can still be moved back to any
    /// other status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Get status with an icon for display.
    ///
    /// ```rust
    /// use aircare_core::models::BookingStatus;
    ///
    /// assert_eq!(BookingStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(BookingStatus::InProgress.with_icon(), "➤ In Progress");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "○ Pending",
            BookingStatus::Confirmed => "◎ Confirmed",
            BookingStatus::Assigned => "◉ Assigned",
            BookingStatus::InProgress => "➤ In Progress",
            BookingStatus::Completed => "✓ Completed",
            BookingStatus::Cancelled => "✗ Cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid booking status: {s}"))
    }
}

/// Status of a technician's assignment to a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 4] = [
        AssignmentStatus::Assigned,
        AssignmentStatus::InProgress,
        AssignmentStatus::Completed,
        AssignmentStatus::Cancelled,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::InProgress => "in_progress",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn with_icon(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "◉ Assigned",
            AssignmentStatus::InProgress => "➤ In Progress",
            AssignmentStatus::Completed => "✓ Completed",
            AssignmentStatus::Cancelled => "✗ Cancelled",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssignmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid assignment status: {s}"))
    }
}

/// Status of a service record. Serialized in Title Case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ServiceRecordStatus {
    #[default]
    Scheduled,
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ServiceRecordStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRecordStatus::Scheduled => "Scheduled",
            ServiceRecordStatus::Pending => "Pending",
            ServiceRecordStatus::InProgress => "In Progress",
            ServiceRecordStatus::Completed => "Completed",
        }
    }
}

impl FromStr for ServiceRecordStatus {
    type Err = String;

    /// Parses case-insensitively; `in_progress` is accepted alongside
    /// `In Progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(ServiceRecordStatus::Scheduled),
            "pending" => Ok(ServiceRecordStatus::Pending),
            "in progress" | "in_progress" => Ok(ServiceRecordStatus::InProgress),
            "completed" => Ok(ServiceRecordStatus::Completed),
            _ => Err(format!("Invalid service record status: {s}")),
        }
    }
}
