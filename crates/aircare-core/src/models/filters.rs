//! Filter types for querying bookings and assignments.

use jiff::civil::Date;

use super::{AssignmentStatus, BookingStatus, ServiceType};

/// Filter options for querying bookings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub customer_id: Option<u64>,

    pub technician_id: Option<u64>,

    pub status: Option<BookingStatus>,

    pub service_type: Option<ServiceType>,

    /// Filter by preferred date range (inclusive)
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl BookingFilter {
    /// Filter for one customer's bookings.
    pub fn for_customer(customer_id: u64) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    /// Filter for bookings whose preferred date lies in `[start, end]`.
    ///
    /// ```rust
    /// use aircare_core::models::BookingFilter;
    /// use jiff::civil::date;
    ///
    /// let filter = BookingFilter::between(date(2025, 3, 1), date(2025, 3, 31));
    /// assert_eq!(filter.start_date, Some(date(2025, 3, 1)));
    /// assert!(filter.status.is_none());
    /// ```
    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }
}

/// Filter options for querying assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentFilter {
    pub technician_id: Option<u64>,
    pub status: Option<AssignmentStatus>,
    pub scheduled_date: Option<Date>,
}
