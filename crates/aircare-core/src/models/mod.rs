//! Data models for bookings, assignments, service records and the reference
//! entities around them.
//!
//! Display implementations live in [`crate::display::models`] so the data
//! structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use aircare_core::models::{Booking, BookingStatus, ServiceType, TimeSlot};
//! use jiff::{civil::date, Timestamp};
//!
//! let booking = Booking {
//!     id: 42,
//!     customer_id: 7,
//!     aircon_unit_id: Some(3),
//!     service_type: ServiceType::Maintenance,
//!     preferred_date: date(2025, 6, 15),
//!     preferred_time: TimeSlot::Morning,
//!     service_address: "12 Orchard Road".to_string(),
//!     // ... other fields
//! #   postal_code: None,
//! #   contact_phone: "+65 9123 4567".to_string(),
//! #   aircon_brand: None,
//! #   aircon_model: None,
//! #   issue_description: None,
//! #   technician_id: None,
//! #   status: BookingStatus::Pending,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! println!("{}", booking); // Markdown with status icon and slot
//! ```

pub mod assignment;
pub mod booking;
pub mod filters;
pub mod record;
pub mod reference;
pub mod requests;
pub mod schedule;
pub mod status;

#[cfg(test)]
mod tests;

pub use assignment::BookingAssignment;
pub use booking::{Booking, NewBooking};
pub use filters::{AssignmentFilter, BookingFilter};
pub use record::{NewServiceRecord, ServiceRecord};
pub use reference::{AirconUnit, Customer, Technician};
pub use requests::{UpdateAssignmentRequest, UpdateBookingRequest};
pub use schedule::{ServiceType, TimeSlot};
pub use status::{AssignmentStatus, BookingStatus, ServiceRecordStatus};
