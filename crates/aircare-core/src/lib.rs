//! Core library for the Aircare field-service desk.
//!
//! Customers book aircon service visits; admins assign technicians; bookings
//! move through `pending → confirmed → assigned → in_progress → completed`
//! (or `cancelled`), and a completed booking leaves a service record on the
//! unit with the date its next service falls due.
//!
//! - [`desk`]: the async [`ServiceDesk`] API every interface goes through
//! - [`db`]: SQLite record store
//! - [`lifecycle`]: completion rules and next-due arithmetic
//! - [`availability`]: slot occupancy for the booking calendar
//! - [`policy`]: which role may do what
//! - [`display`]: markdown rendering of models and results
//!
//! # Quick Start
//!
//! ```rust
//! use aircare_core::{
//!     params::{AvailabilityRange, CreateBooking, CreateCustomer},
//!     ServiceDeskBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = ServiceDeskBuilder::new()
//!     .with_database_path(Some("aircare.db"))
//!     .with_today(date(2025, 3, 1))
//!     .build()
//!     .await?;
//!
//! let customer = desk
//!     .create_customer(&CreateCustomer {
//!         name: "Lim Hui Ling".to_string(),
//!         phone: "+65 9000 1234".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! desk.create_booking(&CreateBooking {
//!     customer_id: customer.id,
//!     service_type: "repair".to_string(),
//!     preferred_date: "2025-03-04".to_string(),
//!     preferred_time: "afternoon".to_string(),
//!     service_address: "88 Tampines Ave".to_string(),
//!     contact_phone: "+65 9000 1234".to_string(),
//!     ..Default::default()
//! })
//! .await?;
//!
//! let availability = desk
//!     .get_availability(&AvailabilityRange {
//!         start_date: "2025-03-01".to_string(),
//!         end_date: "2025-03-31".to_string(),
//!     })
//!     .await?;
//! assert_eq!(availability.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod db;
pub mod desk;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod policy;

// Re-export commonly used types
pub use availability::{Availability, CalendarDay, SlotCounts};
pub use db::Database;
pub use desk::{ServiceDesk, ServiceDeskBuilder};
pub use display::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{Result, ServiceError};
pub use lifecycle::{RecordOutcome, StatusChange};
pub use models::{
    AirconUnit, AssignmentStatus, Booking, BookingAssignment, BookingStatus, Customer,
    ServiceRecord, ServiceRecordStatus, ServiceType, Technician, TimeSlot,
};
pub use policy::{Action, Resource, Role};
