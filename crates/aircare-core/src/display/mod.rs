//! Display formatting and result wrapper types.
//!
//! Domain models implement `Display` directly ([`models`]); collections and
//! operation results go through newtype wrappers so every interface prints the
//! same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │   Collections   │    │    Markdown     │
//! │ (Booking, ...)  │───▶│ & Result Types  │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use aircare_core::display::OperationStatus;
//!
//! println!("{}", OperationStatus::success("Booking confirmed"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{
    AirconUnits, Assignments, Bookings, Calendar, Customers, ServiceRecords, Technicians,
};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, Described, UpdateResult};
pub use status::OperationStatus;
