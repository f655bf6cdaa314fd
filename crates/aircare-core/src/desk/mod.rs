//! High-level service desk API for bookings, assignments and service records.
//!
//! [`ServiceDesk`] is the entry point every interface goes through. It owns no
//! connection: each operation opens the database on a blocking worker, runs
//! its queries there and drops the connection on return.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Params      │    │   ServiceDesk   │    │    Database     │
//! │  (validated)    │───▶│ (*_ops modules) │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │   completion    │
//!                        │ (record on done)│
//!                        └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`ServiceDesk`] instances
//! - [`booking_ops`]: Booking CRUD and the status setter
//! - [`assignment_ops`]: Technician assignment and its status setter
//! - [`record_ops`]: Service record history
//! - [`reference_ops`]: Customers, aircon units and technicians
//! - [`availability_ops`]: Slot counts and the booking calendar
//!
//! # Usage
//!
//! ```rust
//! use aircare_core::{
//!     params::{CreateBooking, CreateCustomer, UpdateBookingStatus},
//!     ServiceDeskBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = ServiceDeskBuilder::new()
//!     .with_database_path(Some("/tmp/aircare-example.db"))
//!     .with_today(date(2025, 6, 1))
//!     .build()
//!     .await?;
//!
//! let customer = desk
//!     .create_customer(&CreateCustomer {
//!         name: "Tan Wei Ming".to_string(),
//!         phone: "+65 9123 4567".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let booking = desk
//!     .create_booking(&CreateBooking {
//!         customer_id: customer.id,
//!         service_type: "maintenance".to_string(),
//!         preferred_date: "2025-06-15".to_string(),
//!         preferred_time: "morning".to_string(),
//!         service_address: "12 Orchard Road".to_string(),
//!         contact_phone: "+65 9123 4567".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let change = desk
//!     .update_booking_status(&UpdateBookingStatus {
//!         id: booking.id,
//!         status: "confirmed".to_string(),
//!     })
//!     .await?;
//! assert!(change.warning().is_none());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, time::Duration};

use jiff::{civil::Date, Zoned};
use tokio::task;

use crate::{
    db::Database,
    error::{JoinResultExt, Result},
};

pub mod assignment_ops;
pub mod availability_ops;
pub mod booking_ops;
pub mod builder;
mod completion;
pub mod record_ops;
pub mod reference_ops;


pub use builder::ServiceDeskBuilder;

/// Main service desk interface.
#[derive(Debug, Clone)]
pub struct ServiceDesk {
    pub(crate) db_path: PathBuf,
    pub(crate) busy_timeout: Duration,
    pub(crate) today: Option<Date>,
}

impl ServiceDesk {
    pub(crate) fn new(db_path: PathBuf, busy_timeout: Duration, today: Option<Date>) -> Self {
        Self {
            db_path,
            busy_timeout,
            today,
        }
    }

    /// Path of the database file this desk operates on.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// The date past-date and calendar checks compare against: the pinned
    /// date when one was configured, otherwise the local system date.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Runs `op` against a fresh connection on a blocking worker.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::open(&db_path, busy_timeout)?;
            op(&mut db)
        })
        .await
        .join_context()?
    }
}
