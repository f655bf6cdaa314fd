//! Booking operations for the ServiceDesk.

use log::{debug, info};

use super::ServiceDesk;
use crate::{
    display::Bookings,
    error::{Result, ServiceError},
    lifecycle::{RecordOutcome, StatusChange},
    models::{Booking, BookingFilter, BookingStatus},
    params::{
        parse_booking_status, CreateBooking, DeleteBooking, Id, ListBookings, UpdateBooking,
        UpdateBookingStatus,
    },
};

impl ServiceDesk {
    /// Creates a booking in `pending`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - unknown service type or slot, malformed or past date,
    ///   missing required text
    /// * `NotFound` - the customer or referenced unit does not exist
    /// * `ReferentialViolation` - the unit belongs to another customer
    pub async fn create_booking(&self, params: &CreateBooking) -> Result<Booking> {
        let booking = params.validate(self.today())?;
        debug!(
            "Creating {} booking for customer {} on {}",
            booking.service_type, booking.customer_id, booking.preferred_date
        );

        let created = self.with_db(move |db| db.create_booking(&booking)).await?;
        info!("Booking {} created in status pending", created.id);
        Ok(created)
    }

    pub async fn get_booking(&self, params: &Id) -> Result<Option<Booking>> {
        let id = params.id;
        self.with_db(move |db| db.get_booking(id)).await
    }

    /// Lists bookings matching the given filters, newest first.
    pub async fn list_bookings(&self, params: &ListBookings) -> Result<Bookings> {
        let filter = BookingFilter::try_from(params)?;
        debug!("Listing bookings with {filter:?}");
        let bookings = self.with_db(move |db| db.list_bookings(&filter)).await?;
        Ok(Bookings(bookings))
    }

    /// Applies field edits and returns the booking with the list of changes.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the booking does not exist
    /// * `InvalidInput` - nothing to update or a malformed field
    pub async fn update_booking(&self, params: &UpdateBooking) -> Result<(Booking, Vec<String>)> {
        let request = params.validate()?;
        if request.is_empty() {
            return Err(ServiceError::invalid_input("fields")
                .with_reason("No fields to update were provided"));
        }
        let id = params.id;
        let changes = request.changes();
        debug!("Updating booking {id}: {changes:?}");

        let booking = self
            .with_db(move |db| db.update_booking(id, &request))
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking", id))?;
        Ok((booking, changes))
    }

    /// Sets a booking's status.
    ///
    /// Every status is accepted from every other status. Moving to
    /// `completed` writes a service record for the booking if it has none;
    /// the outcome of that write is reported on the result and never undoes
    /// the status change.
    ///
    /// # Errors
    ///
    /// * `InvalidStatus` - the status is not one of the six booking statuses
    /// * `NotFound` - the booking does not exist
    pub async fn update_booking_status(
        &self,
        params: &UpdateBookingStatus,
    ) -> Result<StatusChange<Booking>> {
        let status = parse_booking_status(&params.status)?;
        let id = params.id;
        debug!("Setting booking {id} status to {}", status.as_str());

        let booking = self
            .with_db(move |db| db.update_booking_status(id, status))
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking", id))?;
        info!("Booking {id} is now {}", status.as_str());

        let record = if status == BookingStatus::Completed {
            self.record_completion(booking.clone()).await
        } else {
            RecordOutcome::NotTriggered
        };
        Ok(StatusChange::new(booking, record))
    }

    /// Permanently deletes a booking and its assignment.
    ///
    /// Returns the deleted booking, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `confirmed` is false
    pub async fn delete_booking(&self, params: &DeleteBooking) -> Result<Option<Booking>> {
        if !params.confirmed {
            return Err(ServiceError::invalid_input("confirmed").with_reason(
                "Booking deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_booking(id)).await?;
        if deleted.is_some() {
            info!("Booking {id} deleted");
        }
        Ok(deleted)
    }
}
