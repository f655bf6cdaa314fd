//! Assignment operations for the ServiceDesk.

use log::{debug, info};

use super::ServiceDesk;
use crate::{
    display::Assignments,
    error::{Result, ServiceError},
    lifecycle::{RecordOutcome, StatusChange},
    models::{AssignmentFilter, BookingAssignment},
    params::{
        parse_assignment_status, AssignTechnician, Id, ListAssignments, UpdateAssignment,
        UpdateAssignmentStatus,
    },
};

impl ServiceDesk {
    /// Assigns a technician to a booking and moves the booking to
    /// `assigned`.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the booking or technician does not exist
    /// * `Conflict` - the booking already has an assignment
    /// * `InvalidInput` - malformed scheduled date
    pub async fn assign_technician(&self, params: &AssignTechnician) -> Result<BookingAssignment> {
        let scheduled_date = params.validate()?;
        let booking_id = params.booking_id;
        let technician_id = params.technician_id;
        let scheduled_time = params.scheduled_time.clone();
        let notes = params.notes.clone();
        debug!("Assigning technician {technician_id} to booking {booking_id}");

        let assignment = self
            .with_db(move |db| {
                db.create_assignment(
                    booking_id,
                    technician_id,
                    scheduled_date,
                    scheduled_time.as_deref(),
                    notes.as_deref(),
                )
            })
            .await?;
        info!(
            "Technician {technician_id} assigned to booking {booking_id}; booking is now assigned"
        );
        Ok(assignment)
    }

    pub async fn get_assignment(&self, params: &Id) -> Result<Option<BookingAssignment>> {
        let id = params.id;
        self.with_db(move |db| db.get_assignment(id)).await
    }

    /// The assignment of a booking, if it has one.
    pub async fn get_assignment_by_booking(
        &self,
        params: &Id,
    ) -> Result<Option<BookingAssignment>> {
        let booking_id = params.id;
        self.with_db(move |db| db.get_assignment_by_booking(booking_id))
            .await
    }

    pub async fn list_assignments(&self, params: &ListAssignments) -> Result<Assignments> {
        let filter = AssignmentFilter::try_from(params)?;
        let assignments = self.with_db(move |db| db.list_assignments(&filter)).await?;
        Ok(Assignments(assignments))
    }

    /// Applies scheduling and billing edits and returns the assignment with
    /// the list of changes.
    pub async fn update_assignment(
        &self,
        params: &UpdateAssignment,
    ) -> Result<(BookingAssignment, Vec<String>)> {
        let request = params.validate()?;
        if request.is_empty() {
            return Err(ServiceError::invalid_input("fields")
                .with_reason("No fields to update were provided"));
        }
        let id = params.id;
        let changes = request.changes();
        debug!("Updating assignment {id}: {changes:?}");

        let assignment = self
            .with_db(move |db| db.update_assignment(id, &request))
            .await?
            .ok_or_else(|| ServiceError::not_found("Assignment", id))?;
        Ok((assignment, changes))
    }

    /// Sets an assignment's status.
    ///
    /// `completed` completes the booking as well and writes its service
    /// record under the same rule as [`ServiceDesk::update_booking_status`].
    ///
    /// # Errors
    ///
    /// * `InvalidStatus` - the status is not one of the four assignment
    ///   statuses
    /// * `NotFound` - the assignment does not exist
    pub async fn update_assignment_status(
        &self,
        params: &UpdateAssignmentStatus,
    ) -> Result<StatusChange<BookingAssignment>> {
        let status = parse_assignment_status(&params.status)?;
        let id = params.id;
        let today = self.today();
        debug!("Setting assignment {id} status to {}", status.as_str());

        let (assignment, completed_booking) = self
            .with_db(move |db| db.update_assignment_status(id, status, today))
            .await?
            .ok_or_else(|| ServiceError::not_found("Assignment", id))?;
        info!("Assignment {id} is now {}", status.as_str());

        let record = match completed_booking {
            Some(booking) => {
                info!("Booking {} completed through assignment {id}", booking.id);
                self.record_completion(booking).await
            }
            None => RecordOutcome::NotTriggered,
        };
        Ok(StatusChange::new(assignment, record))
    }

    /// Removes an assignment. Returns it, or `None` if it did not exist.
    pub async fn delete_assignment(&self, params: &Id) -> Result<Option<BookingAssignment>> {
        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_assignment(id)).await?;
        if deleted.is_some() {
            info!("Assignment {id} deleted");
        }
        Ok(deleted)
    }
}
