//! Technician assignment operations.
//!
//! Creating or completing an assignment also writes to its booking; both
//! writes share one transaction.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::{
    booking_queries::{booking_from_row, BOOKING_COLUMNS},
    utils::{date_opt, decimal_opt, id, is_unique_violation, parsed, timestamp},
};
use crate::{
    error::{DatabaseResultExt, Result, ServiceError},
    models::{
        AssignmentFilter, AssignmentStatus, Booking, BookingAssignment, BookingStatus,
        UpdateAssignmentRequest,
    },
};

const ASSIGNMENT_COLUMNS: &str = "id, booking_id, technician_id, scheduled_date, scheduled_time, completion_date, actual_cost, notes, status, assigned_date";
const CHECK_BOOKING_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM bookings WHERE id = ?1)";
const CHECK_TECHNICIAN_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM technicians WHERE id = ?1)";
const CHECK_ASSIGNMENT_FOR_BOOKING_SQL: &str =
    "SELECT id FROM booking_assignments WHERE booking_id = ?1";
const INSERT_ASSIGNMENT_SQL: &str = "INSERT INTO booking_assignments (booking_id, technician_id, scheduled_date, scheduled_time, notes, status, assigned_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const ASSIGN_BOOKING_SQL: &str =
    "UPDATE bookings SET status = ?1, technician_id = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_BOOKING_TECHNICIAN_SQL: &str =
    "UPDATE bookings SET technician_id = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_BOOKING_STATUS_SQL: &str =
    "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_ASSIGNMENT_SQL: &str = "UPDATE booking_assignments SET technician_id = ?1, scheduled_date = ?2, scheduled_time = ?3, completion_date = ?4, actual_cost = ?5, notes = ?6 WHERE id = ?7";
const UPDATE_ASSIGNMENT_STATUS_SQL: &str =
    "UPDATE booking_assignments SET status = ?1, completion_date = ?2 WHERE id = ?3";
const DELETE_ASSIGNMENT_SQL: &str = "DELETE FROM booking_assignments WHERE id = ?1";

fn assignment_from_row(row: &Row) -> rusqlite::Result<BookingAssignment> {
    Ok(BookingAssignment {
        id: id(row, 0)?,
        booking_id: id(row, 1)?,
        technician_id: id(row, 2)?,
        scheduled_date: date_opt(row, 3)?,
        scheduled_time: row.get(4)?,
        completion_date: date_opt(row, 5)?,
        actual_cost: decimal_opt(row, 6)?,
        notes: row.get(7)?,
        status: parsed(row, 8)?,
        assigned_date: timestamp(row, 9)?,
    })
}

fn select_assignment(conn: &rusqlite::Connection, id: u64) -> Result<Option<BookingAssignment>> {
    let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM booking_assignments WHERE id = ?1");
    conn.query_row(&sql, params![id as i64], assignment_from_row)
        .optional()
        .db_context("Failed to query assignment")
}

fn ensure_technician(conn: &rusqlite::Connection, technician_id: u64) -> Result<()> {
    let exists: bool = conn
        .query_row(CHECK_TECHNICIAN_EXISTS_SQL, params![technician_id as i64], |row| row.get(0))
        .db_context("Failed to check technician existence")?;
    if !exists {
        return Err(ServiceError::not_found("Technician", technician_id));
    }
    Ok(())
}

fn conflict_for(booking_id: u64) -> ServiceError {
    ServiceError::Conflict {
        reason: format!("Booking {booking_id} already has a technician assigned"),
    }
}

impl super::Database {
    /// Assigns a technician to a booking and moves the booking to
    /// `assigned`.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the booking or technician does not exist
    /// * `Conflict` - the booking already has an assignment
    pub fn create_assignment(
        &mut self,
        booking_id: u64,
        technician_id: u64,
        scheduled_date: Option<Date>,
        scheduled_time: Option<&str>,
        notes: Option<&str>,
    ) -> Result<BookingAssignment> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let booking_exists: bool = tx
            .query_row(CHECK_BOOKING_EXISTS_SQL, params![booking_id as i64], |row| row.get(0))
            .db_context("Failed to check booking existence")?;
        if !booking_exists {
            return Err(ServiceError::not_found("Booking", booking_id));
        }
        ensure_technician(&tx, technician_id)?;

        let existing: Option<i64> = tx
            .query_row(
                CHECK_ASSIGNMENT_FOR_BOOKING_SQL,
                params![booking_id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to check existing assignment")?;
        if existing.is_some() {
            return Err(conflict_for(booking_id));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_ASSIGNMENT_SQL,
            params![
                booking_id as i64,
                technician_id as i64,
                scheduled_date.map(|d| d.to_string()),
                scheduled_time,
                notes,
                AssignmentStatus::Assigned.as_str(),
                &now_str
            ],
        )
        .map_err(|e| {
            // A concurrent writer can slip in between the check and the insert
            if is_unique_violation(&e) {
                conflict_for(booking_id)
            } else {
                ServiceError::database("Failed to insert assignment").with_source(e)
            }
        })?;
        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            ASSIGN_BOOKING_SQL,
            params![
                BookingStatus::Assigned.as_str(),
                technician_id as i64,
                &now_str,
                booking_id as i64
            ],
        )
        .db_context("Failed to mark booking as assigned")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(BookingAssignment {
            id,
            booking_id,
            technician_id,
            scheduled_date,
            scheduled_time: scheduled_time.map(String::from),
            completion_date: None,
            actual_cost: None,
            notes: notes.map(String::from),
            status: AssignmentStatus::Assigned,
            assigned_date: now,
        })
    }

    pub fn get_assignment(&self, id: u64) -> Result<Option<BookingAssignment>> {
        select_assignment(&self.connection, id)
    }

    pub fn get_assignment_by_booking(&self, booking_id: u64) -> Result<Option<BookingAssignment>> {
        let sql =
            format!("SELECT {ASSIGNMENT_COLUMNS} FROM booking_assignments WHERE booking_id = ?1");
        self.connection
            .query_row(&sql, params![booking_id as i64], assignment_from_row)
            .optional()
            .db_context("Failed to query assignment")
    }

    pub fn list_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<BookingAssignment>> {
        let mut sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM booking_assignments WHERE 1=1");
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(technician_id) = filter.technician_id {
            sql.push_str(" AND technician_id = ?");
            params_vec.push(Box::new(technician_id as i64));
        }
        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        if let Some(date) = filter.scheduled_date {
            sql.push_str(" AND scheduled_date = ?");
            params_vec.push(Box::new(date.to_string()));
        }
        sql.push_str(" ORDER BY scheduled_date IS NULL, scheduled_date, id");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let assignments = stmt
            .query_map(&params_refs[..], assignment_from_row)
            .db_context("Failed to query assignments")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read assignment row")?;
        Ok(assignments)
    }

    pub fn list_assignments_by_technician(
        &self,
        technician_id: u64,
    ) -> Result<Vec<BookingAssignment>> {
        self.list_assignments(&AssignmentFilter {
            technician_id: Some(technician_id),
            ..Default::default()
        })
    }

    /// Applies scheduling and billing edits. Reassigning the technician also
    /// updates the booking's technician. Returns `None` if the assignment
    /// does not exist.
    pub fn update_assignment(
        &mut self,
        id: u64,
        request: &UpdateAssignmentRequest,
    ) -> Result<Option<BookingAssignment>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut assignment) = select_assignment(&tx, id)? else {
            return Ok(None);
        };

        if let Some(technician_id) = request.technician_id {
            ensure_technician(&tx, technician_id)?;
            assignment.technician_id = technician_id;
            tx.execute(
                UPDATE_BOOKING_TECHNICIAN_SQL,
                params![
                    technician_id as i64,
                    Timestamp::now().to_string(),
                    assignment.booking_id as i64
                ],
            )
            .db_context("Failed to update booking technician")?;
        }
        if let Some(date) = request.scheduled_date {
            assignment.scheduled_date = Some(date);
        }
        if let Some(time) = &request.scheduled_time {
            assignment.scheduled_time = Some(time.clone());
        }
        if let Some(date) = request.completion_date {
            assignment.completion_date = Some(date);
        }
        if let Some(cost) = request.actual_cost {
            assignment.actual_cost = Some(cost);
        }
        if let Some(notes) = &request.notes {
            assignment.notes = Some(notes.clone());
        }

        tx.execute(
            UPDATE_ASSIGNMENT_SQL,
            params![
                assignment.technician_id as i64,
                assignment.scheduled_date.map(|d| d.to_string()),
                assignment.scheduled_time.as_deref(),
                assignment.completion_date.map(|d| d.to_string()),
                assignment.actual_cost.map(|c| c.to_string()),
                assignment.notes.as_deref(),
                id as i64
            ],
        )
        .db_context("Failed to update assignment")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(assignment))
    }

    /// Sets an assignment's status.
    ///
    /// `completed` also completes the booking and stamps the completion date
    /// with `today` when none was recorded. The completed booking is returned
    /// alongside the assignment in that case.
    pub fn update_assignment_status(
        &mut self,
        id: u64,
        status: AssignmentStatus,
        today: Date,
    ) -> Result<Option<(BookingAssignment, Option<Booking>)>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut assignment) = select_assignment(&tx, id)? else {
            return Ok(None);
        };

        assignment.status = status;
        if status == AssignmentStatus::Completed && assignment.completion_date.is_none() {
            assignment.completion_date = Some(today);
        }
        tx.execute(
            UPDATE_ASSIGNMENT_STATUS_SQL,
            params![
                status.as_str(),
                assignment.completion_date.map(|d| d.to_string()),
                id as i64
            ],
        )
        .db_context("Failed to update assignment status")?;

        let booking = if status == AssignmentStatus::Completed {
            tx.execute(
                UPDATE_BOOKING_STATUS_SQL,
                params![
                    BookingStatus::Completed.as_str(),
                    Timestamp::now().to_string(),
                    assignment.booking_id as i64
                ],
            )
            .db_context("Failed to complete booking")?;

            let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
            tx.query_row(&sql, params![assignment.booking_id as i64], booking_from_row)
                .optional()
                .db_context("Failed to query booking")?
        } else {
            None
        };

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some((assignment, booking)))
    }

    /// Removes an assignment. The booking keeps its status and technician.
    pub fn delete_assignment(&mut self, id: u64) -> Result<Option<BookingAssignment>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(assignment) = select_assignment(&tx, id)? else {
            return Ok(None);
        };
        tx.execute(DELETE_ASSIGNMENT_SQL, params![id as i64])
            .db_context("Failed to delete assignment")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(assignment))
    }
}
