//! Booking CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::utils::{date, id, id_opt, parsed, timestamp};
use crate::{
    availability::SlotRow,
    error::{DatabaseResultExt, Result, ServiceError},
    models::{Booking, BookingFilter, BookingStatus, NewBooking, ServiceType, UpdateBookingRequest},
};

pub(super) const BOOKING_COLUMNS: &str = "id, customer_id, aircon_unit_id, service_type, preferred_date, preferred_time, service_address, postal_code, contact_phone, aircon_brand, aircon_model, issue_description, technician_id, status, created_at, updated_at";
const INSERT_BOOKING_SQL: &str = "INSERT INTO bookings (customer_id, aircon_unit_id, service_type, preferred_date, preferred_time, service_address, postal_code, contact_phone, aircon_brand, aircon_model, issue_description, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const CHECK_CUSTOMER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)";
const SELECT_UNIT_OWNER_SQL: &str = "SELECT customer_id FROM aircon_units WHERE id = ?1";
const CHECK_TECHNICIAN_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM technicians WHERE id = ?1)";
const UPDATE_BOOKING_SQL: &str = "UPDATE bookings SET aircon_unit_id = ?1, preferred_date = ?2, preferred_time = ?3, service_address = ?4, postal_code = ?5, contact_phone = ?6, aircon_brand = ?7, aircon_model = ?8, issue_description = ?9, technician_id = ?10, updated_at = ?11 WHERE id = ?12";
const UPDATE_BOOKING_STATUS_SQL: &str =
    "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_BOOKING_SQL: &str = "DELETE FROM bookings WHERE id = ?1";
const SELECT_SLOT_ROWS_SQL: &str = "SELECT preferred_date, preferred_time, status FROM bookings WHERE preferred_date >= ?1 AND preferred_date <= ?2 ORDER BY preferred_date";

pub(super) fn booking_from_row(row: &Row) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: id(row, 0)?,
        customer_id: id(row, 1)?,
        aircon_unit_id: id_opt(row, 2)?,
        service_type: ServiceType::from(row.get::<_, String>(3)?.as_str()),
        preferred_date: date(row, 4)?,
        preferred_time: parsed(row, 5)?,
        service_address: row.get(6)?,
        postal_code: row.get(7)?,
        contact_phone: row.get(8)?,
        aircon_brand: row.get(9)?,
        aircon_model: row.get(10)?,
        issue_description: row.get(11)?,
        technician_id: id_opt(row, 12)?,
        status: parsed(row, 13)?,
        created_at: timestamp(row, 14)?,
        updated_at: timestamp(row, 15)?,
    })
}

/// Fails unless the unit exists and belongs to the customer.
pub(super) fn check_unit_owner(
    conn: &rusqlite::Connection,
    unit_id: u64,
    customer_id: u64,
) -> Result<()> {
    let owner: Option<i64> = conn
        .query_row(SELECT_UNIT_OWNER_SQL, params![unit_id as i64], |row| row.get(0))
        .optional()
        .db_context("Failed to query aircon unit owner")?;

    match owner {
        None => Err(ServiceError::not_found("Aircon unit", unit_id)),
        Some(owner) if owner as u64 != customer_id => Err(ServiceError::ReferentialViolation {
            reason: format!(
                "Aircon unit {unit_id} belongs to customer {owner}, not customer {customer_id}"
            ),
        }),
        Some(_) => Ok(()),
    }
}

impl super::Database {
    /// Stores a new booking in `pending`.
    ///
    /// The customer must exist and a referenced unit must belong to that
    /// customer.
    pub fn create_booking(&mut self, booking: &NewBooking) -> Result<Booking> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let customer_exists: bool = tx
            .query_row(
                CHECK_CUSTOMER_EXISTS_SQL,
                params![booking.customer_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check customer existence")?;
        if !customer_exists {
            return Err(ServiceError::not_found("Customer", booking.customer_id));
        }

        if let Some(unit_id) = booking.aircon_unit_id {
            check_unit_owner(&tx, unit_id, booking.customer_id)?;
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_BOOKING_SQL,
            params![
                booking.customer_id as i64,
                booking.aircon_unit_id.map(|id| id as i64),
                booking.service_type.as_str(),
                booking.preferred_date.to_string(),
                booking.preferred_time.as_str(),
                &booking.service_address,
                booking.postal_code.as_deref(),
                &booking.contact_phone,
                booking.aircon_brand.as_deref(),
                booking.aircon_model.as_deref(),
                booking.issue_description.as_deref(),
                BookingStatus::Pending.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert booking")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Booking {
            id,
            customer_id: booking.customer_id,
            aircon_unit_id: booking.aircon_unit_id,
            service_type: booking.service_type.clone(),
            preferred_date: booking.preferred_date,
            preferred_time: booking.preferred_time,
            service_address: booking.service_address.clone(),
            postal_code: booking.postal_code.clone(),
            contact_phone: booking.contact_phone.clone(),
            aircon_brand: booking.aircon_brand.clone(),
            aircon_model: booking.aircon_model.clone(),
            issue_description: booking.issue_description.clone(),
            technician_id: None,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_booking(&self, id: u64) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], booking_from_row)
            .optional()
            .db_context("Failed to query booking")
    }

    /// Lists bookings matching the filter, newest first.
    pub fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE 1=1");
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(customer_id) = filter.customer_id {
            sql.push_str(" AND customer_id = ?");
            params_vec.push(Box::new(customer_id as i64));
        }
        if let Some(technician_id) = filter.technician_id {
            sql.push_str(" AND technician_id = ?");
            params_vec.push(Box::new(technician_id as i64));
        }
        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        if let Some(service_type) = &filter.service_type {
            sql.push_str(" AND LOWER(service_type) = ?");
            params_vec.push(Box::new(service_type.as_str().to_lowercase()));
        }
        if let Some(start) = filter.start_date {
            sql.push_str(" AND preferred_date >= ?");
            params_vec.push(Box::new(start.to_string()));
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND preferred_date <= ?");
            params_vec.push(Box::new(end.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let bookings = stmt
            .query_map(&params_refs[..], booking_from_row)
            .db_context("Failed to query bookings")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read booking row")?;
        Ok(bookings)
    }

    pub fn list_bookings_by_customer(&self, customer_id: u64) -> Result<Vec<Booking>> {
        self.list_bookings(&BookingFilter::for_customer(customer_id))
    }

    /// Applies field edits to a booking. Returns `None` if the booking does
    /// not exist.
    pub fn update_booking(
        &mut self,
        id: u64,
        request: &UpdateBookingRequest,
    ) -> Result<Option<Booking>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
        let Some(mut booking) = tx
            .query_row(&sql, params![id as i64], booking_from_row)
            .optional()
            .db_context("Failed to query booking")?
        else {
            return Ok(None);
        };

        if let Some(unit_id) = request.aircon_unit_id {
            check_unit_owner(&tx, unit_id, booking.customer_id)?;
            booking.aircon_unit_id = Some(unit_id);
        }
        if let Some(technician_id) = request.technician_id {
            let exists: bool = tx
                .query_row(
                    CHECK_TECHNICIAN_EXISTS_SQL,
                    params![technician_id as i64],
                    |row| row.get(0),
                )
                .db_context("Failed to check technician existence")?;
            if !exists {
                return Err(ServiceError::not_found("Technician", technician_id));
            }
            booking.technician_id = Some(technician_id);
        }
        if let Some(date) = request.preferred_date {
            booking.preferred_date = date;
        }
        if let Some(slot) = request.preferred_time {
            booking.preferred_time = slot;
        }
        if let Some(address) = &request.service_address {
            booking.service_address = address.clone();
        }
        if let Some(postal_code) = &request.postal_code {
            booking.postal_code = Some(postal_code.clone());
        }
        if let Some(phone) = &request.contact_phone {
            booking.contact_phone = phone.clone();
        }
        if let Some(brand) = &request.aircon_brand {
            booking.aircon_brand = Some(brand.clone());
        }
        if let Some(model) = &request.aircon_model {
            booking.aircon_model = Some(model.clone());
        }
        if let Some(issue) = &request.issue_description {
            booking.issue_description = Some(issue.clone());
        }
        booking.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_BOOKING_SQL,
            params![
                booking.aircon_unit_id.map(|id| id as i64),
                booking.preferred_date.to_string(),
                booking.preferred_time.as_str(),
                &booking.service_address,
                booking.postal_code.as_deref(),
                &booking.contact_phone,
                booking.aircon_brand.as_deref(),
                booking.aircon_model.as_deref(),
                booking.issue_description.as_deref(),
                booking.technician_id.map(|id| id as i64),
                booking.updated_at.to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update booking")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(booking))
    }

    /// Overwrites the status of a booking, whatever it was before.
    ///
    /// Returns the updated booking, or `None` if it does not exist.
    pub fn update_booking_status(
        &mut self,
        id: u64,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let rows = self
            .connection
            .execute(
                UPDATE_BOOKING_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update booking status")?;
        if rows == 0 {
            return Ok(None);
        }
        self.get_booking(id)
    }

    /// Deletes a booking and, through the foreign key cascade, its
    /// assignment. Service records keep their history with the booking link
    /// cleared.
    pub fn delete_booking(&mut self, id: u64) -> Result<Option<Booking>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
        let Some(booking) = tx
            .query_row(&sql, params![id as i64], booking_from_row)
            .optional()
            .db_context("Failed to query booking")?
        else {
            return Ok(None);
        };

        tx.execute(DELETE_BOOKING_SQL, params![id as i64])
            .db_context("Failed to delete booking")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(booking))
    }

    /// Raw date, slot and status columns for bookings whose preferred date
    /// lies in `[start, end]`, cancelled ones included.
    pub fn slot_rows(&self, start: Date, end: Date) -> Result<Vec<SlotRow>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SLOT_ROWS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![start.to_string(), end.to_string()], |row| {
                Ok(SlotRow {
                    preferred_date: row.get(0)?,
                    preferred_time: row.get(1)?,
                    status: row.get(2)?,
                })
            })
            .db_context("Failed to query booking slots")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read booking slot row")?;
        Ok(rows)
    }
}
