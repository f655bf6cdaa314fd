//! Service record history.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row, ToSql, Transaction, TransactionBehavior};

use super::utils::{date, date_opt, decimal, id, id_opt, parsed, timestamp};
use crate::{
    error::{DatabaseResultExt, Result, ServiceError},
    models::{NewServiceRecord, ServiceRecord},
};

const RECORD_COLUMNS: &str = "id, aircon_unit_id, booking_id, service_date, description, technician_id, next_due_date, status, cost, created_at";
const INSERT_RECORD_SQL: &str = "INSERT INTO service_records (aircon_unit_id, booking_id, service_date, description, technician_id, next_due_date, status, cost, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const CHECK_UNIT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM aircon_units WHERE id = ?1)";
const CHECK_TECHNICIAN_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM technicians WHERE id = ?1)";
const CHECK_BOOKING_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM bookings WHERE id = ?1)";
const CHECK_RECORD_FOR_BOOKING_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM service_records WHERE booking_id = ?1)";

fn record_from_row(row: &Row) -> rusqlite::Result<ServiceRecord> {
    Ok(ServiceRecord {
        id: id(row, 0)?,
        aircon_unit_id: id(row, 1)?,
        booking_id: id_opt(row, 2)?,
        service_date: date(row, 3)?,
        description: row.get(4)?,
        technician_id: id_opt(row, 5)?,
        next_due_date: date_opt(row, 6)?,
        status: parsed(row, 7)?,
        cost: decimal(row, 8)?,
        created_at: timestamp(row, 9)?,
    })
}

/// Fails unless the unit, technician and booking the record points at exist.
fn check_record_references(tx: &Transaction, record: &NewServiceRecord) -> Result<()> {
    let checks = [
        (CHECK_UNIT_EXISTS_SQL, "Aircon unit", Some(record.aircon_unit_id)),
        (CHECK_TECHNICIAN_EXISTS_SQL, "Technician", record.technician_id),
        (CHECK_BOOKING_EXISTS_SQL, "Booking", record.booking_id),
    ];
    for (sql, entity, id) in checks {
        let Some(id) = id else { continue };
        let exists: bool = tx
            .query_row(sql, params![id as i64], |row| row.get(0))
            .db_context("Failed to check service record references")?;
        if !exists {
            return Err(ServiceError::not_found(entity, id));
        }
    }
    Ok(())
}

fn insert_record(tx: &Transaction, record: &NewServiceRecord) -> Result<ServiceRecord> {
    check_record_references(tx, record)?;

    let now = Timestamp::now();
    tx.execute(
        INSERT_RECORD_SQL,
        params![
            record.aircon_unit_id as i64,
            record.booking_id.map(|id| id as i64),
            record.service_date.to_string(),
            &record.description,
            record.technician_id.map(|id| id as i64),
            record.next_due_date.map(|d| d.to_string()),
            record.status.as_str(),
            record.cost.to_string(),
            now.to_string()
        ],
    )
    .db_context("Failed to insert service record")?;

    Ok(ServiceRecord {
        id: tx.last_insert_rowid() as u64,
        aircon_unit_id: record.aircon_unit_id,
        booking_id: record.booking_id,
        service_date: record.service_date,
        description: record.description.clone(),
        technician_id: record.technician_id,
        next_due_date: record.next_due_date,
        status: record.status,
        cost: record.cost,
        created_at: now,
    })
}

impl super::Database {
    /// Writes a service record after checking that its unit, technician and
    /// booking exist.
    pub fn create_service_record(&mut self, record: &NewServiceRecord) -> Result<ServiceRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let created = insert_record(&tx, record)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(created)
    }

    /// Writes the record built by `build` unless the booking already has
    /// one. Returns `None` when a record exists.
    ///
    /// The check and the insert hold the write lock together, so concurrent
    /// callers for the same booking produce a single record.
    pub fn create_service_record_once<F>(
        &mut self,
        booking_id: u64,
        build: F,
    ) -> Result<Option<ServiceRecord>>
    where
        F: FnOnce() -> Result<NewServiceRecord>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_RECORD_FOR_BOOKING_SQL, params![booking_id as i64], |row| row.get(0))
            .db_context("Failed to check service record for booking")?;
        if exists {
            return Ok(None);
        }

        let created = insert_record(&tx, &build()?)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(created))
    }

    pub fn get_service_record(&self, id: u64) -> Result<Option<ServiceRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM service_records WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], record_from_row)
            .optional()
            .db_context("Failed to query service record")
    }

    /// Lists records, most recent service first.
    pub fn list_service_records(
        &self,
        aircon_unit_id: Option<u64>,
        booking_id: Option<u64>,
    ) -> Result<Vec<ServiceRecord>> {
        let mut sql = format!("SELECT {RECORD_COLUMNS} FROM service_records WHERE 1=1");
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(unit_id) = aircon_unit_id {
            sql.push_str(" AND aircon_unit_id = ?");
            params_vec.push(Box::new(unit_id as i64));
        }
        if let Some(booking_id) = booking_id {
            sql.push_str(" AND booking_id = ?");
            params_vec.push(Box::new(booking_id as i64));
        }
        sql.push_str(" ORDER BY service_date DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let records = stmt
            .query_map(&params_refs[..], record_from_row)
            .db_context("Failed to query service records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read service record row")?;
        Ok(records)
    }

    pub fn has_service_record_for_booking(&self, booking_id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_RECORD_FOR_BOOKING_SQL, params![booking_id as i64], |row| row.get(0))
            .db_context("Failed to check service record for booking")
    }
}
