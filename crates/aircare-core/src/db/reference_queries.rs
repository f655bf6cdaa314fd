//! Customer, aircon unit and technician records.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Row};

use super::{
    booking_queries::check_unit_owner,
    utils::{date_opt, id, timestamp},
};
use crate::{
    error::{DatabaseResultExt, Result, ServiceError},
    models::{AirconUnit, Customer, Technician},
};

const INSERT_CUSTOMER_SQL: &str =
    "INSERT INTO customers (name, email, phone, address, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_CUSTOMER_SQL: &str =
    "SELECT id, name, email, phone, address, created_at FROM customers WHERE id = ?1";
const SELECT_CUSTOMERS_SQL: &str =
    "SELECT id, name, email, phone, address, created_at FROM customers ORDER BY id";
const CHECK_CUSTOMER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)";

const INSERT_UNIT_SQL: &str = "INSERT INTO aircon_units (customer_id, brand, model, serial_number, installation_date, location, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UNIT_COLUMNS: &str =
    "id, customer_id, brand, model, serial_number, installation_date, location, created_at";
const SELECT_UNIT_OWNER_SQL: &str = "SELECT customer_id FROM aircon_units WHERE id = ?1";
const CHECK_UNIT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM aircon_units WHERE id = ?1)";

const INSERT_TECHNICIAN_SQL: &str = "INSERT INTO technicians (name, phone, email, specialization, active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)";
const TECHNICIAN_COLUMNS: &str = "id, name, phone, email, specialization, active, created_at";
const UPDATE_TECHNICIAN_ACTIVE_SQL: &str = "UPDATE technicians SET active = ?1 WHERE id = ?2";
const CHECK_TECHNICIAN_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM technicians WHERE id = ?1)";

fn customer_from_row(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: id(row, 0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

fn unit_from_row(row: &Row) -> rusqlite::Result<AirconUnit> {
    Ok(AirconUnit {
        id: id(row, 0)?,
        customer_id: id(row, 1)?,
        brand: row.get(2)?,
        model: row.get(3)?,
        serial_number: row.get(4)?,
        installation_date: date_opt(row, 5)?,
        location: row.get(6)?,
        created_at: timestamp(row, 7)?,
    })
}

fn technician_from_row(row: &Row) -> rusqlite::Result<Technician> {
    Ok(Technician {
        id: id(row, 0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        specialization: row.get(4)?,
        active: row.get::<_, i64>(5)? != 0,
        created_at: timestamp(row, 6)?,
    })
}

impl super::Database {
    pub fn create_customer(
        &mut self,
        name: &str,
        email: Option<&str>,
        phone: &str,
        address: Option<&str>,
    ) -> Result<Customer> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_CUSTOMER_SQL,
                params![name, email, phone, address, now.to_string()],
            )
            .db_context("Failed to insert customer")?;

        Ok(Customer {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            email: email.map(String::from),
            phone: phone.to_string(),
            address: address.map(String::from),
            created_at: now,
        })
    }

    pub fn get_customer(&self, id: u64) -> Result<Option<Customer>> {
        self.connection
            .query_row(SELECT_CUSTOMER_SQL, params![id as i64], customer_from_row)
            .optional()
            .db_context("Failed to query customer")
    }

    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CUSTOMERS_SQL)
            .db_context("Failed to prepare query")?;
        let customers = stmt
            .query_map([], customer_from_row)
            .db_context("Failed to query customers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read customer row")?;
        Ok(customers)
    }

    pub fn customer_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_CUSTOMER_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check customer existence")
    }

    /// Registers a unit to an existing customer.
    pub fn create_aircon_unit(
        &mut self,
        customer_id: u64,
        brand: &str,
        model: &str,
        serial_number: Option<&str>,
        installation_date: Option<Date>,
        location: Option<&str>,
    ) -> Result<AirconUnit> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let customer_exists: bool = tx
            .query_row(CHECK_CUSTOMER_EXISTS_SQL, params![customer_id as i64], |row| row.get(0))
            .db_context("Failed to check customer existence")?;
        if !customer_exists {
            return Err(ServiceError::not_found("Customer", customer_id));
        }

        let now = Timestamp::now();
        tx.execute(
            INSERT_UNIT_SQL,
            params![
                customer_id as i64,
                brand,
                model,
                serial_number,
                installation_date.map(|d| d.to_string()),
                location,
                now.to_string()
            ],
        )
        .db_context("Failed to insert aircon unit")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(AirconUnit {
            id,
            customer_id,
            brand: brand.to_string(),
            model: model.to_string(),
            serial_number: serial_number.map(String::from),
            installation_date,
            location: location.map(String::from),
            created_at: now,
        })
    }

    pub fn get_aircon_unit(&self, id: u64) -> Result<Option<AirconUnit>> {
        let sql = format!("SELECT {UNIT_COLUMNS} FROM aircon_units WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], unit_from_row)
            .optional()
            .db_context("Failed to query aircon unit")
    }

    pub fn list_aircon_units(&self, customer_id: Option<u64>) -> Result<Vec<AirconUnit>> {
        let mut sql = format!("SELECT {UNIT_COLUMNS} FROM aircon_units");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(customer_id) = customer_id {
            sql.push_str(" WHERE customer_id = ?");
            params_vec.push(Box::new(customer_id as i64));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();
        let units = stmt
            .query_map(&params_refs[..], unit_from_row)
            .db_context("Failed to query aircon units")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read aircon unit row")?;
        Ok(units)
    }

    pub fn aircon_unit_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_UNIT_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check aircon unit existence")
    }

    /// Customer owning the unit, or `None` when the unit does not exist.
    pub fn aircon_unit_owner(&self, unit_id: u64) -> Result<Option<u64>> {
        self.connection
            .query_row(SELECT_UNIT_OWNER_SQL, params![unit_id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .optional()
            .map(|owner| owner.map(|id| id as u64))
            .db_context("Failed to query aircon unit owner")
    }

    /// Fails unless `unit_id` exists and belongs to `customer_id`.
    pub fn ensure_unit_belongs_to(&self, unit_id: u64, customer_id: u64) -> Result<()> {
        check_unit_owner(&self.connection, unit_id, customer_id)
    }

    pub fn create_technician(
        &mut self,
        name: &str,
        phone: &str,
        email: Option<&str>,
        specialization: Option<&str>,
    ) -> Result<Technician> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_TECHNICIAN_SQL,
                params![name, phone, email, specialization, now.to_string()],
            )
            .db_context("Failed to insert technician")?;

        Ok(Technician {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(String::from),
            specialization: specialization.map(String::from),
            active: true,
            created_at: now,
        })
    }

    pub fn get_technician(&self, id: u64) -> Result<Option<Technician>> {
        let sql = format!("SELECT {TECHNICIAN_COLUMNS} FROM technicians WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], technician_from_row)
            .optional()
            .db_context("Failed to query technician")
    }

    pub fn list_technicians(&self, active_only: bool) -> Result<Vec<Technician>> {
        let sql = if active_only {
            format!("SELECT {TECHNICIAN_COLUMNS} FROM technicians WHERE active = 1 ORDER BY id")
        } else {
            format!("SELECT {TECHNICIAN_COLUMNS} FROM technicians ORDER BY id")
        };
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let technicians = stmt
            .query_map([], technician_from_row)
            .db_context("Failed to query technicians")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read technician row")?;
        Ok(technicians)
    }

    /// Marks a technician active or inactive. Returns the updated technician,
    /// or `None` if it does not exist.
    pub fn set_technician_active(&mut self, id: u64, active: bool) -> Result<Option<Technician>> {
        let rows = self
            .connection
            .execute(
                UPDATE_TECHNICIAN_ACTIVE_SQL,
                params![i64::from(active), id as i64],
            )
            .db_context("Failed to update technician")?;
        if rows == 0 {
            return Ok(None);
        }
        self.get_technician(id)
    }

    pub fn technician_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_TECHNICIAN_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check technician existence")
    }
}
