//! Database operations and SQLite management for the service desk.
//!
//! This module is the record store: it owns the SQLite connection, the schema,
//! and one query module per aggregate. Referential checks (customer exists,
//! unit belongs to customer, technician exists) happen here, inside the same
//! transaction as the write they guard.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod assignment_queries;
pub mod booking_queries;
pub mod migrations;
pub mod record_queries;
pub mod reference_queries;
pub mod utils;

/// How long a connection waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens a connection that waits up to `busy_timeout` for locks held by
    /// other connections.
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(busy_timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
