//! Builder for creating and configuring ServiceDesk instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use jiff::civil::Date;
use log::debug;
use tokio::task;

use super::ServiceDesk;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{JoinResultExt, Result, ServiceError},
};

/// Builder for creating and configuring ServiceDesk instances.
#[derive(Debug, Clone)]
pub struct ServiceDeskBuilder {
    database_path: Option<PathBuf>,
    busy_timeout: Duration,
    today: Option<Date>,
}

impl ServiceDeskBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            today: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/aircare/aircare.db` or `~/.local/share/aircare/aircare.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// How long an operation waits for a locked database before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Pins the date used as "today" instead of reading the system clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Builds the configured service desk.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `ServiceError::Database` if database initialization fails
    pub async fn build(self) -> Result<ServiceDesk> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ServiceError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        debug!("Opening service desk database at {}", db_path.display());
        let db_path_clone = db_path.clone();
        let busy_timeout = self.busy_timeout;
        task::spawn_blocking(move || {
            let _db = Database::open(&db_path_clone, busy_timeout)?;
            Ok::<(), ServiceError>(())
        })
        .await
        .join_context()??;

        Ok(ServiceDesk::new(db_path, self.busy_timeout, self.today))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("aircare")
            .place_data_file("aircare.db")
            .map_err(|e| ServiceError::XdgDirectory(e.to_string()))
    }
}

impl Default for ServiceDeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
