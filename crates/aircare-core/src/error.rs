//! Error types for the service desk library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all service desk operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Referenced entity does not exist
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// Status value outside the enumerated set for the given resource
    #[error("Invalid {kind} status: '{value}'")]
    InvalidStatus { kind: &'static str, value: String },
    /// Date range whose end precedes its start
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },
    /// Operation would duplicate a unique relationship
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Foreign key target missing or owned by someone else
    #[error("Referential violation: {reason}")]
    ReferentialViolation { reason: String },
    /// Role is not allowed to perform the action
    #[error("Role '{role}' may not {action} {resource}")]
    PermissionDenied {
        role: String,
        action: String,
        resource: String,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ServiceError {
        ServiceError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ServiceError {
        ServiceError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ServiceError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Short machine-readable name of the error kind.
    ///
    /// Front ends use this to tell callers which class of failure occurred
    /// without matching on the full enum.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::InvalidRange { .. } => "invalid_range",
            Self::Conflict { .. } => "conflict",
            Self::ReferentialViolation { .. } => "referential_violation",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Database { .. } => "database",
            Self::FileSystem { .. } => "file_system",
            Self::XdgDirectory(_) => "xdg_directory",
            Self::Serialization { .. } => "serialization",
            Self::Configuration { .. } => "configuration",
        }
    }

    /// Whether the error was caused by the caller's input rather than the
    /// environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidStatus { .. }
                | Self::InvalidRange { .. }
                | Self::Conflict { .. }
                | Self::ReferentialViolation { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidInput { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ServiceError::database(message).with_source(e))
    }
}

/// Extension trait mapping task join failures from blocking workers.
pub trait JoinResultExt<T> {
    fn join_context(self) -> Result<T>;
}

impl<T> JoinResultExt<T> for std::result::Result<T, tokio::task::JoinError> {
    fn join_context(self) -> Result<T> {
        self.map_err(|e| ServiceError::Configuration {
            message: format!("Task join error: {e}"),
        })
    }
}

/// Result type alias for service desk operations
pub type Result<T> = std::result::Result<T, ServiceError>;
