//! Status and confirmation message types for operation feedback.

use std::fmt;

/// One-line confirmation or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Message for a lookup that matched nothing.
    pub fn not_found(noun: &str, id: u64) -> Self {
        Self::failure(format!("{noun} with ID {id} not found"))
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Technician deactivated");
        assert_eq!(success.to_string(), "Success: Technician deactivated\n");

        let missing = OperationStatus::not_found("Booking", 12);
        assert_eq!(missing.to_string(), "Error: Booking with ID 12 not found\n");
    }
}
