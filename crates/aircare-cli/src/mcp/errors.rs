//! Error handling utilities for MCP server

use aircare_core::ServiceError;
use rmcp::ErrorData;
use serde_json::json;

/// Convert a desk error into a protocol error, tagged with its kind.
///
/// Caller mistakes come back as invalid parameters so the model can correct
/// the call; anything else is an internal error.
pub fn to_mcp_error(message: &str, error: &ServiceError) -> ErrorData {
    let text = format!("{message}: {error}");
    let data = Some(json!({ "kind": error.kind() }));
    if error.is_client_error() {
        ErrorData::invalid_params(text, data)
    } else {
        ErrorData::internal_error(text, data)
    }
}

pub fn not_found(noun: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(
        format!("{noun} with ID {id} not found"),
        Some(json!({ "kind": "not_found" })),
    )
}
