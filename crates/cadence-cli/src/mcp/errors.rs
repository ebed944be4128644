//! Error handling utilities for MCP server

use std::fmt::Display;

use rmcp::ErrorData;

/// Helper to convert internal failures to MCP errors
pub fn to_mcp_error(message: &str, error: impl Display) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}
