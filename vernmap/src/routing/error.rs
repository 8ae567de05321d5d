//! Error types for route resolution.

use thiserror::Error;

/// Errors that can occur when resolving a walking route.
///
/// Callers do not need to distinguish the variants — any of them means
/// the route for that facility is simply absent from the result — but
/// the service's reported reason is preserved for logging.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The service answered with a non-success code in the payload.
    #[error("Routing service rejected the request: {code}")]
    Service {
        /// Machine-readable code from the payload (e.g. `NoRoute`).
        code: String,
        /// Optional human-readable explanation from the payload.
        message: Option<String>,
    },

    /// HTTP transport failure (connection, timeout, non-2xx status).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The payload could not be parsed into a route geometry.
    #[error("Failed to parse routing response: {0}")]
    InvalidResponse(String),
}
