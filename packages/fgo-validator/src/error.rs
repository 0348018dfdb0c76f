//! Error types for the validator service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Service-level error. Validation outcomes are never errors; they come back
/// as 200 with `isValid: false`.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// Chain RPC unusable (client construction, health probe).
    Rpc(String),
    /// Credits subgraph unusable.
    Subgraph(String),
    /// Request body could not be parsed.
    BadRequest(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Rpc(msg) => write!(f, "rpc error: {msg}"),
            Error::Subgraph(msg) => write!(f, "subgraph error: {msg}"),
            Error::BadRequest(msg) => write!(f, "bad request: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Rpc(_) | Error::Subgraph(_) => StatusCode::BAD_GATEWAY,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}
