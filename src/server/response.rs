//! Response helpers shared by the route handlers

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::io;

use crate::error::handlers::{error_to_status_code, handle_error};
use crate::error::{AccessError, ErrorKind};

/// Turns an access error into a JSON error response.
///
/// Server-side failures are logged and reported without their details.
pub fn error_response(err: AccessError) -> Response {
    handle_error(&err);
    let status = error_to_status_code(&err);
    let message = match err.kind() {
        ErrorKind::IoFailure => "Internal server error".to_string(),
        _ => err.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
}

/// A JSON `{"error": ...}` response with an explicit status
pub fn message_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Runs blocking filesystem work off the async executor.
pub async fn run_blocking<T, F>(work: F) -> Result<T, AccessError>
where
    F: FnOnce() -> Result<T, AccessError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => Err(AccessError::Io(io::Error::other(format!(
            "worker task failed: {}",
            e
        )))),
    }
}

/// Query flags count as set unless empty, `0` or `false`.
pub fn flag_set(value: &Option<String>) -> bool {
    match value.as_deref() {
        None => false,
        Some(v) => !matches!(v.trim(), "" | "0" | "false"),
    }
}
