//! Error handlers
//!
//! Maps access errors to HTTP status codes and logs server-side failures.

use crate::error::types::{AccessError, ErrorKind};
use axum::http::StatusCode;
use log::{error, warn};

/// Log an access error at a level matching its severity
pub fn handle_error(err: &AccessError) {
    match err.kind() {
        ErrorKind::IoFailure => error!("File access error: {}", err),
        _ => warn!("Request rejected: {}", err),
    }
}

/// Convert error to HTTP status code
pub fn error_to_status_code(err: &AccessError) -> StatusCode {
    match err.kind() {
        ErrorKind::InvalidPath => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::UnsupportedContentType => StatusCode::BAD_REQUEST,
        ErrorKind::IoFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
