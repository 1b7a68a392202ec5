//! Middleware components
//!
//! Request-level concerns shared by every route.

pub mod logging;

pub use logging::log_request;
