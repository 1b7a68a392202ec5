//! HTTP boundary
//!
//! Maps requests onto the file access manager and prompt store, and maps
//! their errors onto status codes. No filesystem logic lives here.

pub mod core;
pub mod files;
pub mod prompts;
pub mod response;
pub mod routes;
pub mod state;

pub use self::core::Server;
pub use routes::router;
pub use state::AppState;
