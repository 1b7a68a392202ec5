//! File system storage management
//!
//! Sandboxed listing, streaming, archiving and deletion beneath a single
//! base directory.

pub mod archive;
pub mod inspect;
pub mod manager;
pub mod operations;
pub mod results;
pub mod stream;
pub mod validation;

pub use archive::{ArchiveEntry, ArchiveJob};
pub use manager::FileAccessManager;
pub use results::{DeleteFailure, DeleteOutcome, DirectoryEntry, FileStream};
pub use validation::resolve;
