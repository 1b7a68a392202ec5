//! Error types
//!
//! Defines the typed failures surfaced by the file access manager and the
//! prompt store.

use std::fmt;
use std::io;

/// Coarse error classification used by the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidPath,
    NotFound,
    UnsupportedContentType,
    IoFailure,
}

/// File access errors
#[derive(Debug)]
pub enum AccessError {
    InvalidPath(String),
    NotFound(String),
    UnsupportedContentType(String),
    Io(io::Error),
    Serialization(String),
    Archive(String),
}

impl AccessError {
    /// Classify the error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::InvalidPath(_) => ErrorKind::InvalidPath,
            AccessError::NotFound(_) => ErrorKind::NotFound,
            AccessError::UnsupportedContentType(_) => ErrorKind::UnsupportedContentType,
            AccessError::Io(_) | AccessError::Serialization(_) | AccessError::Archive(_) => {
                ErrorKind::IoFailure
            }
        }
    }

    /// Builds an error for a failed filesystem call on `path`, turning a
    /// missing node into `NotFound`.
    pub fn from_io(err: io::Error, path: &str) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            AccessError::NotFound(format!("Not found: {}", path))
        } else {
            AccessError::Io(err)
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            AccessError::NotFound(p) => write!(f, "{}", p),
            AccessError::UnsupportedContentType(p) => {
                write!(f, "Unsupported content type: {}", p)
            }
            AccessError::Io(e) => write!(f, "IO error: {}", e),
            AccessError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AccessError::Archive(e) => write!(f, "Archive error: {}", e),
        }
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AccessError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            AccessError::NotFound(error.to_string())
        } else {
            AccessError::Io(error)
        }
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(error: serde_json::Error) -> Self {
        AccessError::Serialization(error.to_string())
    }
}

impl From<zip::result::ZipError> for AccessError {
    fn from(error: zip::result::ZipError) -> Self {
        match error {
            zip::result::ZipError::Io(e) => AccessError::from(e),
            other => AccessError::Archive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for AccessError {
    fn from(error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if let Some(ancestor) = error.loop_ancestor() {
            return AccessError::Io(io::Error::other(format!(
                "symlink loop at {} (ancestor {})",
                path,
                ancestor.display()
            )));
        }
        match error.into_io_error() {
            Some(e) => AccessError::from_io(e, &path),
            None => AccessError::Io(io::Error::other(format!("walk failed at {}", path))),
        }
    }
}
