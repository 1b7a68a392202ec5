//! Storage result types
//!
//! Defines result structures returned by storage operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// One filesystem node as seen by a directory listing.
///
/// Directories carry `item_count`, files carry `download_ref`; the other
/// one is always `None`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "path")]
    pub relative_path: String,
    pub is_directory: bool,
    /// File length, or the recursive total of all files below a directory
    pub size: u64,
    pub modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub download_ref: Option<String>,
}

/// Result of a batch delete; each path succeeds or fails on its own
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteFailure {
    pub path: String,
    pub error: String,
}

impl DeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Forward-only byte stream over a single file.
///
/// The stream owns the open file handle; dropping it releases the handle.
#[derive(Debug)]
pub struct FileStream {
    pub file_name: String,
    pub len: u64,
    pub path: PathBuf,
    file: File,
}

impl FileStream {
    pub(crate) fn new(file_name: String, len: u64, path: PathBuf, file: File) -> Self {
        Self {
            file_name,
            len,
            path,
            file,
        }
    }

    /// Hands the underlying handle to the caller, e.g. for async piping.
    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
