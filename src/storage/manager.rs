//! File access manager
//!
//! Binds the storage operations to one base directory. The manager holds
//! no mutable state and can be shared freely between request handlers.

use std::path::{Path, PathBuf};

use crate::error::AccessError;
use crate::storage::results::{DeleteOutcome, DirectoryEntry, FileStream};
use crate::storage::{archive, inspect, operations, stream, validation};

#[derive(Debug, Clone)]
pub struct FileAccessManager {
    base_directory: PathBuf,
    static_base_url: String,
    preview_extensions: Vec<String>,
}

impl FileAccessManager {
    pub fn new(
        base_directory: impl Into<PathBuf>,
        static_base_url: impl Into<String>,
        preview_extensions: Vec<String>,
    ) -> Self {
        Self {
            base_directory: base_directory.into(),
            static_base_url: static_base_url.into(),
            preview_extensions,
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf, AccessError> {
        validation::resolve(&self.base_directory, relative_path)
    }

    pub fn list_directory(&self, relative_path: &str) -> Result<Vec<DirectoryEntry>, AccessError> {
        inspect::list_directory(&self.base_directory, relative_path, &self.static_base_url)
    }

    pub fn calculate_directory_size(&self, relative_path: &str) -> Result<u64, AccessError> {
        inspect::calculate_directory_size(&self.resolve(relative_path)?)
    }

    pub fn count_items(&self, relative_path: &str) -> Result<usize, AccessError> {
        inspect::count_items(&self.resolve(relative_path)?)
    }

    pub fn open_read_stream(&self, relative_path: &str) -> Result<FileStream, AccessError> {
        stream::open_read_stream(&self.base_directory, relative_path)
    }

    pub fn create_archive(&self, relative_path: &str) -> Result<Vec<u8>, AccessError> {
        archive::create_archive(&self.base_directory, relative_path)
    }

    pub fn read_text_content(&self, relative_path: &str) -> Result<String, AccessError> {
        stream::read_text_content(&self.base_directory, relative_path, &self.preview_extensions)
    }

    pub fn delete_folder_or_file(&self, relative_path: &str) -> Result<(), AccessError> {
        operations::delete_path(&self.base_directory, relative_path)
    }

    pub fn delete_paths<S: AsRef<str>>(&self, paths: &[S]) -> DeleteOutcome {
        operations::delete_paths(&self.base_directory, paths)
    }
}
