//! Storage operations
//!
//! Handles deletion of files and directory trees beneath the base directory.

use log::{error, info};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::AccessError;
use crate::storage::results::{DeleteFailure, DeleteOutcome};
use crate::storage::validation::{normalize_relative, resolve};

/// Deletes a file, or a directory together with everything below it.
///
/// Fails with `NotFound` when nothing exists at `relative_path`. The base
/// directory itself cannot be deleted.
pub fn delete_path(base_path: &Path, relative_path: &str) -> Result<(), AccessError> {
    let relative = normalize_relative(relative_path)?;
    if relative.is_empty() {
        return Err(AccessError::InvalidPath("Refusing to delete the base directory".into()));
    }

    let full_path = resolve(base_path, &relative)?;

    let metadata = fs::symlink_metadata(&full_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            AccessError::NotFound(format!("File or directory not found: {}", relative))
        }
        _ => AccessError::Io(e),
    })?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(&full_path)
    } else {
        fs::remove_file(&full_path)
    };

    match result {
        Ok(()) => {
            info!(
                "Deleted {} {} (real: {})",
                if metadata.is_dir() { "directory" } else { "file" },
                relative,
                full_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!(
                "Failed to delete {} (real: {}): {}",
                relative,
                full_path.display(),
                e
            );
            Err(AccessError::from_io(e, &relative))
        }
    }
}

/// Deletes each path independently and reports what succeeded.
pub fn delete_paths<S: AsRef<str>>(base_path: &Path, paths: &[S]) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();

    for path in paths {
        let path = path.as_ref();
        match delete_path(base_path, path) {
            Ok(()) => outcome.deleted.push(path.to_string()),
            Err(e) => outcome.failed.push(DeleteFailure {
                path: path.to_string(),
                error: e.to_string(),
            }),
        }
    }

    outcome
}
