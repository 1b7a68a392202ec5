//! Tree inspection
//!
//! Directory listings with recursive size totals and direct child counts.
//! Nothing is cached; every call reads the filesystem again.
//!
//! Traversal follows symlinks. A symlink cycle is reported as an IO failure
//! by the walker rather than guarded against up front.

use chrono::{DateTime, Utc};
use log::debug;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

use crate::error::AccessError;
use crate::storage::results::DirectoryEntry;
use crate::storage::validation::{join_relative, normalize_relative, resolve};

/// Sum of the sizes of every file beneath `dir_path`.
///
/// An empty directory, or one holding only directories, has size 0.
pub fn calculate_directory_size(dir_path: &Path) -> Result<u64, AccessError> {
    let mut total = 0u64;

    for entry in WalkDir::new(dir_path).min_depth(1).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }

    Ok(total)
}

/// Number of direct children of `dir_path`.
pub fn count_items(dir_path: &Path) -> Result<usize, AccessError> {
    let entries = fs::read_dir(dir_path)
        .map_err(|e| AccessError::from_io(e, &dir_path.display().to_string()))?;
    Ok(entries.count())
}

/// Lists one level of `relative_path` under `base_path`.
///
/// Directories come first, then files; each group is ordered by
/// modification time, newest first.
pub fn list_directory(
    base_path: &Path,
    relative_path: &str,
    static_base_url: &str,
) -> Result<Vec<DirectoryEntry>, AccessError> {
    let parent = normalize_relative(relative_path)?;
    let full_path = resolve(base_path, &parent)?;

    let not_found = || AccessError::NotFound(format!("Directory not found: {}", parent));
    let target = fs::metadata(&full_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => not_found(),
        _ => AccessError::Io(e),
    })?;
    if !target.is_dir() {
        return Err(not_found());
    }

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(&full_path)? {
        let dir_entry = dir_entry?;
        let name = dir_entry.file_name().to_string_lossy().to_string();
        let item_path = dir_entry.path();

        // Dangling symlinks fall back to the link's own metadata
        let metadata = match fs::metadata(&item_path) {
            Ok(metadata) => metadata,
            Err(_) => dir_entry.metadata()?,
        };

        let relative = join_relative(&parent, &name);
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(UNIX_EPOCH));

        let entry = if metadata.is_dir() {
            DirectoryEntry {
                name,
                relative_path: relative,
                is_directory: true,
                size: calculate_directory_size(&item_path)?,
                modified,
                item_count: Some(count_items(&item_path)?),
                download_ref: None,
            }
        } else {
            DirectoryEntry {
                name,
                download_ref: Some(download_ref(static_base_url, &relative)),
                relative_path: relative,
                is_directory: false,
                size: metadata.len(),
                modified,
                item_count: None,
            }
        };
        entries.push(entry);
    }

    sort_entries(&mut entries);

    debug!(
        "Listed directory {:?} (real: {}) - {} entries",
        parent,
        full_path.display(),
        entries.len()
    );

    Ok(entries)
}

fn download_ref(static_base_url: &str, relative: &str) -> String {
    format!("{}/{}", static_base_url.trim_end_matches('/'), relative)
}

fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b.modified.cmp(&a.modified),
    });
}
