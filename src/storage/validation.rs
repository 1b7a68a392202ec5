//! Path validation
//!
//! Resolves caller-supplied relative paths beneath a fixed base directory.
//! Any parent-traversal segment is rejected before the path is joined, so
//! `a/../b` fails even though it would normalize to a path inside the root.

use crate::error::AccessError;
use log::warn;
use std::path::{Component, Path, PathBuf};

/// Splits a relative path into its normal segments.
///
/// Both `/` and `\` act as separators; empty and `.` segments are dropped.
/// Fails on `..`, on drive prefixes, and on NUL bytes.
pub fn normalize_segments(relative_path: &str) -> Result<Vec<&str>, AccessError> {
    if relative_path.contains('\0') {
        warn!("Rejected path containing NUL byte");
        return Err(AccessError::InvalidPath(relative_path.replace('\0', "")));
    }

    let mut segments = Vec::new();
    for segment in relative_path.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => {
                warn!("Rejected parent traversal in path: {}", relative_path);
                return Err(AccessError::InvalidPath(relative_path.to_string()));
            }
            _ => {}
        }

        // A lone segment must stay a plain file name on every platform
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => segments.push(segment),
            _ => {
                warn!("Rejected path segment {:?} in {}", segment, relative_path);
                return Err(AccessError::InvalidPath(relative_path.to_string()));
            }
        }
    }

    Ok(segments)
}

/// Forward-slash form of a relative path, as reported back to callers.
pub fn normalize_relative(relative_path: &str) -> Result<String, AccessError> {
    Ok(normalize_segments(relative_path)?.join("/"))
}

/// Joins `relative_path` onto `base_path`.
///
/// The result always starts with `base_path`. An empty relative path
/// resolves to the base directory itself.
pub fn resolve(base_path: &Path, relative_path: &str) -> Result<PathBuf, AccessError> {
    let segments = normalize_segments(relative_path)?;

    let mut resolved = base_path.to_path_buf();
    for segment in segments {
        resolved.push(segment);
    }

    Ok(resolved)
}

/// Joins a child name onto an already-normalized relative path.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
