//! Prompt entry store
//!
//! A fixed `folder/action/file` hierarchy of small text files. An empty
//! action addresses files directly inside the folder.

use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AccessError;
use crate::prompts::order::{self, ORDER_FILE_NAME};
use crate::prompts::results::{FolderListing, PromptFile};
use crate::storage::operations;
use crate::storage::stream::has_allowed_extension;
use crate::storage::validation::normalize_segments;

const TEMP_PREFIX: &str = ".";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Clone)]
pub struct PromptStore {
    base_directory: PathBuf,
}

impl PromptStore {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Immediate subdirectories of the base directory, sorted by name.
    pub fn list_folders(&self) -> Result<Vec<String>, AccessError> {
        list_names(&self.base_directory, NodeKind::Directory)
    }

    /// Immediate subdirectories of `folder`; empty if the folder is missing.
    pub fn list_actions(&self, folder: &str) -> Result<Vec<String>, AccessError> {
        let folder_path = self.folder_path(folder)?;
        list_names(&folder_path, NodeKind::Directory)
    }

    /// Files directly inside `folder/action`, without the order file.
    pub fn list_entries(&self, folder: &str, action: &str) -> Result<Vec<String>, AccessError> {
        let action_path = self.action_path(folder, action)?;
        let mut names = list_names(&action_path, NodeKind::File)?;
        names.retain(|n| n != ORDER_FILE_NAME);
        Ok(names)
    }

    pub fn entry_exists(&self, folder: &str, action: &str, filename: &str) -> Result<bool, AccessError> {
        Ok(self.entry_path(folder, action, filename)?.is_file())
    }

    /// Reads the entry as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, the same as file
    /// previews.
    pub fn read_entry(&self, folder: &str, action: &str, filename: &str) -> Result<String, AccessError> {
        let path = self.entry_path(folder, action, filename)?;
        let display = entry_display(folder, action, filename);

        if path.is_dir() {
            return Err(AccessError::NotFound(format!("File not found: {}", display)));
        }

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AccessError::NotFound(format!("File not found: {}", display)),
            _ => AccessError::Io(e),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Replaces the entry's content, creating parent directories as needed.
    pub fn write_entry(
        &self,
        folder: &str,
        action: &str,
        filename: &str,
        content: &str,
    ) -> Result<(), AccessError> {
        let path = self.entry_path(folder, action, filename)?;
        write_atomic(&path, content.as_bytes())?;
        info!(
            "Saved prompt {} ({} bytes)",
            entry_display(folder, action, filename),
            content.len()
        );
        Ok(())
    }

    /// Removes the entry; a missing entry is not an error.
    pub fn delete_entry(&self, folder: &str, action: &str, filename: &str) -> Result<(), AccessError> {
        let path = self.entry_path(folder, action, filename)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted prompt {}", entry_display(folder, action, filename));
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AccessError::Io(e)),
        }
    }

    /// Creates `folder` if it does not exist yet.
    pub fn ensure_folder(&self, folder: &str) -> Result<(), AccessError> {
        fs::create_dir_all(self.folder_path(folder)?)?;
        Ok(())
    }

    pub fn get_order(&self, folder: &str) -> Result<Vec<String>, AccessError> {
        order::read_order(&self.folder_path(folder)?)
    }

    pub fn save_order(&self, folder: &str, ordered_names: &[String]) -> Result<(), AccessError> {
        order::write_order(&self.folder_path(folder)?, ordered_names)
    }

    /// Deletes a file or a whole directory tree below the base directory.
    pub fn delete_folder_or_file(&self, relative_path: &str) -> Result<(), AccessError> {
        operations::delete_path(&self.base_directory, relative_path)
    }

    /// Every folder with the files directly inside it whose extension is in
    /// `extensions`.
    pub fn list_folder_summaries(&self, extensions: &[String]) -> Result<Vec<FolderListing>, AccessError> {
        let mut listings = Vec::new();

        for folder in self.list_folders()? {
            let prompts = self
                .list_entries(&folder, "")?
                .into_iter()
                .filter(|name| has_allowed_extension(name, extensions))
                .map(|name| PromptFile {
                    path: format!("{}/{}", folder, name),
                    name,
                })
                .collect();

            listings.push(FolderListing { folder, prompts });
        }

        debug!("Summarized {} prompt folders", listings.len());
        Ok(listings)
    }

    fn folder_path(&self, folder: &str) -> Result<PathBuf, AccessError> {
        Ok(self.base_directory.join(single_segment(folder)?))
    }

    fn action_path(&self, folder: &str, action: &str) -> Result<PathBuf, AccessError> {
        let mut path = self.folder_path(folder)?;
        if let Some(action) = optional_segment(action)? {
            path.push(action);
        }
        Ok(path)
    }

    fn entry_path(&self, folder: &str, action: &str, filename: &str) -> Result<PathBuf, AccessError> {
        let filename = single_segment(filename)?;
        // The order file is only reachable through get_order/save_order
        if filename == ORDER_FILE_NAME {
            return Err(AccessError::InvalidPath(format!(
                "Reserved name: {}",
                ORDER_FILE_NAME
            )));
        }
        Ok(self.action_path(folder, action)?.join(filename))
    }
}

enum NodeKind {
    Directory,
    File,
}

/// Sorted names of the children of `dir` with the given kind; a missing
/// directory yields an empty list.
fn list_names(dir: &Path, kind: NodeKind) -> Result<Vec<String>, AccessError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AccessError::Io(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let matches = match kind {
            NodeKind::Directory => path.is_dir(),
            NodeKind::File => path.is_file() && !is_pending_write(&name),
        };
        if matches {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Temporary siblings created by `write_atomic`, including ones left
/// behind by an interrupted write.
fn is_pending_write(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}

fn single_segment(name: &str) -> Result<&str, AccessError> {
    match optional_segment(name)? {
        Some(segment) => Ok(segment),
        None => Err(AccessError::InvalidPath(format!("Empty name: {:?}", name))),
    }
}

fn optional_segment(name: &str) -> Result<Option<&str>, AccessError> {
    let segments = normalize_segments(name)?;
    match segments.as_slice() {
        [] => Ok(None),
        [segment] => Ok(Some(*segment)),
        _ => Err(AccessError::InvalidPath(format!(
            "Expected a single name, got {:?}",
            name
        ))),
    }
}

fn entry_display(folder: &str, action: &str, filename: &str) -> String {
    if action.is_empty() {
        format!("{}/{}", folder, filename)
    } else {
        format!("{}/{}/{}", folder, action, filename)
    }
}

/// Writes `bytes` to a uniquely named sibling temporary file and renames it
/// over `path`, so readers see either the old or the new content.
///
/// Concurrent writers to the same path each get their own temporary file;
/// the last rename wins.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AccessError> {
    let parent = path
        .parent()
        .ok_or_else(|| AccessError::InvalidPath(path.display().to_string()))?;
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;

    // The temporary file is removed on drop if the rename fails
    temp_file.persist(path).map_err(|e| AccessError::Io(e.error))?;
    Ok(())
}
