//! Archive generation
//!
//! Builds a deflate-compressed zip of a directory subtree entirely in
//! memory. The whole tree is walked and read before any archive bytes are
//! written, so a failed walk never leaves partial output behind.

use log::info;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::AccessError;
use crate::storage::validation::{normalize_relative, resolve};

/// One node collected for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    /// Folder entry; the name carries a trailing `/`
    Directory(String),
    File { name: String, contents: Vec<u8> },
}

impl ArchiveEntry {
    pub fn name(&self) -> &str {
        match self {
            ArchiveEntry::Directory(name) => name,
            ArchiveEntry::File { name, .. } => name,
        }
    }
}

/// In-memory build state of one archive request.
///
/// Entries appear in traversal order: depth first, each directory before
/// its contents, siblings in filesystem order.
#[derive(Debug, Default)]
pub struct ArchiveJob {
    pub root: String,
    pub entries: Vec<ArchiveEntry>,
}

impl ArchiveJob {
    /// Walks `root_path` and reads every descendant file into memory.
    pub fn collect(root: &str, root_path: &Path) -> Result<Self, AccessError> {
        let mut job = ArchiveJob {
            root: root.to_string(),
            entries: Vec::new(),
        };

        for entry in WalkDir::new(root_path).min_depth(1).follow_links(true) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(root_path)
                .map_err(|_| AccessError::InvalidPath(entry.path().display().to_string()))?;

            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                job.entries.push(ArchiveEntry::Directory(format!("{}/", name)));
            } else {
                let contents = fs::read(entry.path())?;
                job.entries.push(ArchiveEntry::File { name, contents });
            }
        }

        Ok(job)
    }

    /// Total bytes of file content held by the job
    pub fn content_len(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match e {
                ArchiveEntry::File { contents, .. } => contents.len(),
                ArchiveEntry::Directory(_) => 0,
            })
            .sum()
    }

    /// Serializes the collected entries as a zip archive.
    pub fn into_zip(self) -> Result<Vec<u8>, AccessError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in self.entries {
            match entry {
                ArchiveEntry::Directory(name) => {
                    writer.add_directory(name, options)?;
                }
                ArchiveEntry::File { name, contents } => {
                    writer.start_file(name, options)?;
                    writer.write_all(&contents)?;
                }
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Zips the directory at `relative_path` under `base_path`.
pub fn create_archive(base_path: &Path, relative_path: &str) -> Result<Vec<u8>, AccessError> {
    let root = normalize_relative(relative_path)?;
    let root_path = resolve(base_path, &root)?;

    let metadata = fs::metadata(&root_path)
        .map_err(|e| AccessError::from_io(e, &root))?;
    if !metadata.is_dir() {
        return Err(AccessError::NotFound(format!("Directory not found: {}", root)));
    }

    let job = ArchiveJob::collect(&root, &root_path)?;
    let entry_count = job.entries.len();
    let content_len = job.content_len();
    let bytes = job.into_zip()?;

    info!(
        "Archived {:?} - {} entries, {} bytes in, {} bytes out",
        root,
        entry_count,
        content_len,
        bytes.len()
    );

    Ok(bytes)
}
