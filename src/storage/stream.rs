//! File streaming and text preview
//!
//! Opens single files for forward-only reading, and returns small text
//! files inline when their extension is on the preview allow-list.

use log::debug;
use std::fs::{self, File};
use std::path::Path;

use crate::error::AccessError;
use crate::storage::results::FileStream;
use crate::storage::validation::{normalize_relative, resolve};

/// Opens the file at `relative_path` for sequential reading.
///
/// Fails with `NotFound` when the target is missing or is a directory.
pub fn open_read_stream(base_path: &Path, relative_path: &str) -> Result<FileStream, AccessError> {
    let relative = normalize_relative(relative_path)?;
    let file_path = resolve(base_path, &relative)?;

    let metadata = fs::metadata(&file_path).map_err(|e| AccessError::from_io(e, &relative))?;
    if !metadata.is_file() {
        return Err(AccessError::NotFound(format!("File not found: {}", relative)));
    }

    let file = File::open(&file_path).map_err(|e| AccessError::from_io(e, &relative))?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| relative.clone());

    debug!(
        "Opened read stream for {} (real: {}, {} bytes)",
        relative,
        file_path.display(),
        metadata.len()
    );

    Ok(FileStream::new(file_name, metadata.len(), file_path, file))
}

/// True if `file_name` carries one of `allowed` as its extension.
/// Comparison ignores case and a leading dot in the allow-list.
pub fn has_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    let Some(extension) = Path::new(file_name).extension() else {
        return false;
    };
    let extension = extension.to_string_lossy();

    allowed
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&extension))
}

/// Reads a text file for inline preview.
pub fn read_text_content(
    base_path: &Path,
    relative_path: &str,
    allowed_extensions: &[String],
) -> Result<String, AccessError> {
    let relative = normalize_relative(relative_path)?;
    let file_path = resolve(base_path, &relative)?;

    let metadata = fs::metadata(&file_path).map_err(|e| AccessError::from_io(e, &relative))?;
    if metadata.is_dir() {
        return Err(AccessError::UnsupportedContentType(format!(
            "{} is a directory",
            relative
        )));
    }

    if !has_allowed_extension(&relative, allowed_extensions) {
        return Err(AccessError::UnsupportedContentType(relative));
    }

    let bytes = fs::read(&file_path).map_err(|e| AccessError::from_io(e, &relative))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn allow(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extension_matching() {
        let allowed = allow(&["txt", ".MD"]);
        assert!(has_allowed_extension("notes.TXT", &allowed));
        assert!(has_allowed_extension("dir/readme.md", &allowed));
        assert!(!has_allowed_extension("image.png", &allowed));
        assert!(!has_allowed_extension("Makefile", &allowed));
    }

    #[test]
    fn test_stream_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), b"0123456789").unwrap();

        let mut stream = open_read_stream(dir.path(), "a.bin").unwrap();
        assert_eq!(stream.file_name, "a.bin");
        assert_eq!(stream.len, 10);

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"0123456789");
    }

    #[test]
    fn test_stream_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let err = open_read_stream(dir.path(), "sub").unwrap_err();
        assert!(matches!(err, AccessError::NotFound(_)));
        let err = open_read_stream(dir.path(), "missing.txt").unwrap_err();
        assert!(matches!(err, AccessError::NotFound(_)));
    }

    #[test]
    fn test_preview_rules() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        fs::write(dir.path().join("b.exe"), [0u8, 1, 2]).unwrap();
        fs::create_dir(dir.path().join("folder.txt")).unwrap();
        let allowed = allow(&["txt"]);

        assert_eq!(read_text_content(dir.path(), "a.txt", &allowed).unwrap(), "hello");
        assert!(matches!(
            read_text_content(dir.path(), "b.exe", &allowed),
            Err(AccessError::UnsupportedContentType(_))
        ));
        assert!(matches!(
            read_text_content(dir.path(), "folder.txt", &allowed),
            Err(AccessError::UnsupportedContentType(_))
        ));
        assert!(matches!(
            read_text_content(dir.path(), "nope.txt", &allowed),
            Err(AccessError::NotFound(_))
        ));
    }
}
