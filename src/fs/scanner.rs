//! Directory scanner
//!
//! Recursive enumeration of regular files under a source root,
//! producing the entries the copy engine fans out over.

use crate::error::{BucketCopyError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Sentinel bucket for files without an extension
pub const UNKNOWN_BUCKET: &str = "unknown";

/// A single discovered file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// Base name of the file
    pub file_name: OsString,
}

impl FileEntry {
    /// Create a FileEntry from a path.
    ///
    /// Does not touch the filesystem: the entry only carries the path and
    /// base name, so a file that vanishes after discovery fails inside its
    /// own copy unit instead of aborting the scan.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| BucketCopyError::NotFound(path.to_path_buf()))?
            .to_os_string();

        Ok(FileEntry {
            path: path.to_path_buf(),
            file_name,
        })
    }

    /// Destination bucket for this file: the extension without the leading
    /// dot, taken verbatim (case-sensitive), or `"unknown"` when the name
    /// has no extension.
    pub fn bucket(&self) -> String {
        match self.path.extension() {
            Some(ext) if !ext.is_empty() => ext.to_string_lossy().into_owned(),
            _ => UNKNOWN_BUCKET.to_string(),
        }
    }
}

/// Recursively enumerate every regular file under `root`.
///
/// Directories and symlinks to directories are skipped; a symlink to a
/// regular file is kept and copied through. Traversal order is whatever the
/// underlying walker yields and carries no meaning. An enumeration error
/// (e.g. permission denied descending into a subtree) propagates to the
/// caller rather than being skipped. A single entry that cannot be turned
/// into a [`FileEntry`] is logged and skipped, never aborting the scan.
pub fn scan_files(root: &Path) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();

    for dir_entry in WalkDir::new(root) {
        let dir_entry = dir_entry?;
        let file_type = dir_entry.file_type();

        let is_regular =
            file_type.is_file() || (file_type.is_symlink() && dir_entry.path().is_file());
        if !is_regular {
            continue;
        }

        match FileEntry::from_path(dir_entry.path()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", dir_entry.path().display(), e);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        File::create(dir.path().join("notes.txt"))
            .unwrap()
            .write_all(b"notes")
            .unwrap();

        File::create(dir.path().join("README"))
            .unwrap()
            .write_all(b"no extension")
            .unwrap();

        std::fs::create_dir_all(dir.path().join("sub/nested")).unwrap();
        File::create(dir.path().join("sub/nested/deep.log"))
            .unwrap()
            .write_all(b"deep")
            .unwrap();

        dir
    }

    #[test]
    fn test_scan_finds_nested_files() {
        let dir = create_test_dir();
        let entries = scan_files(dir.path()).unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries
            .iter()
            .any(|e| e.file_name == OsString::from("deep.log")));
    }

    #[test]
    fn test_scan_skips_directories() {
        let dir = create_test_dir();
        let entries = scan_files(dir.path()).unwrap();

        assert!(!entries.iter().any(|e| e.path.is_dir()));
    }

    #[test]
    fn test_scan_empty_tree() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        let entries = scan_files(dir.path()).unwrap();
        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_keeps_symlink_to_file() {
        let dir = create_test_dir();
        std::os::unix::fs::symlink(
            dir.path().join("notes.txt"),
            dir.path().join("link.txt"),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("sublink")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("missing"),
            dir.path().join("dangling"),
        )
        .unwrap();

        let entries = scan_files(dir.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|e| e.file_name.to_string_lossy().into_owned())
            .collect();

        assert!(names.contains(&"link.txt".to_string()));
        assert!(!names.contains(&"sublink".to_string()));
        assert!(!names.contains(&"dangling".to_string()));
    }

    #[test]
    fn test_entry_from_vanished_path() {
        // Entry construction never stats, so a file deleted between
        // discovery and entry creation cannot abort the scan; the failure
        // surfaces later, inside the file's own copy unit.
        let entry = FileEntry::from_path(Path::new("/nonexistent/ghost.txt")).unwrap();
        assert_eq!(entry.file_name, OsString::from("ghost.txt"));

        assert!(FileEntry::from_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_bucket_derivation() {
        let entry = |name: &str| FileEntry {
            path: PathBuf::from(format!("/tmp/{}", name)),
            file_name: OsString::from(name),
        };

        assert_eq!(entry("report.txt").bucket(), "txt");
        assert_eq!(entry("shout.TXT").bucket(), "TXT");
        assert_eq!(entry("archive.tar.gz").bucket(), "gz");
        assert_eq!(entry("README").bucket(), UNKNOWN_BUCKET);
        assert_eq!(entry(".bashrc").bucket(), UNKNOWN_BUCKET);
    }
}
