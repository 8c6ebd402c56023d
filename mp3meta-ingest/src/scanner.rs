//! MP3 file scanner
//!
//! Recursive discovery of candidate files under the library root. Entries are
//! visited in file-name order, so a given tree always yields the same list.
//! Names are compared as raw OS bytes and never transcoded.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Suffix a file name must end with to be ingested (case-sensitive)
pub const MP3_SUFFIX: &str = ".mp3";

/// File scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// MP3 file scanner
pub struct FileScanner {
    suffix: String,
}

impl FileScanner {
    /// Create a scanner matching the literal `.mp3` suffix
    pub fn new() -> Self {
        Self {
            suffix: MP3_SUFFIX.to_string(),
        }
    }

    /// Scan `root_path` recursively for regular files ending in the suffix
    pub fn scan(&self, root_path: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.matches(entry.path()) {
                        tracing::debug!(file = %entry.path().display(), "MP3 file");
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        tracing::debug!(
            root = %root_path.display(),
            "Scan complete: {} MP3 files discovered",
            files.len()
        );

        Ok(files)
    }

    /// Literal, case-sensitive suffix check on the file name
    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().ends_with(self.suffix.as_bytes()))
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
