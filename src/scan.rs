//! Input directory scanning.
//!
//! Produces the immutable [`MediaFile`] records the pipeline consumes. The
//! scan is a thin collaborator: it never mutates anything, and size
//! filtering against the configured guardrail happens in the caller before
//! a file ever reaches the pipeline.

use crate::defaults::ALLOWED_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};

/// An immutable reference to a media file on durable storage.
///
/// Identity is the path; the size is captured at scan time for display and
/// for the max-file-size guardrail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl MediaFile {
    /// Build a record for an explicitly named file (bypassing the scan).
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }

    /// File name for display and error context.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }

    /// Size in megabytes.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Whether this file exceeds the configured size guardrail.
    pub fn exceeds_limit(&self, max_file_mb: u64) -> bool {
        self.size_bytes > max_file_mb * 1024 * 1024
    }
}

/// File name of a path for human-readable messages.
///
/// Falls back to the full path display for paths without a final component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List media files under `input_dir`, recursively, sorted by path.
///
/// A missing or non-directory input yields an empty list rather than an
/// error; the caller decides how to present "nothing found".
pub fn list_media_files(input_dir: &Path) -> Vec<MediaFile> {
    let mut files = Vec::new();
    if input_dir.is_dir() {
        collect(input_dir, &mut files);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn collect(dir: &Path, out: &mut Vec<MediaFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        // Unreadable subdirectories are skipped, not fatal.
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path.is_file() && has_allowed_extension(&path) {
            if let Ok(metadata) = entry.metadata() {
                out.push(MediaFile {
                    path,
                    size_bytes: metadata.len(),
                });
            }
        }
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
