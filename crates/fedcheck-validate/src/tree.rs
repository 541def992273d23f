//! Snapshot trees: extraction into scratch directories and recursive copy

use crate::error::{ValidateError, ValidateResult};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

/// An archive extracted into its own temporary directory
///
/// The directory and everything under it is removed on drop.
#[derive(Debug)]
pub struct Snapshot {
    dir: TempDir,
}

impl Snapshot {
    /// Extract `archive` into a fresh directory named after `label`
    ///
    /// # Errors
    /// Scratch directory creation or extraction failure.
    pub fn extract(archive: &Path, label: &str) -> ValidateResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(label)
            .tempdir()
            .map_err(|e| ValidateError::io_error(std::env::temp_dir(), e))?;
        let summary = fedcheck_archive::extract(archive, dir.path())?;
        tracing::info!(
            archive = %archive.display(),
            dir = %dir.path().display(),
            files = summary.files,
            "extracted snapshot"
        );
        Ok(Self { dir })
    }

    /// Root of the extracted tree
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Copy every directory and regular file under `src` into `dst`
///
/// `dst` may already exist; existing files are overwritten. Other entry
/// kinds are skipped. Returns the number of files copied.
///
/// # Errors
/// Any traversal, directory creation or copy failure.
pub fn copy_tree(src: &Path, dst: &Path) -> ValidateResult<usize> {
    fs::create_dir_all(dst).map_err(|e| ValidateError::io_error(dst, e))?;
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ValidateError::io_error(path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        let kind = entry.file_type();
        if kind.is_dir() {
            fs::create_dir_all(&target).map_err(|e| ValidateError::io_error(&target, e))?;
        } else if kind.is_file() {
            fs::copy(entry.path(), &target).map_err(|e| ValidateError::io_error(&target, e))?;
            copied += 1;
        } else {
            tracing::warn!(path = %entry.path().display(), "skipping non-regular file");
        }
    }
    Ok(copied)
}

/// Replace the file at `dst` with the contents of `src`, creating parents
///
/// # Errors
/// Directory creation or copy failure.
pub fn replace_file(src: &Path, dst: &Path) -> ValidateResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| ValidateError::io_error(parent, e))?;
    }
    fs::copy(src, dst).map_err(|e| ValidateError::io_error(src, e))?;
    Ok(())
}
