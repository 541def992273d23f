//! Archive extraction
//!
//! Lenient on entry kinds, strict on paths: anything other than a
//! directory or regular file is skipped with a warning, while any entry
//! that would land outside the destination fails the extraction.
//! Extraction is not transactional.

use crate::error::{ArchiveError, ArchiveResult};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};

/// Counts of what was materialised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Directory entries created
    pub directories: usize,
    /// Regular files written
    pub files: usize,
    /// Entries skipped because of their kind
    pub skipped: Vec<PathBuf>,
}

/// Recreate the directories and regular files of `archive_path` under `dest`
///
/// Recorded relative paths and permission bits are preserved; parent
/// directories are created as needed.
///
/// # Errors
/// `ArchiveError::Io` on any read, directory creation or write failure;
/// `ArchiveError::UnsafeEntryPath` for absolute or `..` entry names.
pub fn extract(archive_path: &Path, dest: &Path) -> ArchiveResult<ExtractSummary> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::io_error(archive_path, e))?;
    let mut archive = Archive::new(BufReader::new(file));
    let mut summary = ExtractSummary::default();

    let entries = archive
        .entries()
        .map_err(|e| ArchiveError::io_error(archive_path, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| ArchiveError::io_error(archive_path, e))?;
        let name = entry
            .path()
            .map_err(|e| ArchiveError::io_error(archive_path, e))?
            .into_owned();
        let relative = sanitize(&name)?;
        let target = dest.join(&relative);
        let mode = entry.header().mode().ok();
        let kind = entry.header().entry_type();

        match kind {
            EntryType::Directory => {
                fs::create_dir_all(&target).map_err(|e| ArchiveError::io_error(&target, e))?;
                apply_mode(&target, mode)?;
                summary.directories += 1;
            }
            EntryType::Regular | EntryType::Continuous => {
                if relative.as_os_str().is_empty() {
                    return Err(ArchiveError::UnsafeEntryPath(name));
                }
                write_file(&target, &mut entry, mode)?;
                summary.files += 1;
            }
            other => {
                tracing::warn!(entry = %name.display(), kind = ?other, "skipping unsupported archive entry");
                summary.skipped.push(name);
            }
        }
    }

    tracing::debug!(
        archive = %archive_path.display(),
        dest = %dest.display(),
        files = summary.files,
        directories = summary.directories,
        skipped = summary.skipped.len(),
        "archive extracted"
    );
    Ok(summary)
}

/// Entry name as a path relative to the destination
fn sanitize(name: &Path) -> ArchiveResult<PathBuf> {
    let mut relative = PathBuf::new();
    for component in name.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ArchiveError::UnsafeEntryPath(name.to_path_buf()));
            }
        }
    }
    Ok(relative)
}

fn write_file(target: &Path, reader: &mut impl Read, mode: Option<u32>) -> ArchiveResult<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::io_error(parent, e))?;
    }
    let mut file = File::create(target).map_err(|e| ArchiveError::io_error(target, e))?;
    io::copy(reader, &mut file).map_err(|e| ArchiveError::io_error(target, e))?;
    apply_mode(target, mode)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> ArchiveResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = mode else {
        return Ok(());
    };
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        .map_err(|e| ArchiveError::io_error(path, e))
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> ArchiveResult<()> {
    Ok(())
}
