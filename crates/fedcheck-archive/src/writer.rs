//! Deterministic archive writer
//!
//! Every header carries the same mtime, owner and mode regardless of the
//! machine or the files' on-disk metadata, so identical logical inputs in
//! the same order produce byte-identical archives.
//!
//! Entry order: the supergraph descriptor first (under its file name),
//! then one entry per schema in caller order.

use crate::error::{ArchiveError, ArchiveResult};
use crate::workdir::WorkingDirGuard;
use fedcheck_descriptor::SubgraphSpec;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tar::{Builder, EntryType, Header};

/// 2024-01-01T00:00:00Z
pub const PINNED_MTIME: u64 = 1_704_067_200;

/// User and group name recorded on every entry
pub const PINNED_OWNER: &str = "bazel";

/// Permission bits for regular files
pub const FILE_MODE: u32 = 0o644;

/// Permission bits for directory markers
pub const DIR_MODE: u32 = 0o755;

/// How schema entries are named inside the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaEntryNaming {
    /// Final path component only, for flat composition directories
    BaseName,
    /// Path as given, relative to the schemas directory, for structured trees
    #[default]
    RelativePath,
}

/// What was written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Entry names in write order
    pub entries: Vec<PathBuf>,
}

/// Write `config` and every schema in `schemas` to a new archive at `output`
///
/// `output` and `config` are resolved against the current directory. Schema
/// paths are resolved inside `schemas_dir` when one is given; the working
/// directory is switched for that span only and restored afterwards, also
/// on error.
///
/// A partially written archive may be left behind on failure.
///
/// # Errors
/// `ArchiveError::Io` naming the file that could not be created, opened,
/// stat'd or written; `ArchiveError::WorkingDirectory` if `schemas_dir`
/// cannot be entered.
pub fn create_archive(
    output: &Path,
    config: &Path,
    schemas: &[SubgraphSpec],
    schemas_dir: Option<&Path>,
    naming: SchemaEntryNaming,
) -> ArchiveResult<ArchiveSummary> {
    let out = File::create(output).map_err(|e| ArchiveError::io_error(output, e))?;
    let mut builder = Builder::new(BufWriter::new(out));
    let mut summary = ArchiveSummary::default();

    let config_name = config
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ArchiveError::UnsafeEntryPath(config.to_path_buf()))?;
    append_file(&mut builder, config, &config_name)?;
    summary.entries.push(config_name);

    {
        let _cwd = match schemas_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Some(WorkingDirGuard::enter(dir)?),
            _ => None,
        };

        let mut written_dirs = HashSet::new();
        for spec in schemas {
            let source = spec.schema();
            let name = entry_name(source, naming)?;

            if naming == SchemaEntryNaming::RelativePath {
                for dir in parent_dirs(&name) {
                    if written_dirs.insert(dir.clone()) {
                        append_dir(&mut builder, &dir)?;
                        summary.entries.push(dir);
                    }
                }
            }

            tracing::debug!(subgraph = spec.name(), entry = %name.display(), "adding schema");
            append_file(&mut builder, source, &name)?;
            summary.entries.push(name);
        }
    }

    let mut writer = builder
        .into_inner()
        .map_err(|e| ArchiveError::io_error(output, e))?;
    writer
        .flush()
        .map_err(|e| ArchiveError::io_error(output, e))?;

    tracing::info!(
        archive = %output.display(),
        entries = summary.entries.len(),
        "archive written"
    );
    Ok(summary)
}

fn entry_name(source: &Path, naming: SchemaEntryNaming) -> ArchiveResult<PathBuf> {
    match naming {
        SchemaEntryNaming::BaseName => source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| ArchiveError::UnsafeEntryPath(source.to_path_buf())),
        SchemaEntryNaming::RelativePath => Ok(source
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()),
    }
}

/// Ancestor directories of `name`, outermost first
fn parent_dirs(name: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = PathBuf::new();
    if let Some(parent) = name.parent() {
        for component in parent.components() {
            if let Component::Normal(part) = component {
                current.push(part);
                dirs.push(current.clone());
            }
        }
    }
    dirs
}

fn pinned_header(kind: EntryType, mode: u32, size: u64) -> io::Result<Header> {
    let mut header = Header::new_ustar();
    header.set_entry_type(kind);
    header.set_mode(mode);
    header.set_size(size);
    header.set_mtime(PINNED_MTIME);
    header.set_uid(0);
    header.set_gid(0);
    header.set_username(PINNED_OWNER)?;
    header.set_groupname(PINNED_OWNER)?;
    Ok(header)
}

fn append_file<W: Write>(builder: &mut Builder<W>, source: &Path, name: &Path) -> ArchiveResult<()> {
    let file = File::open(source).map_err(|e| ArchiveError::io_error(source, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| ArchiveError::io_error(source, e))?;
    let mut header = pinned_header(EntryType::Regular, FILE_MODE, metadata.len())
        .map_err(|e| ArchiveError::io_error(name, e))?;
    builder
        .append_data(&mut header, name, file)
        .map_err(|e| ArchiveError::io_error(name, e))
}

fn append_dir<W: Write>(builder: &mut Builder<W>, dir: &Path) -> ArchiveResult<()> {
    let mut header =
        pinned_header(EntryType::Directory, DIR_MODE, 0).map_err(|e| ArchiveError::io_error(dir, e))?;
    let mut marker = dir.as_os_str().to_owned();
    marker.push("/");
    builder
        .append_data(&mut header, Path::new(&marker), io::empty())
        .map_err(|e| ArchiveError::io_error(dir, e))
}
