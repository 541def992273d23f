//! Scoped process working-directory switch
//!
//! The working directory is process-wide state. `WorkingDirGuard` takes a
//! process-wide lock, enters the requested directory and restores the
//! original one when dropped, on every exit path including `?` returns.
//! Concurrent guards in one process are serialised by the lock.

use crate::error::{ArchiveError, ArchiveResult};
use parking_lot::{Mutex, MutexGuard};
use std::env;
use std::path::{Path, PathBuf};

static WORKING_DIR_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// RAII guard over a temporary working-directory change
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl WorkingDirGuard {
    /// Enter `dir`, remembering the current directory
    ///
    /// # Errors
    /// `ArchiveError::WorkingDirectory` if the current directory cannot be
    /// read or `dir` cannot be entered; the process stays where it was.
    pub fn enter(dir: impl AsRef<Path>) -> ArchiveResult<Self> {
        let dir = dir.as_ref();
        let lock = WORKING_DIR_LOCK.lock();
        let original =
            env::current_dir().map_err(|e| ArchiveError::working_directory(".", e))?;
        env::set_current_dir(dir).map_err(|e| ArchiveError::working_directory(dir, e))?;
        tracing::debug!(from = %original.display(), to = %dir.display(), "entered working directory");
        Ok(Self {
            original,
            _lock: lock,
        })
    }

    /// Directory that will be restored on drop
    #[inline]
    #[must_use]
    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.original) {
            tracing::error!(
                dir = %self.original.display(),
                error = %err,
                "failed to restore working directory"
            );
        }
    }
}
