//! Cross-process reporter lock.
//!
//! Uses `flock()` on a well-known lock file so that reporters in sibling
//! processes sharing one pipe never interleave frames. The lock is released
//! when the [`LockGuard`] is dropped, and by the kernel if the holder dies.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// What to do when another reporter holds the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// Wait until the holder releases it
    #[default]
    Blocking,
    /// Fail immediately with [`ReportError::Lock`]
    NonBlocking,
}

/// Named advisory lock visible to independent processes.
#[derive(Debug, Clone)]
pub struct ReporterLock {
    path: PathBuf,
    mode: LockMode,
}

/// Holds the reporter lock until dropped.
#[derive(Debug)]
pub struct LockGuard {
    #[cfg(unix)]
    _flock: nix::fcntl::Flock<File>,

    #[cfg(not(unix))]
    _file: File,

    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // The Flock is released when dropped.
        trace!("Releasing reporter lock at {}", self.path.display());
    }
}

impl ReporterLock {
    pub const DEFAULT_FILE_NAME: &'static str = "testsolar_reporter.lock";

    pub fn new(path: impl Into<PathBuf>, mode: LockMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    /// `<tmp>/testsolar_reporter.lock`
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(Self::DEFAULT_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Take the lock according to the configured [`LockMode`].
    pub fn acquire(&self) -> Result<LockGuard> {
        let file = self.open().map_err(|source| self.lock_error(source))?;

        #[cfg(unix)]
        {
            use nix::fcntl::{Flock, FlockArg};

            let arg = match self.mode {
                LockMode::Blocking => FlockArg::LockExclusive,
                LockMode::NonBlocking => FlockArg::LockExclusiveNonblock,
            };

            match Flock::lock(file, arg) {
                Ok(flock) => {
                    trace!("Acquired reporter lock at {}", self.path.display());
                    Ok(LockGuard {
                        _flock: flock,
                        path: self.path.clone(),
                    })
                }
                Err((_file, errno)) => Err(self.lock_error(io::Error::from(errno))),
            }
        }

        #[cfg(not(unix))]
        {
            let _ = file;
            Err(self.lock_error(io::Error::new(
                io::ErrorKind::Unsupported,
                "file locking not supported on this platform",
            )))
        }
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
    }

    fn lock_error(&self, source: io::Error) -> ReportError {
        ReportError::Lock {
            path: self.path.clone(),
            source,
        }
    }
}
