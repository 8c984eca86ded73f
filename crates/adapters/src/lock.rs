// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance Lock: the OS-level advisory lock that keeps two gitbak
//! supervisors from running against the same repository at once.
//!
//! The lock file records the holder's PID. If acquisition finds the file
//! already locked, it reads that PID back and probes whether the process
//! is still alive (`kill(pid, 0)`) before giving up — a crashed prior run
//! leaves a lock file behind, and a live gitbak should reclaim it rather
//! than refuse to start forever.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use gitbak_core::GitbakError;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use sha2::{Digest, Sha256};
use thiserror::Error;

const LOCK_SUBDIR: &str = "gitbak";

/// Errors specific to acquiring the instance lock. Converts into
/// [`GitbakError`] for callers that only care about the unified taxonomy.
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock is held by another process that is still alive.
    #[error("gitbak is already running for this repository (pid {pid:?})")]
    AlreadyHeld { pid: Option<u32> },
    /// Any other failure opening, locking, or writing the lock file.
    #[error("lock file error: {0}")]
    Io(#[from] io::Error),
}

impl From<LockError> for GitbakError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyHeld { pid } => GitbakError::AlreadyRunning { pid },
            LockError::Io(e) => GitbakError::LockAcquisitionFailure(e),
        }
    }
}

/// Derive the lock-file path for `repo_path`, hashed the same way as the
/// debug log so the two never collide and both key off the repository's
/// absolute path alone.
pub fn default_lock_path(repo_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(repo_path.display().to_string().as_bytes());
    let digest = hasher.finalize();
    let hex = digest.iter().take(8).map(|b| format!("{b:02x}")).collect::<String>();
    let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    base.join(LOCK_SUBDIR).join(format!("{hex}.lock"))
}

/// A held, exclusive lock on a repository. Releases automatically on
/// drop (closing the file descriptor releases the OS-level flock).
pub struct InstanceLock {
    path: PathBuf,
    file: File,
}

impl InstanceLock {
    /// Acquire the lock for `repo_path`, reclaiming a stale lock left by a
    /// dead process exactly once before giving up.
    pub fn acquire(repo_path: &Path) -> Result<Self, LockError> {
        Self::acquire_at(&default_lock_path(repo_path))
    }

    /// As [`Self::acquire`], but against an explicit lock-file path —
    /// used by tests to avoid touching the real platform data directory.
    pub fn acquire_at(path: &Path) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;

        match try_lock(&mut file, path) {
            Ok(()) => Ok(Self {
                path: path.to_path_buf(),
                file,
            }),
            Err(LockError::AlreadyHeld { pid }) => {
                let stale = pid.map(|p| !is_process_alive(p)).unwrap_or(false);
                if stale {
                    try_lock(&mut file, path)?;
                    Ok(Self {
                        path: path.to_path_buf(),
                        file,
                    })
                } else {
                    Err(LockError::AlreadyHeld { pid })
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Path of the lock file this instance holds.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

fn try_lock(file: &mut File, path: &Path) -> Result<(), LockError> {
    match file.try_lock_exclusive() {
        Ok(()) => {
            write_pid(file, std::process::id())?;
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
            Err(LockError::AlreadyHeld { pid: read_pid(path) })
        }
        Err(e) => Err(LockError::Io(e)),
    }
}

fn write_pid(file: &mut File, pid: u32) -> io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    write!(file, "{pid}")?;
    file.flush()
}

fn read_pid(path: &Path) -> Option<u32> {
    let mut contents = String::new();
    File::open(path).ok()?.read_to_string(&mut contents).ok()?;
    contents.trim().parse().ok()
}

/// Whether a process with this PID currently exists, probed via a
/// no-op signal (`kill(pid, 0)`) rather than sending anything real.
/// `EPERM` counts as alive: the process exists, we simply lack
/// permission to signal it.
fn is_process_alive(pid: u32) -> bool {
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(nix::errno::Errno::EPERM) => true,
        Err(nix::errno::Errno::ESRCH) => false,
        Err(_) => true,
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
