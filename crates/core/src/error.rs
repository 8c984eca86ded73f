// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The six-kind error taxonomy the core distinguishes.

use std::path::PathBuf;

use thiserror::Error;

/// A failed invocation of the underlying version-control binary.
///
/// Carries enough detail for the retry classifier to fingerprint the
/// failure and for the Logger to narrate it: the logical operation name,
/// the full argument vector, the captured stderr, and the underlying cause
/// (a non-zero exit or a failure to launch the process at all).
#[derive(Debug, Error)]
#[error("`{operation}` failed: {stderr}")]
pub struct CommandError {
    /// First meaningful sub-command, e.g. `status`, `commit`, `checkout`.
    pub operation: String,
    /// Full argument vector passed to the binary.
    pub args: Vec<String>,
    /// Captured stderr text.
    pub stderr: String,
    /// Exit status, when the process launched and ran to completion.
    pub exit_code: Option<i32>,
    /// System error, when the process could not be launched at all.
    #[source]
    pub cause: Option<std::io::Error>,
}

impl CommandError {
    /// The textual identity the retry classifier fingerprints failures by.
    ///
    /// Two `CommandError`s with the same fingerprint are treated as "the
    /// same kind of failure" for the purposes of the consecutive-errors
    /// counter (see [`crate::retry::ErrorState`]).
    pub fn fingerprint(&self) -> String {
        format!("{}: {}", self.operation, self.stderr.trim())
    }
}

/// The error taxonomy the supervisor and application shell propagate.
#[derive(Debug, Error)]
pub enum GitbakError {
    /// A required configuration field is missing or out of range. Detected
    /// before any I/O; always fatal.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The configured path failed the work-tree probe. Fatal.
    #[error("{} is not inside a git work tree", .0.display())]
    NotARepository(PathBuf),

    /// The lock is held by another live process. Fatal; surfaced verbatim.
    #[error("gitbak is already running for this repository (pid {})", pid.map_or_else(|| "unknown".to_string(), |p| p.to_string()))]
    AlreadyRunning {
        /// PID recorded in the lock file, when it could be read back.
        pid: Option<u32>,
    },

    /// Any other lock-file error: permissions, or a failed stale-reclaim.
    #[error("failed to acquire lock: {0}")]
    LockAcquisitionFailure(#[source] std::io::Error),

    /// A sub-process returned non-zero or failed to launch. May become
    /// fatal once the retry policy's `max-retries` is exceeded.
    #[error(transparent)]
    SubprocessFailed(#[from] CommandError),

    /// The maximum-retries threshold was exceeded by a run of identical
    /// failures. Wraps the last cause.
    #[error("maximum retries ({max_retries}) exceeded: {source}")]
    MaxRetriesExceeded {
        max_retries: u32,
        #[source]
        source: CommandError,
    },

    /// The cancellation handle fired. Not a failure — returned to the
    /// Shell, which exits cleanly.
    #[error("cancelled")]
    Cancelled,
}

impl GitbakError {
    /// Whether this error represents a graceful, non-failure shutdown.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, GitbakError::Cancelled)
    }
}
