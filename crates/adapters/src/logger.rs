// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dual-Stream Logger: a terse, human-facing stream on stdout/stderr for
//! the person watching the terminal, and a verbose `tracing` debug log
//! written to a per-repository file for diagnosing a run after the fact.

use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default directory, under the platform data directory, that holds
/// gitbak's per-repository debug logs.
const LOG_SUBDIR: &str = "gitbak";

/// Derive the debug-log path for `repo_path`: the platform data
/// directory, a `gitbak` subdirectory, and a filename keyed on a SHA-256
/// hash of the repository's absolute path so two repositories never
/// collide and the same repository always resolves to the same file.
pub fn default_log_path(repo_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(repo_path.display().to_string().as_bytes());
    let digest = hasher.finalize();
    let hex = digest.iter().take(8).map(|b| format!("{b:02x}")).collect::<String>();
    let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    base.join(LOG_SUBDIR).join(format!("{hex}.log"))
}

/// Owns the debug-log file writer and keeps it alive for the process
/// lifetime. Holding the [`WorkerGuard`] is what guarantees buffered
/// records are flushed to disk before the process exits — dropping it
/// early would silently truncate the tail of the log.
pub struct Logger {
    log_path: PathBuf,
    _guard: WorkerGuard,
    verbose: bool,
}

impl Logger {
    /// Install the global `tracing` subscriber and open the debug-log
    /// file, creating its parent directory if necessary.
    ///
    /// `verbose` mirrors checkpoint notices and status lines to stdout in
    /// addition to the debug log; without it, only warnings and the
    /// startup/summary banners reach the terminal.
    pub fn init(repo_path: &Path, log_file: Option<PathBuf>, verbose: bool) -> io::Result<Self> {
        let log_path = log_file.unwrap_or_else(|| default_log_path(repo_path));
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        let filter = EnvFilter::try_from_env("GITBAK_LOG")
            .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .finish();
        // Ignore "already set": tests may initialize a Logger more than
        // once within the same process.
        let _ = tracing::subscriber::set_global_default(subscriber);

        Ok(Self {
            log_path,
            _guard: guard,
            verbose,
        })
    }

    /// Path of the debug log this instance is writing to.
    pub fn log_file_path(&self) -> &Path {
        &self.log_path
    }

    /// A routine status line: always recorded in the debug log, echoed to
    /// stdout only in verbose mode.
    pub fn status(&self, message: &str) {
        tracing::info!("{message}");
        if self.verbose {
            println!("{message}");
        }
    }

    /// An operator-only diagnostic: recorded in the debug log, never
    /// echoed to the terminal regardless of verbosity. Used for the
    /// monitoring loop's "no changes this tick" notice, which would
    /// otherwise spam the terminal every poll.
    pub fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    /// A line meant only for the terminal, never recorded in the debug
    /// log — the monitoring loop's optional "no changes to commit" echo
    /// and the startup/summary banners.
    pub fn status_message(&self, message: &str) {
        println!("{message}");
    }

    /// A checkpoint commit notice: always echoed to stdout, regardless of
    /// verbosity — this is the whole point of running gitbak.
    pub fn checkpoint(&self, message: &str) {
        tracing::info!("{message}");
        println!("{message}");
    }

    /// A recoverable problem: always echoed to stderr and recorded as a
    /// warning in the debug log.
    pub fn warning(&self, message: &str) {
        tracing::warn!("{message}");
        eprintln!("warning: {message}");
    }

    /// A fatal problem: always echoed to stderr and recorded as an error.
    pub fn error(&self, message: &str) {
        tracing::error!("{message}");
        eprintln!("error: {message}");
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
