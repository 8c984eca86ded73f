// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gitbak: composes the supervisor core into a runnable checkpoint
//! daemon for a single developer session. Flag parsing, signal handling,
//! and exit-code discipline live here; none of it touches `gitbak_core`
//! or `gitbak_engine` internals.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod cli;
mod color;
mod signals;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gitbak_adapters::{GitRunner, InstanceLock, Logger, ProcessRunner};
use gitbak_core::GitbakError;
use gitbak_engine::Supervisor;
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use crate::signals::Signals;

/// Clean success, or graceful cancellation — exit status is zero either
/// way.
const EXIT_SUCCESS: u8 = 0;
/// A fatal error surfaced after the supervisor was already running:
/// lock acquisition, logger setup, signal installation, or a
/// retry-exceeded checkpoint failure.
const EXIT_FATAL_ERROR: u8 = 1;
/// Invalid flags, a missing `git` binary, or a path that is not a work
/// tree — detected before anything is acquired or started.
const EXIT_CONFIG_ERROR: u8 = 2;

/// How long the shell waits, after requesting cancellation, for the
/// supervisor to return before giving up and exiting anyway.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> ExitCode {
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> ExitCode {
    let colorize = color::should_colorize(cli.no_color);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", color::red(&format!("gitbak: {e}"), colorize));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let runner: Arc<dyn GitRunner> = Arc::new(ProcessRunner::default());

    if !runner.binary_on_path() {
        eprintln!(
            "{}",
            color::red("gitbak: git was not found on the search path", colorize)
        );
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    let preflight_cancel = CancellationToken::new();
    match runner.is_work_tree(config.repo_path(), &preflight_cancel).await {
        Ok(true) => {}
        Ok(false) => {
            let err = GitbakError::NotARepository(config.repo_path().to_path_buf());
            eprintln!("{}", color::red(&format!("gitbak: {err}"), colorize));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
        Err(e) => {
            eprintln!(
                "{}",
                color::red(&format!("gitbak: {}", GitbakError::from(e)), colorize)
            );
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    }

    let lock = match InstanceLock::acquire(config.repo_path()) {
        Ok(lock) => lock,
        Err(e) => {
            eprintln!(
                "{}",
                color::red(&format!("gitbak: {}", GitbakError::from(e)), colorize)
            );
            return ExitCode::from(EXIT_FATAL_ERROR);
        }
    };

    let logger = match Logger::init(config.repo_path(), config.log_file.clone(), config.verbose) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!(
                "{}",
                color::red(&format!("gitbak: failed to open debug log: {e}"), colorize)
            );
            drop(lock);
            return ExitCode::from(EXIT_FATAL_ERROR);
        }
    };

    let mut signals = match Signals::install() {
        Ok(signals) => signals,
        Err(e) => {
            eprintln!(
                "{}",
                color::red(
                    &format!("gitbak: failed to install signal handlers: {e}"),
                    colorize
                )
            );
            drop(lock);
            return ExitCode::from(EXIT_FATAL_ERROR);
        }
    };

    let mut supervisor = Supervisor::new(config, runner, logger);
    let cancel = CancellationToken::new();

    let result = drive(&mut supervisor, &cancel, &mut signals).await;

    if let Err(e) = &result {
        if !e.is_cancellation() {
            eprintln!("{}", color::yellow(&format!("warning: {e}"), colorize));
        }
    }

    supervisor.print_summary(&cancel).await;
    drop(lock);

    ExitCode::from(exit_code_for(&result))
}

/// Race the supervisor's run against the shell's signal handlers.
///
/// On a signal, cancellation is requested and the in-flight run future
/// keeps being polled — never dropped and restarted — for up to
/// [`SHUTDOWN_GRACE_PERIOD`] before the shell gives up waiting.
async fn drive(
    supervisor: &mut Supervisor,
    cancel: &CancellationToken,
    signals: &mut Signals,
) -> Result<(), GitbakError> {
    let run_future = supervisor.run(cancel);
    tokio::pin!(run_future);

    tokio::select! {
        result = &mut run_future => result,
        _ = signals.recv() => {
            cancel.cancel();
            match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, &mut run_future).await {
                Ok(result) => result,
                Err(_elapsed) => Err(GitbakError::Cancelled),
            }
        }
    }
}

/// Map the supervisor's final result onto the shell's exit-code
/// discipline: zero on success or cancellation, non-zero on every other
/// fatal path.
fn exit_code_for(result: &Result<(), GitbakError>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) if e.is_cancellation() => EXIT_SUCCESS,
        Err(_) => EXIT_FATAL_ERROR,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
