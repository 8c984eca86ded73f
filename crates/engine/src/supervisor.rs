// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Session Supervisor: session-mode resolution followed by the
//! monitoring loop, with the retry policy guarding the loop against an
//! unbounded run of identical failures.

use std::path::Path;
use std::sync::Arc;

use gitbak_adapters::{GitRunner, InteractivePrompter, Logger, NonInteractivePrompter, Prompter};
use gitbak_core::{
    format_commit_message, CommandError, Config, ErrorState, GitbakError, SessionState,
};
use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, SystemClock};
use crate::session_mode::{self, SessionMode};
use crate::summary;

/// Drives one gitbak session end to end: resolves the session mode, then
/// runs the monitoring loop until cancellation or a fatal retry-exceeded
/// error. Owns no state shared with any other thread — the only outside
/// communication channel is the [`CancellationToken`] passed to [`Self::run`].
pub struct Supervisor {
    config: Config,
    runner: Arc<dyn GitRunner>,
    prompter: Arc<dyn Prompter>,
    logger: Logger,
    clock: Arc<dyn Clock>,
    state: Option<SessionState>,
    mode: Option<SessionMode>,
}

impl Supervisor {
    /// Construct a supervisor for `config`, picking the interactive or
    /// non-interactive [`Prompter`] variant per `config.non_interactive`
    /// and the real system clock.
    pub fn new(config: Config, runner: Arc<dyn GitRunner>, logger: Logger) -> Self {
        let prompter: Arc<dyn Prompter> = if config.non_interactive {
            Arc::new(NonInteractivePrompter)
        } else {
            Arc::new(InteractivePrompter)
        };
        Self::with_collaborators(config, runner, prompter, logger, Arc::new(SystemClock))
    }

    /// As [`Self::new`], but with every collaborator injected explicitly —
    /// the shape tests use to drive the supervisor against a [`FakeRunner`]
    /// / [`FakePrompter`] / [`FakeClock`] deterministically.
    ///
    /// [`FakeRunner`]: gitbak_adapters::FakeRunner
    /// [`FakePrompter`]: gitbak_adapters::FakePrompter
    /// [`FakeClock`]: crate::clock::fake::FakeClock
    pub fn with_collaborators(
        config: Config,
        runner: Arc<dyn GitRunner>,
        prompter: Arc<dyn Prompter>,
        logger: Logger,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            runner,
            prompter,
            logger,
            clock,
            state: None,
            mode: None,
        }
    }

    /// Drive the session from end to end.
    ///
    /// Returns `Ok(())` only via cancellation bubbling up as
    /// [`GitbakError::Cancelled`] being mapped away by the caller — in
    /// practice this method returns `Err(GitbakError::Cancelled)` on
    /// graceful shutdown and `Err(other)` on a fatal initialization or
    /// retry-exceeded error. The Application Shell treats `Cancelled`
    /// as success and everything else as a failure exit.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<(), GitbakError> {
        let repo = self.config.repo_path().to_path_buf();

        let original_branch = self
            .runner
            .current_branch(&repo, cancel)
            .await
            .map_err(GitbakError::from)?;

        let mut state = SessionState::new(&original_branch);

        let resolution = session_mode::resolve(
            &self.config,
            &original_branch,
            self.runner.as_ref(),
            self.prompter.as_ref(),
            &self.logger,
            self.clock.as_ref(),
            cancel,
        )
        .await?;

        state.set_working_branch(resolution.working_branch);
        state.seed_counter(resolution.baseline);
        self.mode = Some(resolution.mode);
        self.state = Some(state);

        self.display_startup_info();

        if cancel.is_cancelled() {
            return Err(GitbakError::Cancelled);
        }

        self.monitoring_loop(&repo, cancel).await
    }

    /// Emit the session's opening status line: prefix, interval, working
    /// branch, and session mode.
    fn display_startup_info(&self) {
        let Some(state) = &self.state else { return };
        self.logger.status_message(&format!(
            "gitbak started: prefix `{}`, interval {:.2}s, branch `{}`",
            self.config.commit_prefix,
            self.config.interval.as_secs_f64(),
            state.working_branch
        ));
        if state.commits_made > 0 {
            self.logger.status_message(&format!(
                "continuing from checkpoint #{}",
                state.commits_made
            ));
        }
    }

    async fn monitoring_loop(
        &mut self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), GitbakError> {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; consume it so the loop's
        // cadence is "wait, then check" rather than an instant first probe.
        ticker.tick().await;

        let mut errors = ErrorState::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(GitbakError::Cancelled);
                }
                _ = ticker.tick() => {
                    self.tick(repo, cancel, &mut errors).await?;
                }
            }
        }
    }

    async fn tick(
        &mut self,
        repo: &Path,
        cancel: &CancellationToken,
        errors: &mut ErrorState,
    ) -> Result<(), GitbakError> {
        match self.runner.status_porcelain(repo, cancel).await {
            Ok(status) if status.trim().is_empty() => {
                errors.record_success();
                self.logger.debug("no changes to commit");
                if self.config.show_no_changes && self.config.verbose {
                    self.logger.status_message("No changes to commit");
                }
                Ok(())
            }
            Ok(_) => self.commit_checkpoint(repo, cancel, errors).await,
            Err(e) => {
                if cancel.is_cancelled() {
                    return Err(GitbakError::Cancelled);
                }
                self.handle_failure(e, errors)
            }
        }
    }

    async fn commit_checkpoint(
        &mut self,
        repo: &Path,
        cancel: &CancellationToken,
        errors: &mut ErrorState,
    ) -> Result<(), GitbakError> {
        match self.try_commit(repo, cancel).await {
            Ok(n) => {
                errors.record_success();
                if let Some(state) = self.state.as_mut() {
                    state.record_commit();
                }
                self.logger.checkpoint(&format!(
                    "{} #{n} recorded",
                    self.config.commit_prefix
                ));
                Ok(())
            }
            Err(e) => {
                if cancel.is_cancelled() {
                    return Err(GitbakError::Cancelled);
                }
                self.handle_failure(e, errors)
            }
        }
    }

    /// Stage everything and commit with the next sequence number's
    /// message, returning that number on success. Never called when the
    /// working tree is clean — the caller only reaches here after
    /// observing non-empty `status --porcelain` output.
    async fn try_commit(&self, repo: &Path, cancel: &CancellationToken) -> Result<u64, CommandError> {
        self.runner.stage_all(repo, cancel).await?;
        let n = self
            .state
            .as_ref()
            .map(|s| s.next_sequence())
            .unwrap_or(1);
        let message = format_commit_message(&self.config.commit_prefix, n, &self.clock.timestamp());
        self.runner.commit(repo, &message, cancel).await?;
        Ok(n)
    }

    /// Apply the retry policy to a subprocess failure: fingerprint it,
    /// log it, and escalate to a terminal error once the consecutive
    /// count for that fingerprint exceeds `max_retries`.
    fn handle_failure(&mut self, err: CommandError, errors: &mut ErrorState) -> Result<(), GitbakError> {
        let fingerprint = err.fingerprint();
        let consecutive = errors.record_error(fingerprint);
        self.logger.warning(&format!(
            "checkpoint attempt failed ({consecutive} consecutive): {err}"
        ));
        if errors.exceeds(self.config.max_retries) {
            return Err(GitbakError::MaxRetriesExceeded {
                max_retries: self.config.max_retries,
                source: err,
            });
        }
        Ok(())
    }

    /// Emit a human-readable session summary, including merge
    /// instructions if a branch was created and (best effort) a
    /// decorated commit graph.
    pub async fn print_summary(&self, cancel: &CancellationToken) {
        let (Some(state), Some(mode)) = (&self.state, self.mode) else {
            self.logger.status_message("gitbak session ended before initialization completed");
            return;
        };
        summary::print_summary(state, mode, &self.config, self.runner.as_ref(), &self.logger, cancel).await;
    }

    /// The number of checkpoint commits recorded so far, for callers that
    /// want the raw count without the full summary (e.g. the Application
    /// Shell's exit logging).
    pub fn commits_made(&self) -> u64 {
        self.state.as_ref().map(|s| s.commits_made).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
