// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session-mode resolution: the one-time `initialize` phase that picks
//! exactly one of the three mutually exclusive initialization paths
//! before the monitoring loop starts.

use std::path::Path;

use gitbak_adapters::{GitRunner, Logger, Prompter};
use gitbak_core::{Config, GitbakError};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;

/// Which of the three initialization paths a session resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Counter seeded from the highest existing checkpoint on the current
    /// branch; branch creation implicitly disabled.
    Continue,
    /// A new (possibly disambiguated) branch was checked out for this
    /// session.
    NewBranch,
    /// No working-tree mutation; checkpoints are recorded on whatever
    /// branch was already checked out.
    CurrentBranch,
}

/// Outcome of resolving a session's mode: which mode was chosen, the final
/// working branch, and the counter baseline (0 outside continuation mode).
pub struct Resolution {
    pub mode: SessionMode,
    pub working_branch: String,
    pub baseline: u64,
}

const PRE_SESSION_COMMIT_MESSAGE: &str = "Manual commit before starting gitbak session";

/// Resolve and apply one of the three session-initialization paths.
///
/// On return, the repository is checked out on the branch the session
/// will record checkpoints on; in `NewBranch` mode that branch has just
/// been created. This is the only place in the supervisor that mutates
/// the working tree or checks out a branch before the monitoring loop
/// begins.
pub async fn resolve(
    config: &Config,
    original_branch: &str,
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    logger: &Logger,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) -> Result<Resolution, GitbakError> {
    if config.continue_session {
        return resolve_continue(config, runner, logger, cancel).await;
    }
    if config.create_branch {
        return resolve_new_branch(
            config,
            original_branch,
            runner,
            prompter,
            logger,
            clock,
            cancel,
        )
        .await;
    }
    resolve_current_branch(original_branch, logger)
}

async fn resolve_continue(
    config: &Config,
    runner: &dyn GitRunner,
    logger: &Logger,
    cancel: &CancellationToken,
) -> Result<Resolution, GitbakError> {
    let subjects = runner
        .commit_subjects(config.repo_path(), cancel)
        .await
        .map_err(GitbakError::from)?;
    let baseline = gitbak_core::highest_checkpoint(&subjects, &config.commit_prefix);
    logger.status(&format!(
        "continuing session: next checkpoint will be #{}",
        baseline + 1
    ));
    // The caller already knows the current branch; continuation never
    // checks anything out, so the working branch is whatever the
    // repository is already on.
    let working_branch = runner
        .current_branch(config.repo_path(), cancel)
        .await
        .map_err(GitbakError::from)?;
    Ok(Resolution {
        mode: SessionMode::Continue,
        working_branch,
        baseline,
    })
}

#[allow(clippy::too_many_arguments)]
async fn resolve_new_branch(
    config: &Config,
    original_branch: &str,
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    logger: &Logger,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) -> Result<Resolution, GitbakError> {
    let repo = config.repo_path();
    maybe_commit_dirty_tree(repo, runner, prompter, logger, config.non_interactive, cancel).await?;

    let branch_name = disambiguate_branch_name(
        repo,
        &config.branch_name,
        runner,
        prompter,
        logger,
        clock,
        config.non_interactive,
        cancel,
    )
    .await?;

    runner
        .checkout_new_branch(repo, &branch_name, cancel)
        .await
        .map_err(GitbakError::from)?;
    logger.status(&format!(
        "created and checked out branch `{branch_name}` (from `{original_branch}`)"
    ));

    Ok(Resolution {
        mode: SessionMode::NewBranch,
        working_branch: branch_name,
        baseline: 0,
    })
}

async fn maybe_commit_dirty_tree(
    repo: &Path,
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    logger: &Logger,
    non_interactive: bool,
    cancel: &CancellationToken,
) -> Result<(), GitbakError> {
    let status = runner.status_porcelain(repo, cancel).await.map_err(GitbakError::from)?;
    if status.trim().is_empty() {
        return Ok(());
    }

    let should_commit = if non_interactive {
        false
    } else {
        prompter
            .confirm("working tree has uncommitted changes; commit them before starting?")
            .await
    };

    if !should_commit {
        logger.status("leaving pre-existing changes uncommitted; they will be picked up by the first checkpoint");
        return Ok(());
    }

    runner.stage_all(repo, cancel).await.map_err(GitbakError::from)?;
    runner
        .commit(repo, PRE_SESSION_COMMIT_MESSAGE, cancel)
        .await
        .map_err(GitbakError::from)?;
    logger.status("recorded a manual commit of pre-session changes");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn disambiguate_branch_name(
    repo: &Path,
    requested: &str,
    runner: &dyn GitRunner,
    prompter: &dyn Prompter,
    logger: &Logger,
    clock: &dyn Clock,
    non_interactive: bool,
    cancel: &CancellationToken,
) -> Result<String, GitbakError> {
    let exists = runner
        .branch_exists(repo, requested, cancel)
        .await
        .map_err(GitbakError::from)?;
    if !exists {
        return Ok(requested.to_string());
    }

    let should_suffix = if non_interactive {
        true
    } else {
        prompter
            .confirm(&format!(
                "branch `{requested}` already exists; use a disambiguated name instead?"
            ))
            .await
    };

    if !should_suffix {
        // The operator explicitly wants the existing branch reused; the
        // subsequent checkout-new-branch call will then fail and surface
        // that as a `SubprocessFailed` error, which is the correct
        // behavior — gitbak never force-overwrites an existing branch.
        return Ok(requested.to_string());
    }

    let suffixed = format!("{requested}-{}", clock.time_suffix());
    logger.status(&format!("branch `{requested}` exists; using `{suffixed}` instead"));
    Ok(suffixed)
}

fn resolve_current_branch(original_branch: &str, logger: &Logger) -> Result<Resolution, GitbakError> {
    logger.status(&format!(
        "recording checkpoints on the current branch `{original_branch}`"
    ));
    Ok(Resolution {
        mode: SessionMode::CurrentBranch,
        working_branch: original_branch.to_string(),
        baseline: 0,
    })
}

#[cfg(test)]
#[path = "session_mode_tests.rs"]
mod tests;
