// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable end-of-session summary: commit count, working branch,
//! merge instructions when a branch was created, and — best effort — a
//! compact visualization of the last ten commits across all branches.

use gitbak_adapters::{GitRunner, Logger};
use gitbak_core::{Config, SessionState};
use tokio_util::sync::CancellationToken;

use crate::session_mode::SessionMode;

/// Print the session summary to the user stream.
///
/// Any failure retrieving the decorated commit graph simply omits that
/// section; it is never surfaced as an error.
pub async fn print_summary(
    state: &SessionState,
    mode: SessionMode,
    config: &Config,
    runner: &dyn GitRunner,
    logger: &Logger,
    cancel: &CancellationToken,
) {
    let elapsed = state.started_at.elapsed();
    logger.status_message("");
    logger.status_message("gitbak session summary");
    logger.status_message("-----------------------");
    logger.status_message(&format!(
        "checkpoint commits recorded: {}",
        state.commits_made
    ));
    logger.status_message(&format!("working branch: {}", state.working_branch));
    logger.status_message(&format!("elapsed: {}", format_duration(elapsed)));

    if mode == SessionMode::NewBranch && state.has_new_branch() {
        logger.status_message("");
        logger.status_message(&format!(
            "a new branch was created for this session. To bring the checkpoints back onto `{}`:",
            state.original_branch
        ));
        logger.status_message(&format!(
            "  git checkout {} && git merge {}      # keep every checkpoint commit",
            state.original_branch, state.working_branch
        ));
        logger.status_message(&format!(
            "  git checkout {} && git merge --squash {}   # collapse into one commit",
            state.original_branch, state.working_branch
        ));
    }

    if let Some(graph) = runner.decorated_graph(config.repo_path(), cancel).await {
        if !graph.trim().is_empty() {
            logger.status_message("");
            logger.status_message("recent history:");
            logger.status_message(&graph);
        }
    }
}

fn format_duration(elapsed: std::time::Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
