// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated operator intent for a single gitbak session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GitbakError;

/// The shortest interval gitbak will accept. Anything below this is almost
/// certainly a unit mistake (e.g. seconds passed where minutes are meant)
/// and would thrash the underlying VCS binary.
const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Validated configuration for a gitbak session.
///
/// Constructed once by the application shell via [`ConfigBuilder`] and
/// read-only thereafter. The supervisor may adopt a suffixed working
/// branch name during initialization (see [`crate::session::SessionState`]);
/// `branch_name` here is the operator's original request and never changes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path to the repository under management.
    pub repo_path: PathBuf,
    /// Polling interval between checkpoint attempts. Fractional minutes are
    /// supported by the builder and represented here with sub-second
    /// precision.
    pub interval: Duration,
    /// Branch to create or continue on.
    pub branch_name: String,
    /// Prefix embedded in every checkpoint commit's subject line.
    pub commit_prefix: String,
    /// Start a new branch for this session (mutually exclusive in spirit
    /// with `continue_session`; see [`ConfigBuilder::build`]).
    pub create_branch: bool,
    /// Resume numbering from the highest existing checkpoint on the
    /// current branch instead of creating a new one.
    pub continue_session: bool,
    /// Emit additional detail to the user-facing stream.
    pub verbose: bool,
    /// Emit a user-visible line on ticks with no changes (only takes
    /// effect together with `verbose`).
    pub show_no_changes: bool,
    /// Never prompt the user; prompts resolve to the conservative answer.
    pub non_interactive: bool,
    /// Maximum consecutive identical failures before the session aborts.
    /// Zero means unlimited.
    pub max_retries: u32,
    /// Explicit debug-log destination, overriding the derived default.
    pub log_file: Option<PathBuf>,
}

/// Builder that validates raw operator input into a [`Config`].
///
/// Kept as a distinct type from `Config` so that the one place that
/// resolves ambiguous input (e.g. `continue_session` and `create_branch`
/// both requested) is obvious and testable in isolation.
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    pub repo_path: Option<PathBuf>,
    pub interval_minutes: Option<f64>,
    pub branch_name: Option<String>,
    pub commit_prefix: Option<String>,
    pub create_branch: bool,
    /// Whether `create_branch` was explicitly requested by the operator,
    /// as opposed to left at its default. Only an explicit request
    /// conflicts fatally with `continue_session` (see `build`).
    pub create_branch_explicit: bool,
    pub continue_session: bool,
    pub verbose: bool,
    pub show_no_changes: bool,
    pub non_interactive: bool,
    pub max_retries: u32,
    pub log_file: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and freeze the builder into a [`Config`].
    ///
    /// Continuation mode implicitly disables branch creation (spec: "the
    /// source silently prefers continuation"). Gitbak additionally rejects
    /// the combination when `--create-branch` was *explicitly* passed
    /// alongside `--continue`, since that almost certainly indicates the
    /// operator meant one or the other, not "continue, but also branch."
    pub fn build(self) -> Result<Config, GitbakError> {
        let repo_path = self
            .repo_path
            .ok_or_else(|| GitbakError::InvalidConfiguration("repository path is required".into()))?;
        if !repo_path.is_absolute() {
            return Err(GitbakError::InvalidConfiguration(format!(
                "repository path must be absolute, got {}",
                repo_path.display()
            )));
        }

        let interval_minutes = self.interval_minutes.unwrap_or(5.0);
        if !(interval_minutes.is_finite()) || interval_minutes <= 0.0 {
            return Err(GitbakError::InvalidConfiguration(format!(
                "polling interval must be a positive number of minutes, got {interval_minutes}"
            )));
        }
        let interval = Duration::from_secs_f64(interval_minutes * 60.0);
        if interval < MIN_INTERVAL {
            return Err(GitbakError::InvalidConfiguration(format!(
                "polling interval {:?} is below the minimum of {:?}",
                interval, MIN_INTERVAL
            )));
        }

        let branch_name = self.branch_name.unwrap_or_else(|| "gitbak".to_string());
        if branch_name.trim().is_empty() {
            return Err(GitbakError::InvalidConfiguration(
                "branch name cannot be empty".into(),
            ));
        }

        let commit_prefix = self.commit_prefix.unwrap_or_else(|| "[gitbak]".to_string());
        if commit_prefix.trim().is_empty() {
            return Err(GitbakError::InvalidConfiguration(
                "commit message prefix cannot be empty".into(),
            ));
        }

        if self.continue_session && self.create_branch_explicit {
            return Err(GitbakError::InvalidConfiguration(
                "--continue and --create-branch were both requested explicitly; \
                 pick one session mode"
                    .into(),
            ));
        }

        // Continuation implicitly wins over an implicit (default) create_branch.
        let create_branch = self.create_branch && !self.continue_session;

        Ok(Config {
            repo_path,
            interval,
            branch_name,
            commit_prefix,
            create_branch,
            continue_session: self.continue_session,
            verbose: self.verbose,
            show_no_changes: self.show_no_changes,
            non_interactive: self.non_interactive,
            max_retries: self.max_retries,
            log_file: self.log_file,
        })
    }
}

impl Config {
    /// Convenience constructor mirroring [`ConfigBuilder::build`] for
    /// already-absolute, already-sane call sites (primarily tests).
    pub fn for_repo(repo_path: impl Into<PathBuf>) -> ConfigBuilder {
        ConfigBuilder {
            repo_path: Some(repo_path.into()),
            ..ConfigBuilder::new()
        }
    }

    /// The repository path as a borrowed [`Path`].
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
