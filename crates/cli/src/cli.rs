// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface: flag parsing and validation into a
//! [`gitbak_core::Config`]. Everything `gitbak_core` deliberately stays
//! out of (flag syntax, `--help`/`--version` rendering, environment
//! loading) lives here instead.

use std::path::PathBuf;

use clap::Parser;
use gitbak_core::{Config, ConfigBuilder, GitbakError};

/// Run gitbak, a checkpoint supervisor that periodically commits
/// in-progress work on a dedicated branch.
#[derive(Debug, Parser)]
#[command(name = "gitbak", version, about, long_about = None)]
pub struct Cli {
    /// Repository to supervise. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Polling interval between checkpoint attempts, in minutes.
    #[arg(short = 'i', long = "interval", value_name = "MINUTES", default_value_t = 5.0)]
    pub interval: f64,

    /// Branch to create or continue on.
    #[arg(short = 'b', long = "branch", value_name = "NAME")]
    pub branch: Option<String>,

    /// Prefix embedded in every checkpoint commit's subject line.
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Start a new branch for this session.
    #[arg(short = 'n', long = "create-branch")]
    pub create_branch: bool,

    /// Resume numbering from the highest checkpoint already on the
    /// current branch instead of creating a new one.
    #[arg(short = 'c', long = "continue")]
    pub continue_session: bool,

    /// Emit additional detail to the terminal.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print a line on ticks that find nothing to commit (only takes
    /// effect together with `--verbose`).
    #[arg(long = "show-no-changes")]
    pub show_no_changes: bool,

    /// Never prompt; every prompt resolves to the conservative answer.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Maximum consecutive identical failures before the session aborts.
    /// Zero means unlimited.
    #[arg(short = 'r', long = "max-retries", value_name = "N", default_value_t = 0)]
    pub max_retries: u32,

    /// Write the debug log to this path instead of the derived default.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable ANSI color in gitbak's own terminal output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Validate the parsed flags into a [`Config`], resolving a relative
    /// or absent repository path against the current directory.
    pub fn into_config(self) -> Result<Config, GitbakError> {
        let repo_path = resolve_repo_path(self.path)?;
        ConfigBuilder {
            repo_path: Some(repo_path),
            interval_minutes: Some(self.interval),
            branch_name: self.branch,
            commit_prefix: self.prefix,
            create_branch: self.create_branch,
            create_branch_explicit: self.create_branch,
            continue_session: self.continue_session,
            verbose: self.verbose,
            show_no_changes: self.show_no_changes,
            non_interactive: self.non_interactive,
            max_retries: self.max_retries,
            log_file: self.log_file,
        }
        .build()
    }
}

/// Resolve `path` (relative, absolute, or absent) against the process's
/// current directory, since [`ConfigBuilder::build`] requires an
/// absolute repository path.
fn resolve_repo_path(path: Option<PathBuf>) -> Result<PathBuf, GitbakError> {
    let path = path.unwrap_or_else(|| PathBuf::from("."));
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|e| {
        GitbakError::InvalidConfiguration(format!("could not determine current directory: {e}"))
    })?;
    if path == PathBuf::from(".") {
        return Ok(cwd);
    }
    Ok(cwd.join(path))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
