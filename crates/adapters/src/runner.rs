// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Runner: the only place that touches the OS process layer.
//!
//! Every higher layer talks to the underlying version-control binary
//! through [`GitRunner`], never through `tokio::process::Command`
//! directly — that keeps the supervisor pure against this boundary and
//! lets tests inject [`crate::FakeRunner`] to drive failure-injection
//! scenarios deterministically.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use gitbak_core::CommandError;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// The ten sub-commands of the underlying VCS the supervisor uses,
/// abstracted behind domain-shaped methods rather than a raw argv.
///
/// The repository path is always passed as an explicit working-directory
/// selector (`-C <path>`) rather than relying on process-wide working
/// directory, which makes a single `GitRunner` safe to share across
/// concurrently supervised repositories.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// `rev-parse --is-inside-work-tree`. Exit 0 ⇒ true, 128 ⇒ false (not
    /// an error), anything else ⇒ `Err`.
    async fn is_work_tree(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<bool, CommandError>;

    /// `branch --show-current`.
    async fn current_branch(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError>;

    /// `status --porcelain`. Non-empty output means the tree has changes.
    async fn status_porcelain(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError>;

    /// `add .`
    async fn stage_all(&self, repo: &Path, cancel: &CancellationToken) -> Result<(), CommandError>;

    /// `commit -m <message>`
    async fn commit(
        &self,
        repo: &Path,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError>;

    /// `show-ref --verify --quiet refs/heads/<name>`. Exit 0 ⇒ exists,
    /// 1 ⇒ does not exist (not an error), anything else ⇒ `Err`.
    async fn branch_exists(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, CommandError>;

    /// `checkout -b <name>`
    async fn checkout_new_branch(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError>;

    /// `checkout <name>`
    async fn checkout(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError>;

    /// `log --pretty=format:%s`
    async fn commit_subjects(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError>;

    /// `log --graph --oneline --decorate --all --color=always -n 10`.
    /// Any failure is reported as `Ok(None)` — the summary simply omits
    /// the visualization rather than surfacing an error.
    async fn decorated_graph(&self, repo: &Path, cancel: &CancellationToken) -> Option<String>;

    /// Whether the configured binary can be found on the search path.
    fn binary_on_path(&self) -> bool;
}

/// `GitRunner` implementation that shells out to a real VCS binary
/// (`git` by default) via `tokio::process::Command`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, repo: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-C").arg(repo).args(args);
        cmd.stdin(Stdio::null());
        // Cancellation races this future in `exec`; dropping it must kill
        // the child promptly rather than leaving it to finish unobserved.
        cmd.kill_on_drop(true);
        cmd
    }

    /// Run `args` against `repo`, racing the subprocess against
    /// cancellation. `operation` is the logical sub-command name used to
    /// build the error's identity.
    async fn exec(
        &self,
        repo: &Path,
        operation: &str,
        args: &[&str],
        cancel: &CancellationToken,
    ) -> Result<Output, CommandError> {
        let mut cmd = self.command(repo, args);
        let full_args: Vec<String> = std::iter::once("-C".to_string())
            .chain(std::iter::once(repo.display().to_string()))
            .chain(args.iter().map(|a| a.to_string()))
            .collect();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CommandError {
                operation: operation.to_string(),
                args: full_args,
                stderr: String::new(),
                exit_code: None,
                cause: None,
            }),
            result = cmd.output() => {
                result.map_err(|e| CommandError {
                    operation: operation.to_string(),
                    args: full_args.clone(),
                    stderr: String::new(),
                    exit_code: None,
                    cause: Some(e),
                })
            }
        }
    }

    fn classify(operation: &str, args: Vec<String>, output: Output) -> Result<Output, CommandError> {
        if output.status.success() {
            return Ok(output);
        }
        Err(CommandError {
            operation: operation.to_string(),
            args,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            cause: None,
        })
    }
}

#[async_trait]
impl GitRunner for ProcessRunner {
    async fn is_work_tree(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<bool, CommandError> {
        let output = self
            .exec(repo, "rev-parse", &["rev-parse", "--is-inside-work-tree"], cancel)
            .await?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(128) => Ok(false),
            _ => Err(CommandError {
                operation: "rev-parse".to_string(),
                args: vec!["rev-parse".into(), "--is-inside-work-tree".into()],
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
                cause: None,
            }),
        }
    }

    async fn current_branch(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        let output = self
            .exec(repo, "branch", &["branch", "--show-current"], cancel)
            .await?;
        let output = Self::classify("branch", vec!["branch".into(), "--show-current".into()], output)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn status_porcelain(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        let output = self
            .exec(repo, "status", &["status", "--porcelain"], cancel)
            .await?;
        let output = Self::classify("status", vec!["status".into(), "--porcelain".into()], output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn stage_all(&self, repo: &Path, cancel: &CancellationToken) -> Result<(), CommandError> {
        let output = self.exec(repo, "add", &["add", "."], cancel).await?;
        Self::classify("add", vec!["add".into(), ".".into()], output)?;
        Ok(())
    }

    async fn commit(
        &self,
        repo: &Path,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        let output = self
            .exec(repo, "commit", &["commit", "-m", message], cancel)
            .await?;
        Self::classify(
            "commit",
            vec!["commit".into(), "-m".into(), message.into()],
            output,
        )?;
        Ok(())
    }

    async fn branch_exists(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, CommandError> {
        let refname = format!("refs/heads/{name}");
        let output = self
            .exec(
                repo,
                "show-ref",
                &["show-ref", "--verify", "--quiet", &refname],
                cancel,
            )
            .await?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(CommandError {
                operation: "show-ref".to_string(),
                args: vec![
                    "show-ref".into(),
                    "--verify".into(),
                    "--quiet".into(),
                    refname,
                ],
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
                cause: None,
            }),
        }
    }

    async fn checkout_new_branch(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        let output = self
            .exec(repo, "checkout", &["checkout", "-b", name], cancel)
            .await?;
        Self::classify(
            "checkout",
            vec!["checkout".into(), "-b".into(), name.into()],
            output,
        )?;
        Ok(())
    }

    async fn checkout(
        &self,
        repo: &Path,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        let output = self
            .exec(repo, "checkout", &["checkout", name], cancel)
            .await?;
        Self::classify("checkout", vec!["checkout".into(), name.into()], output)?;
        Ok(())
    }

    async fn commit_subjects(
        &self,
        repo: &Path,
        cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        let output = self
            .exec(repo, "log", &["log", "--pretty=format:%s"], cancel)
            .await?;
        let output = Self::classify(
            "log",
            vec!["log".into(), "--pretty=format:%s".into()],
            output,
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn decorated_graph(&self, repo: &Path, cancel: &CancellationToken) -> Option<String> {
        let args = [
            "log",
            "--graph",
            "--oneline",
            "--decorate",
            "--all",
            "--color=always",
            "-n",
            "10",
        ];
        let output = self.exec(repo, "log", &args, cancel).await.ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn binary_on_path(&self) -> bool {
        find_on_path(&self.binary)
    }
}

/// Whether `binary` resolves to an executable on `$PATH`.
fn find_on_path(binary: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir| is_executable(&dir, binary.as_ref()))
}

fn is_executable(dir: &Path, binary: &OsStr) -> bool {
    let candidate = dir.join(binary);
    candidate.is_file()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
