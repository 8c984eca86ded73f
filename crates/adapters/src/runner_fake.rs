// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(coverage_nightly, coverage(off))]

//! A scriptable [`GitRunner`] double used to drive the Session Supervisor
//! through deterministic sequences of successes and errors — including
//! heterogeneous failure sequences that exercise the retry classifier —
//! without ever shelling out to a real VCS binary.

use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;
use gitbak_core::CommandError;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::runner::GitRunner;

fn fake_error(operation: &str, stderr: &str) -> CommandError {
    CommandError {
        operation: operation.to_string(),
        args: vec![operation.to_string()],
        stderr: stderr.to_string(),
        exit_code: Some(1),
        cause: None,
    }
}

#[derive(Default)]
struct Inner {
    calls: Vec<String>,
    is_work_tree: VecDeque<Result<bool, CommandError>>,
    current_branch: VecDeque<Result<String, CommandError>>,
    status_porcelain: VecDeque<Result<String, CommandError>>,
    stage_all: VecDeque<Result<(), CommandError>>,
    commit: VecDeque<Result<(), CommandError>>,
    branch_exists: VecDeque<Result<bool, CommandError>>,
    checkout_new_branch: VecDeque<Result<(), CommandError>>,
    checkout: VecDeque<Result<(), CommandError>>,
    commit_subjects: VecDeque<Result<String, CommandError>>,
    decorated_graph: VecDeque<Option<String>>,
    binary_on_path: bool,
}

/// Test double for [`GitRunner`]. Each `push_*` method enqueues one
/// response; calls consume the queue in FIFO order. A method called with
/// an empty queue falls back to a permissive default (a passing probe, an
/// empty status, a no-op write) so tests only need to script the
/// responses their scenario actually cares about.
pub struct FakeRunner {
    inner: Mutex<Inner>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                binary_on_path: true,
                ..Inner::default()
            }),
        }
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_is_work_tree(&self, result: Result<bool, CommandError>) {
        self.inner.lock().is_work_tree.push_back(result);
    }

    pub fn push_current_branch(&self, result: Result<String, CommandError>) {
        self.inner.lock().current_branch.push_back(result);
    }

    pub fn push_status_porcelain(&self, result: Result<String, CommandError>) {
        self.inner.lock().status_porcelain.push_back(result);
    }

    pub fn push_stage_all(&self, result: Result<(), CommandError>) {
        self.inner.lock().stage_all.push_back(result);
    }

    pub fn push_commit(&self, result: Result<(), CommandError>) {
        self.inner.lock().commit.push_back(result);
    }

    pub fn push_commit_error(&self, operation: &str, stderr: &str) {
        self.push_commit(Err(fake_error(operation, stderr)));
    }

    pub fn push_branch_exists(&self, result: Result<bool, CommandError>) {
        self.inner.lock().branch_exists.push_back(result);
    }

    pub fn push_checkout_new_branch(&self, result: Result<(), CommandError>) {
        self.inner.lock().checkout_new_branch.push_back(result);
    }

    pub fn push_checkout(&self, result: Result<(), CommandError>) {
        self.inner.lock().checkout.push_back(result);
    }

    pub fn push_commit_subjects(&self, result: Result<String, CommandError>) {
        self.inner.lock().commit_subjects.push_back(result);
    }

    pub fn push_decorated_graph(&self, value: Option<String>) {
        self.inner.lock().decorated_graph.push_back(value);
    }

    pub fn set_binary_on_path(&self, value: bool) {
        self.inner.lock().binary_on_path = value;
    }

    /// Calls recorded so far, in invocation order, named by method.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().calls.clone()
    }

    fn record(&self, call: &str) {
        self.inner.lock().calls.push(call.to_string());
    }
}

#[async_trait]
impl GitRunner for FakeRunner {
    async fn is_work_tree(&self, _repo: &Path, _cancel: &CancellationToken) -> Result<bool, CommandError> {
        self.record("is_work_tree");
        self.inner
            .lock()
            .is_work_tree
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn current_branch(
        &self,
        _repo: &Path,
        _cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        self.record("current_branch");
        self.inner
            .lock()
            .current_branch
            .pop_front()
            .unwrap_or_else(|| Ok("main".to_string()))
    }

    async fn status_porcelain(
        &self,
        _repo: &Path,
        _cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        self.record("status_porcelain");
        self.inner
            .lock()
            .status_porcelain
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn stage_all(&self, _repo: &Path, _cancel: &CancellationToken) -> Result<(), CommandError> {
        self.record("stage_all");
        self.inner.lock().stage_all.pop_front().unwrap_or(Ok(()))
    }

    async fn commit(
        &self,
        _repo: &Path,
        message: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        self.record(&format!("commit:{message}"));
        self.inner.lock().commit.pop_front().unwrap_or(Ok(()))
    }

    async fn branch_exists(
        &self,
        _repo: &Path,
        _name: &str,
        _cancel: &CancellationToken,
    ) -> Result<bool, CommandError> {
        self.record("branch_exists");
        self.inner
            .lock()
            .branch_exists
            .pop_front()
            .unwrap_or(Ok(false))
    }

    async fn checkout_new_branch(
        &self,
        _repo: &Path,
        _name: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        self.record("checkout_new_branch");
        self.inner
            .lock()
            .checkout_new_branch
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn checkout(
        &self,
        _repo: &Path,
        _name: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), CommandError> {
        self.record("checkout");
        self.inner.lock().checkout.pop_front().unwrap_or(Ok(()))
    }

    async fn commit_subjects(
        &self,
        _repo: &Path,
        _cancel: &CancellationToken,
    ) -> Result<String, CommandError> {
        self.record("commit_subjects");
        self.inner
            .lock()
            .commit_subjects
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn decorated_graph(&self, _repo: &Path, _cancel: &CancellationToken) -> Option<String> {
        self.record("decorated_graph");
        self.inner
            .lock()
            .decorated_graph
            .pop_front()
            .unwrap_or(None)
    }

    fn binary_on_path(&self) -> bool {
        self.inner.lock().binary_on_path
    }
}
