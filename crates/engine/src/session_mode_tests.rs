// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use super::*;
use gitbak_adapters::{FakePrompter, FakeRunner};
use gitbak_core::ConfigBuilder;

use crate::clock::fake::FakeClock;

fn test_logger() -> (Logger, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("gitbak.log");
    let logger = Logger::init(Path::new("/repo"), Some(log_path), false).expect("init logger");
    (logger, dir)
}

fn config_with(continue_session: bool, create_branch: bool, non_interactive: bool) -> gitbak_core::Config {
    ConfigBuilder {
        repo_path: Some(PathBuf::from("/repo")),
        branch_name: Some("work".to_string()),
        commit_prefix: Some("[cp]".to_string()),
        continue_session,
        create_branch,
        create_branch_explicit: create_branch,
        non_interactive,
        ..ConfigBuilder::new()
    }
    .build()
    .expect("valid config")
}

#[tokio::test]
async fn continue_mode_seeds_baseline_from_highest_checkpoint() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_commit_subjects(Ok("[cp] #2 - t\n[cp] #1 - t\n".to_string()));
    runner.push_current_branch(Ok("work".to_string()));
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::default();
    let config = config_with(true, false, true);

    let resolution = resolve(
        &config,
        "work",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert_eq!(resolution.mode, SessionMode::Continue);
    assert_eq!(resolution.baseline, 2);
    assert_eq!(resolution.working_branch, "work");
}

#[tokio::test]
async fn continue_mode_with_no_prior_checkpoints_seeds_zero() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_commit_subjects(Ok("Initial commit\n".to_string()));
    runner.push_current_branch(Ok("work".to_string()));
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::default();
    let config = config_with(true, false, true);

    let resolution = resolve(
        &config,
        "work",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert_eq!(resolution.baseline, 0);
}

#[tokio::test]
async fn new_branch_mode_checks_out_the_requested_name_when_free() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_status_porcelain(Ok(String::new()));
    runner.push_branch_exists(Ok(false));
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::default();
    let config = config_with(false, true, true);

    let resolution = resolve(
        &config,
        "main",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert_eq!(resolution.mode, SessionMode::NewBranch);
    assert_eq!(resolution.working_branch, "work");
    assert_eq!(resolution.baseline, 0);
    assert!(runner.calls().contains(&"checkout_new_branch".to_string()));
}

#[tokio::test]
async fn new_branch_mode_disambiguates_a_colliding_name_in_non_interactive_mode() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_status_porcelain(Ok(String::new()));
    runner.push_branch_exists(Ok(true));
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::new("2026-07-27 10:00:00", "153045");
    let config = config_with(false, true, true);

    let resolution = resolve(
        &config,
        "main",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert_eq!(resolution.working_branch, "work-153045");
    assert!(resolution.working_branch.starts_with("work-"));
    assert_eq!(
        resolution.working_branch.split('-').next_back().map(str::len),
        Some(6)
    );
}

#[tokio::test]
async fn new_branch_mode_commits_dirty_tree_when_prompt_is_affirmative() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_status_porcelain(Ok(" M a.txt\n".to_string()));
    runner.push_branch_exists(Ok(false));
    let prompter = FakePrompter::answering(true);
    let clock = FakeClock::default();
    let config = config_with(false, true, false);

    resolve(
        &config,
        "main",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert!(runner.calls().contains(&"stage_all".to_string()));
    assert!(runner.calls().iter().any(|c| c.starts_with("commit:")));
}

#[tokio::test]
async fn new_branch_mode_leaves_dirty_tree_uncommitted_when_prompt_declines() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_status_porcelain(Ok(" M a.txt\n".to_string()));
    runner.push_branch_exists(Ok(false));
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::default();
    let config = config_with(false, true, false);

    resolve(
        &config,
        "main",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert!(!runner.calls().iter().any(|c| c.starts_with("commit:")));
}

#[tokio::test]
async fn current_branch_mode_does_not_mutate_the_working_tree() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    let prompter = FakePrompter::answering(false);
    let clock = FakeClock::default();
    let config = config_with(false, false, true);

    let resolution = resolve(
        &config,
        "main",
        &runner,
        &prompter,
        &logger,
        &clock,
        &CancellationToken::new(),
    )
    .await
    .expect("resolve");

    assert_eq!(resolution.mode, SessionMode::CurrentBranch);
    assert_eq!(resolution.working_branch, "main");
    assert!(runner.calls().is_empty());
}
