// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use super::*;
use gitbak_adapters::FakeRunner;
use gitbak_core::ConfigBuilder;

fn test_logger() -> (Logger, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("gitbak.log");
    let logger = Logger::init(Path::new("/repo"), Some(log_path), false).expect("init logger");
    (logger, dir)
}

fn config() -> Config {
    ConfigBuilder {
        repo_path: Some(PathBuf::from("/repo")),
        branch_name: Some("work".to_string()),
        commit_prefix: Some("[cp]".to_string()),
        ..ConfigBuilder::new()
    }
    .build()
    .expect("valid config")
}

#[tokio::test]
async fn new_branch_session_summary_includes_merge_instructions() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_decorated_graph(None);
    let mut state = SessionState::new("main");
    state.set_working_branch("work-120000");
    state.record_commit();
    state.record_commit();

    print_summary(
        &state,
        SessionMode::NewBranch,
        &config(),
        &runner,
        &logger,
        &CancellationToken::new(),
    )
    .await;

    // No panics, and the decorated-graph call happened (best effort).
    assert!(runner.calls().contains(&"decorated_graph".to_string()));
}

#[tokio::test]
async fn current_branch_session_summary_omits_merge_instructions() {
    let (logger, _dir) = test_logger();
    let runner = FakeRunner::new();
    runner.push_decorated_graph(Some("* abc123 (HEAD) checkpoint\n".to_string()));
    let state = SessionState::new("main");

    print_summary(
        &state,
        SessionMode::CurrentBranch,
        &config(),
        &runner,
        &logger,
        &CancellationToken::new(),
    )
    .await;

    assert!(!state.has_new_branch());
}

#[test]
fn format_duration_renders_each_bucket() {
    assert_eq!(format_duration(std::time::Duration::from_secs(5)), "5s");
    assert_eq!(format_duration(std::time::Duration::from_secs(65)), "1m 5s");
    assert_eq!(
        format_duration(std::time::Duration::from_secs(3661)),
        "1h 1m 1s"
    );
}
