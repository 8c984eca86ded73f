// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn abs(p: &str) -> PathBuf {
    PathBuf::from(p)
}

#[test]
fn minimal_config_gets_sane_defaults() {
    let config = Config::for_repo(abs("/repo")).build().unwrap();
    assert_eq!(config.repo_path, abs("/repo"));
    assert_eq!(config.branch_name, "gitbak");
    assert_eq!(config.commit_prefix, "[gitbak]");
    assert!(!config.create_branch);
    assert!(!config.continue_session);
    assert_eq!(config.max_retries, 0);
}

#[test]
fn relative_repo_path_is_rejected() {
    let err = Config::for_repo(abs("relative/path")).build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}

#[test]
fn zero_interval_is_rejected() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.interval_minutes = Some(0.0);
    let err = builder.build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}

#[test]
fn sub_minimum_interval_is_rejected() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.interval_minutes = Some(0.0001);
    let err = builder.build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}

#[test]
fn fractional_interval_is_accepted_with_millisecond_precision() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.interval_minutes = Some(0.1);
    let config = builder.build().unwrap();
    assert_eq!(config.interval, Duration::from_secs(6));
}

#[test]
fn empty_branch_name_is_rejected() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.branch_name = Some("   ".to_string());
    let err = builder.build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}

#[test]
fn empty_commit_prefix_is_rejected() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.commit_prefix = Some("".to_string());
    let err = builder.build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}

#[test]
fn continue_session_silently_disables_implicit_create_branch() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.continue_session = true;
    builder.create_branch = true; // e.g. left at a CLI default
    builder.create_branch_explicit = false;
    let config = builder.build().unwrap();
    assert!(config.continue_session);
    assert!(!config.create_branch);
}

#[test]
fn continue_session_with_explicit_create_branch_is_rejected() {
    let mut builder = Config::for_repo(abs("/repo"));
    builder.continue_session = true;
    builder.create_branch = true;
    builder.create_branch_explicit = true;
    let err = builder.build().unwrap_err();
    assert!(matches!(err, GitbakError::InvalidConfiguration(_)));
}
