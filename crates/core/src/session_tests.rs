// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_session_starts_on_original_branch_with_no_commits() {
    let state = SessionState::new("main");
    assert_eq!(state.original_branch, "main");
    assert_eq!(state.working_branch, "main");
    assert_eq!(state.commits_made, 0);
    assert!(!state.has_new_branch());
}

#[test]
fn next_sequence_is_one_more_than_commits_made() {
    let mut state = SessionState::new("main");
    assert_eq!(state.next_sequence(), 1);
    state.record_commit();
    assert_eq!(state.next_sequence(), 2);
    state.record_commit();
    assert_eq!(state.commits_made, 2);
    assert_eq!(state.next_sequence(), 3);
}

#[test]
fn seeding_counter_resumes_numbering() {
    let mut state = SessionState::new("main");
    state.seed_counter(5);
    assert_eq!(state.next_sequence(), 6);
}

#[test]
fn adopting_new_branch_is_detected() {
    let mut state = SessionState::new("main");
    state.set_working_branch("gitbak");
    assert!(state.has_new_branch());
    assert_eq!(state.original_branch, "main");
}

#[test]
fn reruns_after_cancellation_before_first_tick_keep_zero_baseline() {
    // Cancelling before the first tick, then re-running with
    // continue-session set, must produce the exact same commit counter
    // baseline.
    let first_run = SessionState::new("main");
    assert_eq!(first_run.commits_made, 0);

    let second_run = SessionState::new("main");
    assert_eq!(second_run.commits_made, first_run.commits_made);
}
