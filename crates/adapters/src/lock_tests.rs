// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_lock_path_is_deterministic_and_distinct_per_repo() {
    let a = default_lock_path(Path::new("/repo/one"));
    let b = default_lock_path(Path::new("/repo/one"));
    let c = default_lock_path(Path::new("/repo/two"));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn acquire_creates_the_lock_file_and_records_our_pid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("repo.lock");
    let lock = InstanceLock::acquire_at(&path).expect("acquire");
    assert_eq!(lock.path(), path);
    assert_eq!(read_pid(&path), Some(std::process::id()));
}

#[test]
fn a_second_acquire_against_a_live_holder_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("repo.lock");
    let _first = InstanceLock::acquire_at(&path).expect("first acquire");

    let err = InstanceLock::acquire_at(&path).expect_err("second acquire should fail");
    match err {
        LockError::AlreadyHeld { pid } => assert_eq!(pid, Some(std::process::id())),
        LockError::Io(e) => panic!("unexpected io error: {e}"),
    }
}

#[test]
fn dropping_the_lock_releases_and_removes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("repo.lock");
    let lock = InstanceLock::acquire_at(&path).expect("acquire");
    drop(lock);
    assert!(!path.exists());
}

#[test]
fn a_lock_file_with_a_dead_pid_is_reclaimed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("repo.lock");
    // A PID essentially guaranteed not to correspond to a live process.
    std::fs::write(&path, "999999").expect("seed stale lock file");
    let lock = InstanceLock::acquire_at(&path).expect("reclaim stale lock");
    assert_eq!(read_pid(&path), Some(std::process::id()));
    drop(lock);
}

#[test]
fn is_process_alive_is_true_for_our_own_pid() {
    assert!(is_process_alive(std::process::id()));
}

#[test]
fn is_process_alive_is_false_for_an_unused_pid() {
    assert!(!is_process_alive(999_999));
}
