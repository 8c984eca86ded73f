// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn success_maps_to_exit_zero() {
    assert_eq!(exit_code_for(&Ok(())), EXIT_SUCCESS);
}

#[test]
fn cancellation_maps_to_exit_zero() {
    assert_eq!(exit_code_for(&Err(GitbakError::Cancelled)), EXIT_SUCCESS);
}

#[test]
fn a_fatal_error_maps_to_exit_one() {
    let err = GitbakError::InvalidConfiguration("boom".into());
    assert_eq!(exit_code_for(&Err(err)), EXIT_FATAL_ERROR);
}
