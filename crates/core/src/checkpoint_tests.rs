// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn format_matches_spec_shape() {
    let msg = format_commit_message("[cp]", 3, "2026-07-27 10:00:00");
    assert_eq!(msg, "[cp] #3 - 2026-07-27 10:00:00");
}

#[test]
fn highest_checkpoint_no_matches_is_zero() {
    let subjects = "Initial commit\nAdd README\n";
    assert_eq!(highest_checkpoint(subjects, "[cp]"), 0);
}

#[test]
fn highest_checkpoint_finds_max_out_of_order() {
    let subjects = "[cp] #2 - 2026-07-27 10:00:00\n\
                    [cp] #5 - 2026-07-27 10:05:00\n\
                    [cp] #1 - 2026-07-27 09:55:00\n";
    assert_eq!(highest_checkpoint(subjects, "[cp]"), 5);
}

#[test]
fn highest_checkpoint_ignores_other_prefixes() {
    let subjects = "[other] #99 - 2026-07-27 10:00:00\n[cp] #1 - 2026-07-27 09:55:00\n";
    assert_eq!(highest_checkpoint(subjects, "[cp]"), 1);
}

#[test]
fn highest_checkpoint_escapes_prefix_regex_metacharacters() {
    let subjects = "(wip) #4 - 2026-07-27 10:00:00\n";
    assert_eq!(highest_checkpoint(subjects, "(wip)"), 4);
}

#[yare::parameterized(
    single_digit = { "[cp] #7 - now\n", 7 },
    multi_digit  = { "[cp] #123 - now\n", 123 },
)]
fn highest_checkpoint_digit_widths(subjects: &str, expected: u64) {
    assert_eq!(highest_checkpoint(subjects, "[cp]"), expected);
}
