// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn no_color_flag_always_disables_colorizing() {
    assert!(!should_colorize(true));
}

#[test]
fn red_is_a_no_op_when_not_colorizing() {
    assert_eq!(red("boom", false), "boom");
}

#[test]
fn red_wraps_with_ansi_codes_when_colorizing() {
    assert_eq!(red("boom", true), "\x1b[31mboom\x1b[0m");
}

#[test]
fn yellow_wraps_with_ansi_codes_when_colorizing() {
    assert_eq!(yellow("careful", true), "\x1b[33mcareful\x1b[0m");
}
