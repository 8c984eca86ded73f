// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint commit numbering: message format and continuation scanning.

use regex::Regex;

/// Build a checkpoint commit's subject line.
///
/// `timestamp` is pre-formatted by the caller (local time, seconds
/// precision, `YYYY-MM-DD HH:MM:SS`) — this crate has no clock of its own.
pub fn format_commit_message(prefix: &str, n: u64, timestamp: &str) -> String {
    format!("{prefix} #{n} - {timestamp}")
}

/// Scan newline-separated commit subjects for the highest checkpoint number
/// whose message matches `prefix`, returning 0 if none is found.
///
/// Used to seed the counter in continuation mode: the next checkpoint
/// emitted is `highest_checkpoint(...) + 1`. A malformed (unparseable)
/// prefix is treated the same as "no matches" rather than panicking —
/// this function is never on the fatal-error path, it only affects where
/// numbering resumes.
pub fn highest_checkpoint(subjects: &str, prefix: &str) -> u64 {
    let pattern = format!(r"{} #(\d+)", regex::escape(prefix));
    let Ok(re) = Regex::new(&pattern) else {
        return 0;
    };

    subjects
        .lines()
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
