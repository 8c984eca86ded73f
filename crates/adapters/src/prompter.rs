// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmation prompts: the one piece of interactive terminal I/O the
//! Application Shell needs before it does anything destructive (reusing
//! an existing working branch under continuation mode).

use async_trait::async_trait;
use std::io::{self, Write};

/// Asks the operator a yes/no question and reports their answer.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Present `question` and return whether the operator confirmed.
    async fn confirm(&self, question: &str) -> bool;
}

/// Reads a line from stdin; any answer starting with `y`/`Y` confirms,
/// anything else (including EOF or a read error) declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractivePrompter;

#[async_trait]
impl Prompter for InteractivePrompter {
    async fn confirm(&self, question: &str) -> bool {
        print!("{question} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(
            line.trim().chars().next().map(|c| c.to_ascii_lowercase()),
            Some('y')
        )
    }
}

/// Always declines. Used whenever `--non-interactive` is set or stdin
/// isn't a terminal, so an unattended run never blocks waiting for input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

#[async_trait]
impl Prompter for NonInteractivePrompter {
    async fn confirm(&self, _question: &str) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "prompter_tests.rs"]
mod tests;
