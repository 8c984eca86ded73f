// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(coverage_nightly, coverage(off))]

//! A scriptable [`Prompter`] double that answers with a fixed, recorded
//! response instead of touching stdin.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::prompter::Prompter;

/// Test double for [`Prompter`]. Answers every `confirm` call with the
/// configured value and records the questions it was asked.
pub struct FakePrompter {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl FakePrompter {
    /// A double that always answers `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

#[async_trait]
impl Prompter for FakePrompter {
    async fn confirm(&self, question: &str) -> bool {
        self.asked.lock().push(question.to_string());
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_the_question_and_returns_the_configured_answer() {
        let fake = FakePrompter::answering(true);
        assert!(fake.confirm("reuse gitbak-wip?").await);
        assert_eq!(fake.asked(), vec!["reuse gitbak-wip?"]);
    }
}
