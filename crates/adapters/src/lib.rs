// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gitbak-adapters: the boundary between the supervisor and the outside
//! world — the version-control subprocess, the terminal, the lock file,
//! and the debug log.

pub mod lock;
pub mod logger;
pub mod prompter;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod runner_fake;
#[cfg(any(test, feature = "test-support"))]
pub mod prompter_fake;

pub use lock::{InstanceLock, LockError};
pub use logger::Logger;
pub use prompter::{InteractivePrompter, NonInteractivePrompter, Prompter};
pub use runner::{GitRunner, ProcessRunner};

#[cfg(any(test, feature = "test-support"))]
pub use prompter_fake::FakePrompter;
#[cfg(any(test, feature = "test-support"))]
pub use runner_fake::FakeRunner;
