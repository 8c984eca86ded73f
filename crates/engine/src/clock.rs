// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A tiny clock seam so the monitoring loop's timestamp formatting can be
//! driven deterministically from tests without freezing real time.

use chrono::Local;

/// Supplies the current wall-clock time to the supervisor.
///
/// Only two shapes are ever needed: the `YYYY-MM-DD HH:MM:SS` timestamp
/// embedded in a checkpoint commit message, and the zero-padded `HHMMSS`
/// suffix used to disambiguate a colliding branch name. Both are produced
/// here rather than scattered across callers so a test clock can fix both
/// at once.
pub trait Clock: Send + Sync {
    /// `YYYY-MM-DD HH:MM:SS`, local time, seconds precision.
    fn timestamp(&self) -> String;

    /// Zero-padded `HHMMSS`, local time — the branch-collision suffix.
    fn time_suffix(&self) -> String;
}

/// Reads the real system clock via `chrono::Local`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn time_suffix(&self) -> String {
        Local::now().format("%H%M%S").to_string()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::Clock;
    use parking_lot::Mutex;

    /// A clock that always returns the same fixed strings, so tests can
    /// assert on exact commit messages and branch-suffix collisions
    /// without racing the real wall clock.
    pub struct FakeClock {
        timestamp: Mutex<String>,
        time_suffix: Mutex<String>,
    }

    impl FakeClock {
        pub fn new(timestamp: impl Into<String>, time_suffix: impl Into<String>) -> Self {
            Self {
                timestamp: Mutex::new(timestamp.into()),
                time_suffix: Mutex::new(time_suffix.into()),
            }
        }

        pub fn set_timestamp(&self, value: impl Into<String>) {
            *self.timestamp.lock() = value.into();
        }

        pub fn set_time_suffix(&self, value: impl Into<String>) {
            *self.time_suffix.lock() = value.into();
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new("2026-07-27 10:00:00", "100000")
        }
    }

    impl Clock for FakeClock {
        fn timestamp(&self) -> String {
            self.timestamp.lock().clone()
        }

        fn time_suffix(&self) -> String {
            self.time_suffix.lock().clone()
        }
    }
}
