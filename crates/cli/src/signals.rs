// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt/terminate/hangup signal handling for the Application Shell.
//! Any of the three means the same thing here: stop cleanly and hand
//! back control to whoever is waiting on the process.

use std::io;

use tokio::signal::unix::{signal, Signal, SignalKind};

/// The three signals that trigger a graceful shutdown.
pub struct Signals {
    interrupt: Signal,
    terminate: Signal,
    hangup: Signal,
}

impl Signals {
    /// Install handlers for SIGINT, SIGTERM, and SIGHUP.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    /// Resolve when any one of the installed signals is received.
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
            _ = self.hangup.recv() => {}
        }
    }
}
