// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for reader connection and command events.
//!
//! This module contains message types for logging events related to:
//! * Connection attempts and their outcome
//! * Individual commands sent to the reader
//! * Closing the command session

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A connection attempt is starting.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use luminary_inspect::observability::messages::device::Connecting;
///
/// let msg = Connecting {
///     addr: "192.168.100.100:9004",
///     attempt: 1,
///     attempts: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Connecting to [192.168.100.100:9004] (1/3)...");
/// ```
pub struct Connecting<'a> {
    pub addr: &'a str,
    pub attempt: u32,
    pub attempts: u32,
}

impl Display for Connecting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connecting to [{}] ({}/{})...",
            self.addr, self.attempt, self.attempts
        )
    }
}

impl StructuredLog for Connecting<'_> {
    fn log(&self) {
        tracing::info!(
            addr = self.addr,
            attempt = self.attempt,
            attempts = self.attempts,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "connect",
            span_name = name,
            addr = self.addr,
            attempt = self.attempt,
            attempts = self.attempts,
        )
    }
}

/// A connection attempt failed; another may follow.
///
/// # Log Level
/// `warn!` - Transient failure
pub struct ConnectAttemptFailed<'a> {
    pub addr: &'a str,
    pub attempt: u32,
    pub error: &'a dyn std::error::Error,
}

impl Display for ConnectAttemptFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connection attempt {} to [{}] failed: {}",
            self.attempt, self.addr, self.error
        )
    }
}

impl StructuredLog for ConnectAttemptFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            addr = self.addr,
            attempt = self.attempt,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "connect_failed",
            span_name = name,
            addr = self.addr,
            attempt = self.attempt,
        )
    }
}

/// Connected to the reader.
pub struct Connected<'a> {
    pub addr: &'a str,
    pub attempts: u32,
}

impl Display for Connected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connected to [{}] after {} attempt(s)", self.addr, self.attempts)
    }
}

impl StructuredLog for Connected<'_> {
    fn log(&self) {
        tracing::info!(addr = self.addr, attempts = self.attempts, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("connected", span_name = name, addr = self.addr)
    }
}

/// A command and the reader's answer.
///
/// # Log Level
/// `debug!` - Wire-level detail
pub struct CommandExecuted<'a> {
    pub command: &'a str,
    pub response: &'a str,
}

impl Display for CommandExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Command [{}] -> [{}]", self.command, self.response)
    }
}

impl StructuredLog for CommandExecuted<'_> {
    fn log(&self) {
        tracing::debug!(command = self.command, response = self.response, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("command", span_name = name, command = self.command)
    }
}

/// Closing the command session.
pub struct Disconnecting<'a> {
    pub addr: &'a str,
}

impl Display for Disconnecting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Disconnecting from [{}]...", self.addr)
    }
}

impl StructuredLog for Disconnecting<'_> {
    fn log(&self) {
        tracing::info!(addr = self.addr, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("disconnect", span_name = name, addr = self.addr)
    }
}

/// A transport failure left the session out of step with the reader. The
/// session is dropped and the next command opens a fresh one.
///
/// # Log Level
/// `warn!` - Recoverable failure
pub struct SessionReset<'a> {
    pub addr: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SessionReset<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropping session with [{}] after: {}",
            self.addr, self.error
        )
    }
}

impl StructuredLog for SessionReset<'_> {
    fn log(&self) {
        tracing::warn!(addr = self.addr, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("session_reset", span_name = name, addr = self.addr)
    }
}
