// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::ChannelError;

/// A request/response command session with a code reader.
///
/// A channel is owned exclusively by one inspection run. Every command gets
/// exactly one response; a rejected or unanswered command is an `Err`, and the
/// device error code of the most recent rejection stays available through
/// [`CommandChannel::last_error`] for diagnostics.
#[async_trait]
pub trait CommandChannel: Send {
    /// Sends one command and waits for the reader's response.
    async fn exec(&mut self, command: &str) -> Result<String, ChannelError>;

    /// Device error code of the most recent failed command, if any.
    fn last_error(&self) -> Option<&str>;

    /// Ends the session. Closing an already closed channel is a no-op.
    async fn close(&mut self);
}
