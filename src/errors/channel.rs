// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by a reader command channel.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Cannot execute command [{command}]: not connected.")]
    NotConnected { command: String },

    #[error("Failed to connect to [{addr}]: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {after:?} waiting for a response to [{command}].")]
    Timeout { command: String, after: Duration },

    #[error("Reader rejected command [{command}] with error code {code}.")]
    Device { command: String, code: String },

    #[error("Connection closed by the reader while executing [{command}].")]
    Closed { command: String },

    #[error("I/O error while executing [{command}]: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl ChannelError {
    /// The device error code carried by a rejected command, if any.
    pub fn device_code(&self) -> Option<&str> {
        match self {
            ChannelError::Device { code, .. } => Some(code),
            _ => None,
        }
    }
}
