// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! TCP command channel for SR-series code readers.
//!
//! Commands are sent as ASCII text terminated by `\r`; each response is read
//! up to the next `\r`. A response of the form `ER,<command>,<code>` is a
//! rejection and is returned as [`ChannelError::Device`].
//!
//! A timeout or broken read leaves a late response in flight. The session is
//! dropped at that point and the next command reconnects, so a response is
//! never paired with the wrong command.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::ReaderConfig;
use crate::engine::{Retried, RetryExhausted, RetryPolicy};
use crate::errors::{ChannelError, InspectionError};
use crate::observability::messages::device::{
    CommandExecuted, ConnectAttemptFailed, Connected, Connecting, Disconnecting, SessionReset,
};
use crate::observability::messages::StructuredLog;
use crate::traits::CommandChannel;

const TERMINATOR: u8 = b'\r';
const ERROR_PREFIX: &str = "ER,";

#[derive(Debug)]
pub struct TcpCommandChannel {
    addr: String,
    stream: Option<BufReader<TcpStream>>,
    timeout: Duration,
    last_error: Option<String>,
    /// Set when the session was dropped after a transport failure
    reconnect: bool,
}

impl TcpCommandChannel {
    /// Opens a session; `timeout` bounds the connect and every command.
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, ChannelError> {
        Ok(Self {
            addr: addr.to_string(),
            stream: Some(Self::open(addr, timeout).await?),
            timeout,
            last_error: None,
            reconnect: false,
        })
    }

    async fn open(addr: &str, timeout: Duration) -> Result<BufReader<TcpStream>, ChannelError> {
        match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(BufReader::new(stream)),
            Ok(Err(source)) => Err(ChannelError::Connect {
                addr: addr.to_string(),
                source,
            }),
            Err(_) => Err(ChannelError::Connect {
                addr: addr.to_string(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            }),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn round_trip(
        stream: &mut BufReader<TcpStream>,
        command: &str,
        timeout: Duration,
    ) -> Result<String, ChannelError> {
        let io_error = |source: io::Error| ChannelError::Io {
            command: command.to_string(),
            source,
        };

        let mut frame = Vec::with_capacity(command.len() + 1);
        frame.extend_from_slice(command.as_bytes());
        frame.push(TERMINATOR);
        stream.get_mut().write_all(&frame).await.map_err(io_error)?;
        stream.get_mut().flush().await.map_err(io_error)?;

        let mut buffer = Vec::new();
        let read = tokio::time::timeout(timeout, stream.read_until(TERMINATOR, &mut buffer))
            .await
            .map_err(|_| ChannelError::Timeout {
                command: command.to_string(),
                after: timeout,
            })?
            .map_err(io_error)?;

        if read == 0 {
            return Err(ChannelError::Closed {
                command: command.to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&buffer).trim().to_string())
    }
}

/// Error code of an `ER,<command>,<code>` response.
fn rejection_code(response: &str) -> Option<&str> {
    let rest = response.strip_prefix(ERROR_PREFIX)?;
    Some(rest.rsplit(',').next().unwrap_or(rest))
}

#[async_trait]
impl CommandChannel for TcpCommandChannel {
    async fn exec(&mut self, command: &str) -> Result<String, ChannelError> {
        if self.stream.is_none() && self.reconnect {
            self.stream = Some(Self::open(&self.addr, self.timeout).await?);
            self.reconnect = false;
            Connected {
                addr: &self.addr,
                attempts: 1,
            }
            .log();
        }

        let stream = self.stream.as_mut().ok_or_else(|| ChannelError::NotConnected {
            command: command.to_string(),
        })?;

        let response = match Self::round_trip(stream, command, self.timeout).await {
            Ok(response) => response,
            Err(error) => {
                if matches!(
                    error,
                    ChannelError::Timeout { .. } | ChannelError::Io { .. } | ChannelError::Closed { .. }
                ) {
                    SessionReset {
                        addr: &self.addr,
                        error: &error,
                    }
                    .log();
                    if let Some(stream) = self.stream.take() {
                        // the reader may already be gone
                        let _ = stream.into_inner().shutdown().await;
                    }
                    self.reconnect = true;
                }
                return Err(error);
            }
        };
        CommandExecuted {
            command,
            response: &response,
        }
        .log();

        if let Some(code) = rejection_code(&response) {
            self.last_error = Some(code.to_string());
            return Err(ChannelError::Device {
                command: command.to_string(),
                code: code.to_string(),
            });
        }
        Ok(response)
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    async fn close(&mut self) {
        self.reconnect = false;
        if let Some(stream) = self.stream.take() {
            Disconnecting { addr: &self.addr }.log();
            if let Err(e) = stream.into_inner().shutdown().await {
                tracing::debug!(addr = %self.addr, error = %e, "Shutdown after close failed");
            }
        }
    }
}

/// Connects to the configured reader, retrying per its connect policy.
pub async fn connect_with_retry(config: &ReaderConfig) -> Result<TcpCommandChannel, InspectionError> {
    let addr = config.address();
    let timeout = config.command_timeout();
    let policy = RetryPolicy::new(config.connect_retry_count, config.connect_retry_delay());
    let attempts = policy.attempts();

    let outcome = policy
        .execute(|attempt| {
            let addr = &addr;
            async move {
                Connecting {
                    addr,
                    attempt,
                    attempts,
                }
                .log();
                let result = TcpCommandChannel::connect(addr, timeout).await;
                if let Err(error) = &result {
                    ConnectAttemptFailed {
                        addr,
                        attempt,
                        error,
                    }
                    .log();
                }
                result
            }
        })
        .await;

    match outcome {
        Ok(Retried { value, attempts }) => {
            Connected {
                addr: &addr,
                attempts,
            }
            .log();
            Ok(value)
        }
        Err(RetryExhausted { error, attempts }) => Err(InspectionError::ConnectFailed {
            addr,
            attempts,
            source: error,
        }),
    }
}
