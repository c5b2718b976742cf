// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Command channel implementations.
//!
//! Every backend implements [`CommandChannel`](crate::traits::CommandChannel),
//! so the inspection engine never knows which transport it drives.
//!
//! # Available Backends
//!
//! ## TCP Backend
//! The reader's command port over a tokio `TcpStream`:
//! - **Framing**: `\r`-terminated ASCII commands and responses
//! - **Timeouts**: one per connect and per command
//! - **Errors**: `ER,...` responses become device errors and are kept as the
//!   session's last error code
//! - **Connect retries**: [`tcp::connect_with_retry`] applies the configured
//!   connect policy
//!
//! ## Scripted Backend (Test-Only)
//! An in-memory reader with scripted answers per command prefix, recording
//! every command it receives. Only available in test builds.
//!
//! # Examples
//!
//! ```rust,no_run
//! use luminary_inspect::backends::tcp::TcpCommandChannel;
//! use luminary_inspect::traits::CommandChannel;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut channel = TcpCommandChannel::connect("192.168.100.100:9004", Duration::from_secs(5)).await?;
//! let response = channel.exec("LON").await?;
//! channel.close().await;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
pub mod stub;
pub mod tcp;

#[cfg(test)]
pub use stub::ScriptedChannel;
pub use tcp::{connect_with_retry, TcpCommandChannel};
