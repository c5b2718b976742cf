// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging of an inspection run. Message types follow a
//! struct-based pattern with a `Display` implementation so that:
//!
//! * Magic strings are not scattered throughout the codebase
//! * Every event carries the same structured fields wherever it is emitted
//! * Log wording can change in one place
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::device` - Reader connection and command events
//! * `messages::inspection` - Area assignment, triggering and verdict events
//! * `messages::validation` - Configuration and layout validation problems
//!
//! # Usage
//!
//! ```rust
//! use luminary_inspect::observability::messages::{device::Connecting, StructuredLog};
//!
//! let msg = Connecting {
//!     addr: "192.168.100.100:9004",
//!     attempt: 1,
//!     attempts: 3,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
