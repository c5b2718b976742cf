// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and,
//! where the event is worth correlating, [`StructuredLog`] to emit it with
//! structured fields at its fixed level.
//!
//! * `device` - Reader connection and command events
//! * `inspection` - Area assignment, trigger attempts, verdicts, images
//! * `validation` - Configuration and layout validation problems

use tracing::Span;

pub mod device;
pub mod inspection;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emits the message as a tracing event.
    fn log(&self);

    /// Creates a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
