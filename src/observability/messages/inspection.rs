// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the inspection cycle.
//!
//! This module contains message types for logging events related to:
//! * Profile selection and area assignment
//! * Reader configuration
//! * Trigger attempts and their outcome
//! * Per-area check failures and the final verdict
//! * Result image handling
//! * Fatal aborts

use crate::config::{AreaSpec, ComponentExpectation};
use crate::engine::AreaNo;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A luminary profile matched the run's component counts.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProfileSelected<'a> {
    pub luminary: &'a str,
    pub leds: u32,
    pub optics: u32,
}

impl Display for ProfileSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Selected [{}] profile for [{}] LEDs and [{}] optics",
            self.luminary, self.leds, self.optics
        )
    }
}

impl StructuredLog for ProfileSelected<'_> {
    fn log(&self) {
        tracing::info!(
            luminary = self.luminary,
            leds = self.leds,
            optics = self.optics,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "inspection",
            span_name = name,
            luminary = self.luminary,
            leds = self.leds,
            optics = self.optics,
        )
    }
}

/// Areas were numbered for the selected profile.
pub struct AreasAssigned {
    pub count: usize,
}

impl Display for AreasAssigned {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Assigned [{}] areas", self.count)
    }
}

/// The reader is about to be configured.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfiguringReader {
    pub areas: usize,
}

impl Display for ConfiguringReader {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Configuring the reader with [{}] areas...", self.areas)
    }
}

impl StructuredLog for ConfiguringReader {
    fn log(&self) {
        tracing::info!(areas = self.areas, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("configure", span_name = name, areas = self.areas)
    }
}

/// A trigger attempt is starting.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use luminary_inspect::observability::messages::inspection::TriggerAttempt;
///
/// let msg = TriggerAttempt { command: "LON,02", attempt: 2, attempts: 3 };
/// assert_eq!(msg.to_string(), "Triggering [LON,02] (2/3)...");
/// ```
pub struct TriggerAttempt<'a> {
    pub command: &'a str,
    pub attempt: u32,
    pub attempts: u32,
}

impl Display for TriggerAttempt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Triggering [{}] ({}/{})...",
            self.command, self.attempt, self.attempts
        )
    }
}

impl StructuredLog for TriggerAttempt<'_> {
    fn log(&self) {
        tracing::info!(
            command = self.command,
            attempt = self.attempt,
            attempts = self.attempts,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "trigger",
            span_name = name,
            command = self.command,
            attempt = self.attempt,
            attempts = self.attempts,
        )
    }
}

/// The trigger protocol moved between states.
///
/// # Log Level
/// `debug!` - Protocol detail
pub struct TriggerTransition<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub attempt: u32,
}

impl Display for TriggerTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Trigger {} -> {} (attempt {})", self.from, self.to, self.attempt)
    }
}

impl StructuredLog for TriggerTransition<'_> {
    fn log(&self) {
        tracing::debug!(
            from = self.from,
            to = self.to,
            attempt = self.attempt,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "trigger_transition",
            span_name = name,
            from = self.from,
            to = self.to,
        )
    }
}

/// The reader failed to answer a trigger; the attempt counts as an empty read.
///
/// # Log Level
/// `warn!` - Transient failure
pub struct TriggerCommandFailed<'a> {
    pub attempt: u32,
    pub error: &'a dyn std::error::Error,
}

impl Display for TriggerCommandFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Trigger attempt {} returned no data: {}",
            self.attempt, self.error
        )
    }
}

impl StructuredLog for TriggerCommandFailed<'_> {
    fn log(&self) {
        tracing::warn!(attempt = self.attempt, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("trigger_failed", span_name = name, attempt = self.attempt)
    }
}

/// Triggering reached a terminal state.
pub struct TriggerFinished<'a> {
    pub state: &'a str,
    pub attempts: u32,
    pub fulfilled: usize,
    pub total: usize,
}

impl Display for TriggerFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Triggering finished ({}) after {} attempt(s): {}/{} areas read",
            self.state, self.attempts, self.fulfilled, self.total
        )
    }
}

impl StructuredLog for TriggerFinished<'_> {
    fn log(&self) {
        tracing::info!(
            state = self.state,
            attempts = self.attempts,
            fulfilled = self.fulfilled,
            total = self.total,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "trigger_finished",
            span_name = name,
            state = self.state,
            attempts = self.attempts,
        )
    }
}

/// An area failed its check.
///
/// `found` is the non-empty code that was read, or `None` when nothing was read.
///
/// # Log Level
/// `warn!` - Inspection finding
///
/// # Example
/// ```
/// use luminary_inspect::config::{AreaSpec, ComponentExpectation};
/// use luminary_inspect::engine::AreaNo;
/// use luminary_inspect::observability::messages::inspection::AreaCheckFailed;
///
/// let component = ComponentExpectation::new("7001", "123", 1).unwrap();
/// let area = AreaSpec::new(10, 10, 20, 20);
/// let msg = AreaCheckFailed {
///     area_no: AreaNo::new(1).unwrap(),
///     component: &component,
///     area: &area,
///     found: None,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Failed check for component [7001/123/1] in area [10x10 20x20]: code not found."
/// );
/// ```
pub struct AreaCheckFailed<'a> {
    pub area_no: AreaNo,
    pub component: &'a ComponentExpectation,
    pub area: &'a AreaSpec,
    pub found: Option<&'a str>,
}

impl Display for AreaCheckFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed check for component [{}] in area [{}]: ",
            self.component, self.area
        )?;
        match self.found {
            Some(code) => write!(f, "invalid code found [{}].", code),
            None => write!(f, "code not found."),
        }
    }
}

impl StructuredLog for AreaCheckFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            area_no = %self.area_no,
            item = self.component.item.as_str(),
            material = self.component.material.as_str(),
            read_code = self.found.unwrap_or_default(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "area_check",
            span_name = name,
            area_no = %self.area_no,
            item = self.component.item.as_str(),
        )
    }
}

/// The verdict of a completed inspection.
pub struct VerdictReached<'a> {
    pub verdict: &'a str,
    pub total: usize,
    pub failed: usize,
}

impl Display for VerdictReached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Inspection verdict {}: {} of {} areas failed",
            self.verdict, self.failed, self.total
        )
    }
}

impl StructuredLog for VerdictReached<'_> {
    fn log(&self) {
        tracing::info!(
            verdict = self.verdict,
            total = self.total,
            failed = self.failed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("verdict", span_name = name, verdict = self.verdict)
    }
}

/// A result image file was written.
pub struct ImageSaved<'a> {
    pub path: &'a Path,
}

impl Display for ImageSaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Saved result image [{}]", self.path.display())
    }
}

impl StructuredLog for ImageSaved<'_> {
    fn log(&self) {
        tracing::info!(path = %self.path.display(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("image", span_name = name, path = %self.path.display())
    }
}

/// The run is aborted by a fatal error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct InspectionAborted<'a> {
    pub kind: &'a str,
    pub error: &'a dyn std::error::Error,
    pub last_device_error: Option<&'a str>,
}

impl Display for InspectionAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(code) = self.last_device_error {
            write!(f, " Last reader error: {}", code)?;
        }
        Ok(())
    }
}

impl StructuredLog for InspectionAborted<'_> {
    fn log(&self) {
        tracing::error!(
            kind = self.kind,
            last_device_error = self.last_device_error.unwrap_or_default(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("aborted", span_name = name, kind = self.kind)
    }
}
