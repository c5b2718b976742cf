// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration and layout validation problems.
//!
//! This module contains message types for logging events related to:
//! * Structural problems in the configuration document
//! * Mismatches between the selected profile and the supplied components

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A problem found in the configuration document.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigProblem<'a> {
    pub source: &'a str,
    pub problem: &'a ValidationError,
}

impl Display for ConfigProblem<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid config [{}]: {}", self.source, self.problem)
    }
}

impl StructuredLog for ConfigProblem<'_> {
    fn log(&self) {
        tracing::error!(source = self.source, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "config_problem",
            span_name = name,
            source = self.source,
        )
    }
}

/// The selected profile does not match a supplied component.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use luminary_inspect::config::AreaGroup;
/// use luminary_inspect::errors::ValidationError;
/// use luminary_inspect::observability::messages::validation::LayoutProblem;
///
/// let problem = ValidationError::MissingComponent {
///     group: AreaGroup::Leds,
///     item: "7001".to_string(),
/// };
/// let msg = LayoutProblem { luminary: "LX-200", problem: &problem };
///
/// assert_eq!(msg.to_string(), "Layout [LX-200]: No LED component with item [7001].");
/// ```
pub struct LayoutProblem<'a> {
    pub luminary: &'a str,
    pub problem: &'a ValidationError,
}

impl Display for LayoutProblem<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Layout [{}]: {}", self.luminary, self.problem)
    }
}

impl StructuredLog for LayoutProblem<'_> {
    fn log(&self) {
        tracing::error!(luminary = self.luminary, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "layout_problem",
            span_name = name,
            luminary = self.luminary,
        )
    }
}
