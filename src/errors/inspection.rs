// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fatal errors that abort an inspection run.
//!
//! A completed inspection is never an error, whatever its verdict. Everything
//! in [`InspectionError`] ends the run with a single diagnostic line and a
//! non-zero exit status after the reader channel has been closed.

use std::path::PathBuf;

use thiserror::Error;

use crate::errors::config::join_errors;
use crate::errors::{ChannelError, ConfigError, InputError, ValidationError};

#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("Unknown luminary [{luminary}].")]
    UnknownLuminary { luminary: String },

    #[error("No config for [{leds}] LEDs and [{optics}] optics in [{luminary}].")]
    NoMatchingProfile {
        luminary: String,
        leds: u32,
        optics: u32,
    },

    #[error("Layout does not match the supplied components: {}", join_errors(errors))]
    LayoutMismatch { errors: Vec<ValidationError> },

    #[error("Failed to execute command [{command}]: {source}")]
    Command {
        command: String,
        #[source]
        source: ChannelError,
    },

    #[error("Failed to connect to the reader at [{addr}] after {attempts} attempt(s): {source}")]
    ConnectFailed {
        addr: String,
        attempts: u32,
        #[source]
        source: ChannelError,
    },

    #[error("Failed to read areas: {response}")]
    AreaReadback { response: String },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl InspectionError {
    /// Short classification used in the fatal diagnostic line.
    pub fn kind(&self) -> &'static str {
        match self {
            InspectionError::UnknownLuminary { .. }
            | InspectionError::NoMatchingProfile { .. }
            | InspectionError::LayoutMismatch { .. }
            | InspectionError::Config(_) => "configuration",
            InspectionError::Input(_) => "input",
            InspectionError::Command { .. }
            | InspectionError::ConnectFailed { .. }
            | InspectionError::AreaReadback { .. } => "device",
            InspectionError::Image(_) => "image",
        }
    }
}

/// Errors from locating, annotating, or persisting the result image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("No images found in [{}].", dir.display())]
    NoImage { dir: PathBuf },

    #[error("Image file operation failed on [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process image [{}]: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
