// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::AreaGroup;

/// Problems found while validating a configuration document or a luminary
/// layout against the components supplied for a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A component prefix used to classify items is empty
    EmptyPrefix {
        /// Name of the configuration field
        field: String,
    },
    /// A luminary declares no layout profiles at all
    NoProfiles {
        /// The luminary name
        luminary: String,
    },
    /// A layout references an item key that is not a 1-4 digit number
    InvalidItemKey {
        luminary: String,
        group: AreaGroup,
        item: String,
    },
    /// An area coordinate does not fit the 4-digit device representation
    CoordinateOutOfRange {
        luminary: String,
        item: String,
        value: u32,
    },
    /// An area whose second corner lies above or left of the first
    InvertedArea {
        luminary: String,
        item: String,
        area: String,
    },
    /// A profile declares more areas than the reader can hold
    TooManyAreas {
        luminary: String,
        profile: usize,
        count: usize,
        max: usize,
    },
    /// The selected profile references an item absent from the component table
    MissingComponent { group: AreaGroup, item: String },
    /// The component quantity differs from the number of declared areas
    QuantityMismatch {
        group: AreaGroup,
        item: String,
        areas: usize,
        quantity: u32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPrefix { field } => {
                write!(f, "Component prefix '{}' must not be empty", field)
            }
            ValidationError::NoProfiles { luminary } => {
                write!(f, "Luminary [{}] declares no layout profiles", luminary)
            }
            ValidationError::InvalidItemKey {
                luminary,
                group,
                item,
            } => {
                write!(
                    f,
                    "Luminary [{}] declares {} item [{}] which is not a 1-4 digit item number",
                    luminary, group, item
                )
            }
            ValidationError::CoordinateOutOfRange {
                luminary,
                item,
                value,
            } => {
                write!(
                    f,
                    "Luminary [{}] item [{}] has coordinate {} which exceeds 9999",
                    luminary, item, value
                )
            }
            ValidationError::InvertedArea {
                luminary,
                item,
                area,
            } => {
                write!(
                    f,
                    "Luminary [{}] item [{}] has inverted area [{}]",
                    luminary, item, area
                )
            }
            ValidationError::TooManyAreas {
                luminary,
                profile,
                count,
                max,
            } => {
                write!(
                    f,
                    "Luminary [{}] profile #{} declares {} areas, the reader supports at most {}",
                    luminary, profile, count, max
                )
            }
            ValidationError::MissingComponent { group, item } => {
                write!(f, "No {} component with item [{}].", group, item)
            }
            ValidationError::QuantityMismatch {
                group,
                item,
                areas,
                quantity,
            } => {
                write!(
                    f,
                    "Areas and quantity mismatch for {} item [{}]: {} areas, quantity {}.",
                    group, item, areas, quantity
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No config file found, looked for: {}", join_paths(searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation failed: {}", join_errors(errors))]
    Invalid { errors: Vec<ValidationError> },
}

/// Errors raised while assembling the run request from arguments and input files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input file [{}]: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid component item [{component}].")]
    InvalidItem { component: String },

    #[error("Invalid component material [{component}].")]
    InvalidMaterial { component: String },

    #[error("Invalid component quantity [{component}].")]
    InvalidQuantity { component: String },

    #[error("No luminary given.")]
    MissingLuminary,
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
