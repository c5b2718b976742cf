// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-run request: which luminary is inspected, which trigger bank is
//! used and which components are expected.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::{ComponentExpectation, ComponentTable};
use crate::errors::InputError;

/// Run input as stored in a JSON or YAML input file.
///
/// ```json
/// { "bank": 1, "luminary": "LX-200",
///   "components": [{ "item": "7001", "material": "123456", "quantity": 2 }] }
/// ```
///
/// A negative `bank` means "not set", matching the convention of the station
/// software that writes these files.
#[derive(Debug, Default, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub bank: Option<i32>,
    #[serde(default)]
    pub luminary: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentExpectation>,
}

/// Reads an input document; `.json` files are parsed as JSON, anything else as YAML.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<InputDocument, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| InputError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// A fully assembled inspection request.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub luminary: String,
    /// Trigger bank requested for this run; `None` falls back to the configured bank.
    pub bank: Option<u8>,
    pub components: ComponentTable,
}

impl RunRequest {
    /// Merges an optional input document with command line values.
    ///
    /// Command line values win over the document; components from both are
    /// merged by item, command line last.
    pub fn assemble(
        document: Option<InputDocument>,
        luminary: Option<String>,
        bank: Option<u8>,
        components: Vec<ComponentExpectation>,
    ) -> Result<Self, InputError> {
        let document = document.unwrap_or_default();

        let mut table = ComponentTable::new();
        for component in document.components.into_iter().chain(components) {
            table.add(component)?;
        }

        let document_bank = document
            .bank
            .filter(|bank| *bank >= 0)
            .and_then(|bank| u8::try_from(bank).ok());

        let luminary = luminary
            .or(document.luminary)
            .filter(|name| !name.is_empty())
            .ok_or(InputError::MissingLuminary)?;

        Ok(Self {
            luminary,
            bank: bank.or(document_bank),
            components: table,
        })
    }
}
