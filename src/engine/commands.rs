// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reader command dialect.
//!
//! | Command | Wire form |
//! |---------|-----------|
//! | [`DeviceCommand::ClearAreas`] | `DEFAULTDAREA,0` |
//! | [`DeviceCommand::SetArea`] | `WD,<NNN>,<x1><y1><x2><y2>` |
//! | [`DeviceCommand::CodesToRead`] | `WP,250,<K>` |
//! | [`DeviceCommand::MaxDataMatrixCodes`] | `WP,253,<K>` |
//! | [`DeviceCommand::AllowReducedDetection`] | `WP,251,1` |
//! | [`DeviceCommand::Trigger`] | `LON` or `LON,<BB>` |
//! | [`DeviceCommand::ReadArea`] | `RD,<NNN>` |

use std::fmt;

use crate::config::AreaSpec;
use crate::engine::AreaNo;

/// Separates `code:area` pairs in a trigger response.
pub const RESULT_DELIMITER: char = '|';
/// Separates the code from its area number within a pair.
pub const AREA_SEPARATOR: char = ':';

const PARAM_CODES_TO_READ: u16 = 250;
const PARAM_REDUCED_DETECTION: u16 = 251;
const PARAM_MAX_DATAMATRIX_CODES: u16 = 253;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    ClearAreas,
    SetArea { area_no: AreaNo, area: AreaSpec },
    CodesToRead(usize),
    MaxDataMatrixCodes(usize),
    AllowReducedDetection,
    /// Scan once; bank `None` or `0` uses the reader's current bank
    Trigger { bank: Option<u8> },
    ReadArea(AreaNo),
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCommand::ClearAreas => write!(f, "DEFAULTDAREA,0"),
            DeviceCommand::SetArea { area_no, area } => {
                write!(f, "WD,{},{}", area_no, area.to_command())
            }
            DeviceCommand::CodesToRead(count) => write!(f, "WP,{},{}", PARAM_CODES_TO_READ, count),
            DeviceCommand::MaxDataMatrixCodes(count) => {
                write!(f, "WP,{},{}", PARAM_MAX_DATAMATRIX_CODES, count)
            }
            DeviceCommand::AllowReducedDetection => write!(f, "WP,{},1", PARAM_REDUCED_DETECTION),
            DeviceCommand::Trigger { bank } => match bank {
                Some(bank) if *bank > 0 => write!(f, "LON,{:02}", bank),
                _ => write!(f, "LON"),
            },
            DeviceCommand::ReadArea(area_no) => write!(f, "RD,{}", area_no),
        }
    }
}

/// One `code[:area]` pair from a trigger response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRead<'a> {
    pub code: &'a str,
    /// Raw area field; `"000"` when the pair carries none
    pub area: &'a str,
}

/// Splits a trigger response into its pairs.
///
/// ```
/// use luminary_inspect::engine::commands::{parse_trigger_response, ScanRead};
///
/// let reads = parse_trigger_response("ABC123:001|XYZ\r");
/// assert_eq!(reads, vec![
///     ScanRead { code: "ABC123", area: "001" },
///     ScanRead { code: "XYZ", area: "000" },
/// ]);
/// ```
pub fn parse_trigger_response(response: &str) -> Vec<ScanRead<'_>> {
    response
        .trim()
        .split(RESULT_DELIMITER)
        .map(|pair| {
            let mut parts = pair.trim().split(AREA_SEPARATOR);
            let code = parts.next().unwrap_or_default();
            let area = parts.next().unwrap_or("000");
            ScanRead { code, area }
        })
        .collect()
}
