// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-run area state: area numbers, the expectation bound to each area and
//! the code the reader returned for it.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::{AreaSpec, ComponentExpectation, OverwritePolicy};

/// Reader area number, rendered as three zero-padded digits.
///
/// `000` is the reader's "no area" marker and is never a valid area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AreaNo(u16);

impl AreaNo {
    /// Highest number that still renders as three digits.
    pub const MAX: u16 = 999;

    pub fn new(number: u16) -> Option<Self> {
        (1..=Self::MAX).contains(&number).then_some(Self(number))
    }

    /// Parses exactly three decimal digits. `"000"` yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse::<u16>().ok().and_then(Self::new)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for AreaNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Outcome of checking one area's code against its expected material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaValidity {
    Valid,
    /// Nothing was read in the area
    NotFound,
    /// A code was read but it does not contain the expected material
    InvalidCode(String),
}

impl AreaValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, AreaValidity::Valid)
    }
}

/// One scan area, the component expected in it and the code read there.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaResult {
    pub area: AreaSpec,
    pub component: ComponentExpectation,
    read_code: Option<String>,
}

impl AreaResult {
    pub fn new(area: AreaSpec, component: ComponentExpectation) -> Self {
        Self {
            area,
            component,
            read_code: None,
        }
    }

    pub fn read_code(&self) -> Option<&str> {
        self.read_code.as_deref()
    }

    /// A non-empty code has been read for this area.
    pub fn is_fulfilled(&self) -> bool {
        self.read_code().is_some_and(|code| !code.is_empty())
    }

    /// Stores a code read by a trigger attempt according to `policy`.
    ///
    /// Returns whether the stored code changed.
    pub fn record(&mut self, code: &str, policy: OverwritePolicy) -> bool {
        if policy == OverwritePolicy::KeepNonEmpty && code.is_empty() {
            return false;
        }
        if self.read_code() == Some(code) {
            return false;
        }
        self.read_code = Some(code.to_string());
        true
    }

    /// Valid iff a non-empty code was read and it contains the expected
    /// material as a literal, case-sensitive substring.
    pub fn validity(&self) -> AreaValidity {
        match self.read_code() {
            Some(code) if !code.is_empty() => {
                if code.contains(self.component.material.as_str()) {
                    AreaValidity::Valid
                } else {
                    AreaValidity::InvalidCode(code.to_string())
                }
            }
            _ => AreaValidity::NotFound,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validity().is_valid()
    }
}

/// All areas of one run, ordered by area number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaResults(BTreeMap<AreaNo, AreaResult>);

impl AreaResults {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, area_no: AreaNo, result: AreaResult) {
        self.0.insert(area_no, result);
    }

    pub fn get(&self, area_no: AreaNo) -> Option<&AreaResult> {
        self.0.get(&area_no)
    }

    pub fn get_mut(&mut self, area_no: AreaNo) -> Option<&mut AreaResult> {
        self.0.get_mut(&area_no)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AreaNo, &AreaResult)> {
        self.0.iter().map(|(area_no, result)| (*area_no, result))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fulfilled_count(&self) -> usize {
        self.0.values().filter(|r| r.is_fulfilled()).count()
    }

    pub fn all_fulfilled(&self) -> bool {
        self.0.values().all(AreaResult::is_fulfilled)
    }
}
