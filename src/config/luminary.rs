// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Luminary layout types: scan rectangles and the per-variant profiles that
//! group them by component item.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular scan region in reader image coordinates.
///
/// Coordinates are serialized to the reader as four zero-padded 4-digit
/// numbers, so each must stay within `0..=9999` (checked by config validation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AreaSpec {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl AreaSpec {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The 16-digit rectangle argument used by area commands.
    ///
    /// ```
    /// use luminary_inspect::config::AreaSpec;
    ///
    /// assert_eq!(AreaSpec::new(10, 20, 300, 4000).to_command(), "0010002003004000");
    /// ```
    pub fn to_command(&self) -> String {
        format!(
            "{:04}{:04}{:04}{:04}",
            self.x1, self.y1, self.x2, self.y2
        )
    }

    /// Parses the 16-digit rectangle format returned by the reader.
    pub fn from_command(value: &str) -> Option<Self> {
        let digits = value.as_bytes().get(..16)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let field = |range: std::ops::Range<usize>| {
            digits[range]
                .iter()
                .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'))
        };
        Some(Self {
            x1: field(0..4),
            y1: field(4..8),
            x2: field(8..12),
            y2: field(12..16),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.x1 == 0 && self.y1 == 0 && self.x2 == 0 && self.y2 == 0
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }
}

impl fmt::Display for AreaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}x{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Which component family an area list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaGroup {
    Leds,
    Optics,
}

impl fmt::Display for AreaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaGroup::Leds => write!(f, "LED"),
            AreaGroup::Optics => write!(f, "optics"),
        }
    }
}

/// Item → area list mapping that keeps the order in which the configuration
/// document declares its items.
///
/// Area numbering is positional, so the declaration order is part of the
/// contract with the reader and must survive deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaLayout(Vec<(String, Vec<AreaSpec>)>);

impl AreaLayout {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_entries(entries: Vec<(String, Vec<AreaSpec>)>) -> Self {
        Self(entries)
    }

    /// Appends an item, replacing the areas of an already declared item in place.
    pub fn insert(&mut self, item: impl Into<String>, areas: Vec<AreaSpec>) {
        let item = item.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == item) {
            Some(entry) => entry.1 = areas,
            None => self.0.push((item, areas)),
        }
    }

    /// Items and their areas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AreaSpec])> {
        self.0
            .iter()
            .map(|(item, areas)| (item.as_str(), areas.as_slice()))
    }

    /// Total number of areas across all items.
    pub fn area_count(&self) -> usize {
        self.0.iter().map(|(_, areas)| areas.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AreaLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LayoutVisitor;

        impl<'de> Visitor<'de> for LayoutVisitor {
            type Value = AreaLayout;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of component items to lists of areas")
            }

            fn visit_map<A>(self, mut map: A) -> Result<AreaLayout, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, Vec<AreaSpec>)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((item, areas)) = map.next_entry::<String, Vec<AreaSpec>>()? {
                    if entries.iter().any(|(existing, _)| *existing == item) {
                        return Err(de::Error::custom(format!(
                            "item [{}] is declared more than once",
                            item
                        )));
                    }
                    entries.push((item, areas));
                }
                Ok(AreaLayout(entries))
            }
        }

        deserializer.deserialize_map(LayoutVisitor)
    }
}

/// Declared layout for one physical product variant.
///
/// A luminary name maps to several profiles; the one whose LED and optics area
/// totals match the run's component counts is used.
///
/// # Example
/// ```yaml
/// leds:
///   "7001": [{x1: 10, y1: 10, x2: 100, y2: 100}]
/// optics:
///   "6001": [{x1: 200, y1: 10, x2: 300, y2: 100}]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LuminaryProfile {
    #[serde(default)]
    pub leds: AreaLayout,
    #[serde(default)]
    pub optics: AreaLayout,
}

impl LuminaryProfile {
    pub fn count_leds(&self) -> usize {
        self.leds.area_count()
    }

    pub fn count_optics(&self) -> usize {
        self.optics.area_count()
    }

    pub fn total_areas(&self) -> usize {
        self.count_leds() + self.count_optics()
    }

    /// Both layouts in numbering order: LEDs first, then optics.
    pub fn groups(&self) -> [(AreaGroup, &AreaLayout); 2] {
        [
            (AreaGroup::Leds, &self.leds),
            (AreaGroup::Optics, &self.optics),
        ]
    }
}
