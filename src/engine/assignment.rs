// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Area assignment: from a luminary's declared layout and the run's
//! components to numbered reader areas.
//!
//! # Steps
//!
//! 1. **Count**: sum component quantities by item prefix (LED prefix first,
//!    then optics prefix).
//! 2. **Select**: take the first profile of the luminary whose LED and optics
//!    area totals equal those counts.
//! 3. **Validate**: every item of the profile must be supplied with a quantity
//!    equal to its area count.
//! 4. **Number**: LED items in declaration order, then optics items in
//!    declaration order, areas in list order, numbered `001`, `002`, ...
//!
//! Area numbers are positional. The reader is configured and answers in
//! terms of these numbers only, so the same profile and components always
//! yield the same numbering.

use std::collections::HashMap;

use crate::config::consts::MAX_AREAS;
use crate::config::{validate_layout, ComponentTable, Config, LuminaryProfile, RunRequest};
use crate::engine::{AreaNo, AreaResult, AreaResults};
use crate::errors::{InspectionError, ValidationError};
use crate::observability::messages::inspection::{AreasAssigned, ProfileSelected};
use crate::observability::messages::validation::LayoutProblem;
use crate::observability::messages::StructuredLog;

/// Component quantities by family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentCounts {
    pub leds: u32,
    pub optics: u32,
}

/// Sums quantities of components whose item starts with either prefix.
///
/// An item matching both prefixes counts as an LED.
pub fn count_components(
    components: &ComponentTable,
    leds_prefix: &str,
    optics_prefix: &str,
) -> ComponentCounts {
    components
        .iter()
        .fold(ComponentCounts::default(), |mut counts, component| {
            if component.item.starts_with(leds_prefix) {
                counts.leds = counts.leds.saturating_add(component.quantity);
            } else if component.item.starts_with(optics_prefix) {
                counts.optics = counts.optics.saturating_add(component.quantity);
            }
            counts
        })
}

/// Picks the first profile of `luminary` whose area totals match `counts`.
///
/// Returns the profile with its 1-based position in the luminary's list.
pub fn select_profile<'a>(
    luminaries: &'a HashMap<String, Vec<LuminaryProfile>>,
    luminary: &str,
    counts: ComponentCounts,
) -> Result<(usize, &'a LuminaryProfile), InspectionError> {
    let profiles = luminaries
        .get(luminary)
        .ok_or_else(|| InspectionError::UnknownLuminary {
            luminary: luminary.to_string(),
        })?;

    profiles
        .iter()
        .enumerate()
        .find(|(_, profile)| {
            profile.count_leds() == counts.leds as usize
                && profile.count_optics() == counts.optics as usize
        })
        .map(|(index, profile)| (index + 1, profile))
        .ok_or_else(|| InspectionError::NoMatchingProfile {
            luminary: luminary.to_string(),
            leds: counts.leds,
            optics: counts.optics,
        })
}

/// Validates `profile` against `components` and numbers its areas.
///
/// `number` is the profile's position within the luminary, for diagnostics.
pub fn assign_areas(
    luminary: &str,
    number: usize,
    profile: &LuminaryProfile,
    components: &ComponentTable,
) -> Result<AreaResults, InspectionError> {
    if let Err(errors) = validate_layout(profile, components) {
        for problem in &errors {
            LayoutProblem { luminary, problem }.log();
        }
        return Err(InspectionError::LayoutMismatch { errors });
    }

    let count = profile.total_areas();
    if count > MAX_AREAS {
        return Err(InspectionError::LayoutMismatch {
            errors: vec![ValidationError::TooManyAreas {
                luminary: luminary.to_string(),
                profile: number,
                count,
                max: MAX_AREAS,
            }],
        });
    }

    let mut results = AreaResults::new();
    let mut next: u16 = 1;

    for (group, layout) in profile.groups() {
        for (item, areas) in layout.iter() {
            let component = components.get(item).ok_or_else(|| InspectionError::LayoutMismatch {
                errors: vec![ValidationError::MissingComponent {
                    group,
                    item: item.to_string(),
                }],
            })?;
            for area in areas {
                // bounded by MAX_AREAS above
                if let Some(area_no) = AreaNo::new(next) {
                    results.insert(area_no, AreaResult::new(*area, component.clone()));
                }
                next += 1;
            }
        }
    }

    tracing::info!(areas = results.len(), "{}", AreasAssigned { count: results.len() });

    Ok(results)
}

/// Runs the complete assignment for a request. No reader communication
/// happens here, so every configuration mismatch surfaces before connecting.
pub fn plan_areas(config: &Config, request: &RunRequest) -> Result<AreaResults, InspectionError> {
    let counts = count_components(
        &request.components,
        &config.leds_prefix,
        &config.optics_prefix,
    );
    let (number, profile) = select_profile(&config.luminaries, &request.luminary, counts)?;

    ProfileSelected {
        luminary: &request.luminary,
        leds: counts.leds,
        optics: counts.optics,
    }
    .log();

    assign_areas(&request.luminary, number, profile, &request.components)
}
