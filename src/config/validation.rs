// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration and layout validation.
//!
//! Two checks live here:
//!
//! 1. **Structural validation** ([`validate_config`]) runs once at load time
//!    and rejects documents the reader could never execute: empty component
//!    prefixes, luminaries without profiles, item keys that are not item
//!    numbers, rectangles that do not fit the 4-digit area format and
//!    profiles that exceed the reader's area capacity.
//! 2. **Layout validation** ([`validate_layout`]) runs once per inspection
//!    after a profile was selected and checks that every item the profile
//!    references was supplied with a quantity equal to its area count.
//!
//! Both collect every problem they find instead of stopping at the first.
//!
//! # Examples
//!
//! ```rust
//! use luminary_inspect::config::{validate_layout, AreaLayout, AreaSpec, ComponentTable, LuminaryProfile};
//! use luminary_inspect::errors::ValidationError;
//!
//! let area = AreaSpec::new(0, 0, 10, 10);
//! let profile = LuminaryProfile {
//!     leds: AreaLayout::from_entries(vec![("7001".to_string(), vec![area, area])]),
//!     optics: AreaLayout::new(),
//! };
//!
//! let mut components = ComponentTable::new();
//! components.add("7001/123/1".parse().unwrap()).unwrap();
//!
//! let errors = validate_layout(&profile, &components).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::QuantityMismatch { areas: 2, quantity: 1, .. }));
//! ```

use crate::config::consts::{MAX_AREAS, MAX_COORDINATE};
use crate::config::{AreaGroup, AreaSpec, ComponentTable, Config, LuminaryProfile};
use crate::errors::ValidationError;

/// Validates a loaded configuration document.
///
/// # Returns
///
/// * `Ok(())` - Every luminary profile can be sent to the reader
/// * `Err(Vec<ValidationError>)` - All problems found, luminaries in name order
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, prefix) in [
        ("leds_prefix", &config.leds_prefix),
        ("optics_prefix", &config.optics_prefix),
    ] {
        if prefix.is_empty() {
            errors.push(ValidationError::EmptyPrefix {
                field: field.to_string(),
            });
        }
    }

    let mut names: Vec<&String> = config.luminaries.keys().collect();
    names.sort();

    for name in names {
        let profiles = &config.luminaries[name];
        if profiles.is_empty() {
            errors.push(ValidationError::NoProfiles {
                luminary: name.clone(),
            });
        }
        for (index, profile) in profiles.iter().enumerate() {
            validate_profile(name, index + 1, profile, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(
    luminary: &str,
    number: usize,
    profile: &LuminaryProfile,
    errors: &mut Vec<ValidationError>,
) {
    let count = profile.total_areas();
    if count > MAX_AREAS {
        errors.push(ValidationError::TooManyAreas {
            luminary: luminary.to_string(),
            profile: number,
            count,
            max: MAX_AREAS,
        });
    }

    for (group, layout) in profile.groups() {
        for (item, areas) in layout.iter() {
            if !is_item_number(item) {
                errors.push(ValidationError::InvalidItemKey {
                    luminary: luminary.to_string(),
                    group,
                    item: item.to_string(),
                });
            }
            for area in areas {
                validate_area(luminary, item, area, errors);
            }
        }
    }
}

fn validate_area(luminary: &str, item: &str, area: &AreaSpec, errors: &mut Vec<ValidationError>) {
    let widest = [area.x1, area.y1, area.x2, area.y2]
        .into_iter()
        .max()
        .unwrap_or_default();
    if widest > MAX_COORDINATE {
        errors.push(ValidationError::CoordinateOutOfRange {
            luminary: luminary.to_string(),
            item: item.to_string(),
            value: widest,
        });
    }
    if area.x2 < area.x1 || area.y2 < area.y1 {
        errors.push(ValidationError::InvertedArea {
            luminary: luminary.to_string(),
            item: item.to_string(),
            area: area.to_string(),
        });
    }
}

fn is_item_number(item: &str) -> bool {
    (1..=4).contains(&item.len()) && item.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a selected profile against the components supplied for the run.
///
/// Every item referenced by the profile must be present, and its quantity
/// must equal the number of areas declared for it.
pub fn validate_layout(
    profile: &LuminaryProfile,
    components: &ComponentTable,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (group, layout) in profile.groups() {
        for (item, areas) in layout.iter() {
            check_item(group, item, areas.len(), components, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_item(
    group: AreaGroup,
    item: &str,
    areas: usize,
    components: &ComponentTable,
    errors: &mut Vec<ValidationError>,
) {
    match components.get(item) {
        None => errors.push(ValidationError::MissingComponent {
            group,
            item: item.to_string(),
        }),
        Some(component) if component.quantity as usize != areas => {
            errors.push(ValidationError::QuantityMismatch {
                group,
                item: item.to_string(),
                areas,
                quantity: component.quantity,
            })
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AreaLayout, ReaderConfig, TriggerConfig};
    use std::collections::HashMap;

    fn area() -> AreaSpec {
        AreaSpec::new(10, 10, 20, 20)
    }

    fn config_with(luminaries: HashMap<String, Vec<LuminaryProfile>>) -> Config {
        Config {
            bank: 0,
            leds_prefix: "7".to_string(),
            optics_prefix: "6".to_string(),
            reader: ReaderConfig {
                host: "localhost".to_string(),
                port: 9004,
                command_timeout_ms: 1000,
                connect_retry_count: 0,
                connect_retry_delay_ms: 0,
            },
            trigger: TriggerConfig::default(),
            images: None,
            luminaries,
        }
    }

    fn profile(leds: Vec<(&str, Vec<AreaSpec>)>, optics: Vec<(&str, Vec<AreaSpec>)>) -> LuminaryProfile {
        let to_layout = |entries: Vec<(&str, Vec<AreaSpec>)>| {
            AreaLayout::from_entries(
                entries
                    .into_iter()
                    .map(|(item, areas)| (item.to_string(), areas))
                    .collect(),
            )
        };
        LuminaryProfile {
            leds: to_layout(leds),
            optics: to_layout(optics),
        }
    }

    fn components(specs: &[&str]) -> ComponentTable {
        let mut table = ComponentTable::new();
        for spec in specs {
            table.add(spec.parse().unwrap()).unwrap();
        }
        table
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(HashMap::from([(
            "LX".to_string(),
            vec![profile(vec![("7001", vec![area()])], vec![("6001", vec![area()])])],
        )]));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_prefix_and_missing_profiles() {
        let mut config = config_with(HashMap::from([("LX".to_string(), vec![])]));
        config.optics_prefix.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::EmptyPrefix { field } if field == "optics_prefix"));
        assert!(matches!(&errors[1], ValidationError::NoProfiles { luminary } if luminary == "LX"));
    }

    #[test]
    fn test_bad_areas_are_all_reported() {
        let config = config_with(HashMap::from([(
            "LX".to_string(),
            vec![profile(
                vec![("7001", vec![AreaSpec::new(0, 0, 12000, 10)])],
                vec![("6x", vec![AreaSpec::new(50, 50, 40, 60)])],
            )],
        )]));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::CoordinateOutOfRange { value: 12000, .. }));
        assert!(matches!(errors[1], ValidationError::InvalidItemKey { group: AreaGroup::Optics, .. }));
        assert!(matches!(errors[2], ValidationError::InvertedArea { .. }));
    }

    #[test]
    fn test_profile_area_capacity() {
        let config = config_with(HashMap::from([(
            "LX".to_string(),
            vec![profile(vec![("7001", vec![area(); MAX_AREAS + 1])], vec![])],
        )]));

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::TooManyAreas { count, max: MAX_AREAS, .. } if count == MAX_AREAS + 1
        ));
    }

    #[test]
    fn test_layout_matches_components() {
        let profile = profile(
            vec![("7001", vec![area(), area()])],
            vec![("6001", vec![area()])],
        );
        let table = components(&["7001/111/2", "6001/222/1"]);
        assert!(validate_layout(&profile, &table).is_ok());
    }

    #[test]
    fn test_layout_reports_every_mismatch() {
        let profile = profile(
            vec![("7001", vec![area(), area()])],
            vec![("6001", vec![area()]), ("6002", vec![area()])],
        );
        let table = components(&["7001/111/1", "6001/222/1"]);

        let errors = validate_layout(&profile, &table).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::QuantityMismatch {
                    group: AreaGroup::Leds,
                    item: "7001".to_string(),
                    areas: 2,
                    quantity: 1,
                },
                ValidationError::MissingComponent {
                    group: AreaGroup::Optics,
                    item: "6002".to_string(),
                },
            ]
        );
        assert_eq!(errors[1].to_string(), "No optics component with item [6002].");
    }
}
