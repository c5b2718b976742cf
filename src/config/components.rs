// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::InputError;

fn default_quantity() -> u32 {
    1
}

fn is_number(value: &str, max_digits: usize) -> bool {
    (1..=max_digits).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// An expected physical part for one inspection run.
///
/// `item` is a 1-4 digit item number, `material` a 1-12 digit material code
/// that a read code must contain for the part to pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComponentExpectation {
    pub item: String,
    #[serde(default)]
    pub material: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ComponentExpectation {
    /// Creates a validated component.
    pub fn new(
        item: impl Into<String>,
        material: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, InputError> {
        let component = Self {
            item: item.into(),
            material: material.into(),
            quantity,
        };
        component.validate()?;
        Ok(component)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !is_number(&self.item, 4) {
            return Err(InputError::InvalidItem {
                component: self.to_string(),
            });
        }
        if !is_number(&self.material, 12) {
            return Err(InputError::InvalidMaterial {
                component: self.to_string(),
            });
        }
        if self.quantity == 0 {
            return Err(InputError::InvalidQuantity {
                component: self.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for ComponentExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.item, self.material, self.quantity)
    }
}

/// Parses the `ITEM/MATERIAL[/QUANTITY]` command line form.
impl FromStr for ComponentExpectation {
    type Err = InputError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let mut parts = arg.split('/');
        let item = parts.next().unwrap_or_default();
        let material = parts.next().unwrap_or_default();
        let quantity = match parts.next() {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| InputError::InvalidQuantity {
                component: arg.to_string(),
            })?,
            None => default_quantity(),
        };
        Self::new(item, material, quantity)
    }
}

/// Components supplied for one run, keyed by item.
///
/// Declaring an item a second time replaces the earlier declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentTable(BTreeMap<String, ComponentExpectation>);

impl ComponentTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Validates and adds a component.
    pub fn add(&mut self, component: ComponentExpectation) -> Result<(), InputError> {
        component.validate()?;
        self.0.insert(component.item.clone(), component);
        Ok(())
    }

    pub fn get(&self, item: &str) -> Option<&ComponentExpectation> {
        self.0.get(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentExpectation> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<ComponentExpectation>> for ComponentTable {
    type Error = InputError;

    fn try_from(components: Vec<ComponentExpectation>) -> Result<Self, Self::Error> {
        let mut table = ComponentTable::new();
        for component in components {
            table.add(component)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_component_arg() {
        let component: ComponentExpectation = "7001/123456789/3".parse().unwrap();
        assert_eq!(component.item, "7001");
        assert_eq!(component.material, "123456789");
        assert_eq!(component.quantity, 3);
    }

    #[test]
    fn test_parse_defaults_quantity_to_one() {
        let component: ComponentExpectation = "6001/42".parse().unwrap();
        assert_eq!(component.quantity, 1);
        assert_eq!(component.to_string(), "6001/42/1");
    }

    #[test]
    fn test_rejects_invalid_components() {
        assert!(matches!(
            "70011/42".parse::<ComponentExpectation>(),
            Err(InputError::InvalidItem { .. })
        ));
        assert!(matches!(
            "A1/42".parse::<ComponentExpectation>(),
            Err(InputError::InvalidItem { .. })
        ));
        assert!(matches!(
            "7001".parse::<ComponentExpectation>(),
            Err(InputError::InvalidMaterial { .. })
        ));
        assert!(matches!(
            "7001/1234567890123".parse::<ComponentExpectation>(),
            Err(InputError::InvalidMaterial { .. })
        ));
        assert!(matches!(
            "7001/42/0".parse::<ComponentExpectation>(),
            Err(InputError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            "7001/42/-2".parse::<ComponentExpectation>(),
            Err(InputError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_table_replaces_repeated_items() {
        let mut table = ComponentTable::new();
        table.add("7001/11/1".parse().unwrap()).unwrap();
        table.add("7001/22/2".parse().unwrap()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("7001").unwrap().material, "22");
    }

    #[test]
    fn test_table_validates_deserialized_components() {
        let components: Vec<ComponentExpectation> =
            serde_json::from_str(r#"[{"item": "7001", "material": "12", "quantity": 0}]"#).unwrap();
        assert!(ComponentTable::try_from(components).is_err());
    }
}
