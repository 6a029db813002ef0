// src/dag/registry.rs

//! Name → unit lookup, built once before scheduling starts.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{ModschedError, Result};
use crate::unit::{Unit, UnitName};

/// Immutable set of registered units keyed by name.
///
/// "Immutable" refers to membership: no unit is added or removed after
/// construction. Units are still reachable mutably so their actions can run.
#[derive(Debug)]
pub struct Registry {
    units: HashMap<UnitName, Unit>,
    /// Names in registration order.
    order: Vec<UnitName>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names and dependencies on
    /// names that are not registered.
    pub fn new(units: Vec<Unit>) -> Result<Self> {
        let mut map: HashMap<UnitName, Unit> = HashMap::with_capacity(units.len());
        let mut order = Vec::with_capacity(units.len());

        for unit in units {
            let name = unit.name().to_string();
            if map.contains_key(&name) {
                return Err(ModschedError::DuplicateUnit(name));
            }
            order.push(name.clone());
            map.insert(name, unit);
        }

        for name in &order {
            let unit = &map[name];
            if let Some(missing) = unit.all_dependencies().find(|dep| !map.contains_key(*dep)) {
                return Err(ModschedError::UnknownDependency {
                    unit: name.clone(),
                    dependency: missing.clone(),
                });
            }
        }

        debug!(units = order.len(), "registry built");

        Ok(Self { units: map, order })
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Unit> {
        self.units.get_mut(name)
    }

    /// Unit names in the order they were registered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
