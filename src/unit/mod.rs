// src/unit/mod.rs

//! Unit-of-work abstraction.
//!
//! A [`Unit`] is a named, opaque action plus two sets of dependency *names*:
//!
//! - hard dependencies must have succeeded before the unit may run;
//! - soft dependencies only have to be terminal (succeeded or failed).
//!
//! Units never hold references to each other. Dependencies are resolved by
//! name through the scheduler's registry.

use std::collections::BTreeSet;
use std::fmt;

pub mod action;
pub mod outcome;

pub use action::Action;
pub use outcome::Outcome;

/// Canonical unit name type used throughout the crate.
pub type UnitName = String;

/// A named unit of work with declared dependencies.
pub struct Unit {
    name: UnitName,
    hard_dependencies: BTreeSet<UnitName>,
    soft_dependencies: BTreeSet<UnitName>,
    action: Box<dyn Action>,
}

impl Unit {
    /// Create a unit with no dependencies.
    pub fn new(name: impl Into<UnitName>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            hard_dependencies: BTreeSet::new(),
            soft_dependencies: BTreeSet::new(),
            action: Box::new(action),
        }
    }

    /// Add a single hard dependency.
    pub fn hard_dependency(mut self, name: impl Into<UnitName>) -> Self {
        self.hard_dependencies.insert(name.into());
        self
    }

    /// Add a single soft dependency.
    pub fn soft_dependency(mut self, name: impl Into<UnitName>) -> Self {
        self.soft_dependencies.insert(name.into());
        self
    }

    pub fn with_hard_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UnitName>,
    {
        self.hard_dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_soft_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UnitName>,
    {
        self.soft_dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hard_dependencies(&self) -> &BTreeSet<UnitName> {
        &self.hard_dependencies
    }

    pub fn soft_dependencies(&self) -> &BTreeSet<UnitName> {
        &self.soft_dependencies
    }

    /// Every dependency name, hard first.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &UnitName> {
        self.hard_dependencies
            .iter()
            .chain(self.soft_dependencies.iter())
    }

    /// Run the unit's action.
    ///
    /// Callers (the scheduler) are responsible for invoking this at most
    /// once per run.
    pub fn execute(&mut self) -> Outcome {
        self.action.execute()
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name)
            .field("hard_dependencies", &self.hard_dependencies)
            .field("soft_dependencies", &self.soft_dependencies)
            .finish_non_exhaustive()
    }
}
