// src/dag/report.rs

//! Final state of a scheduler run plus a per-unit log for diagnostics.

use std::collections::BTreeSet;
use std::fmt;

use crate::unit::{Outcome, UnitName};

/// How a unit reached its terminal state.
///
/// For dependency purposes everything except `Succeeded` counts as failed.
/// The variants exist so logs and summaries can tell a unit that failed on
/// its own from one that was never attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// Action ran and returned `Success`.
    Succeeded,
    /// Action ran and returned `Error`.
    Errored,
    /// Action ran and returned `StopDependencyChain`.
    StoppedChain,
    /// Never executed because a hard dependency failed.
    Skipped { failed_dependency: UnitName },
    /// Never executed because it exceeded the re-queue limit.
    Stalled { requeues: usize },
}

impl UnitStatus {
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => UnitStatus::Succeeded,
            Outcome::Error => UnitStatus::Errored,
            Outcome::StopDependencyChain => UnitStatus::StoppedChain,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UnitStatus::Succeeded)
    }

    /// Whether the unit's action was actually invoked.
    pub fn was_executed(&self) -> bool {
        matches!(
            self,
            UnitStatus::Succeeded | UnitStatus::Errored | UnitStatus::StoppedChain
        )
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Succeeded => write!(f, "succeeded"),
            UnitStatus::Errored => write!(f, "failed with an error"),
            UnitStatus::StoppedChain => write!(f, "stopped its dependency chain"),
            UnitStatus::Skipped { failed_dependency } => {
                write!(f, "skipped (hard dependency '{failed_dependency}' failed)")
            }
            UnitStatus::Stalled { requeues } => {
                write!(f, "stalled after {requeues} re-queues")
            }
        }
    }
}

/// One entry of the per-unit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord {
    pub name: UnitName,
    pub status: UnitStatus,
}

/// Result of a complete scheduler run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Units that finished with `Success`.
    pub completed: BTreeSet<UnitName>,
    /// Units that errored, stopped their chain, or were skipped/stalled.
    pub failed: BTreeSet<UnitName>,
    /// Terminal transitions in the order they happened.
    pub records: Vec<UnitRecord>,
    /// A stop request ended the run before every unit settled.
    pub interrupted: bool,
}

impl RunReport {
    /// `true` if every unit succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }

    pub fn status_of(&self, name: &str) -> Option<&UnitStatus> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.status)
    }

    /// Names of units whose action ran, in execution order.
    pub fn executed(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status.was_executed())
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Units skipped because of an upstream failure, with the dependency
    /// that caused the skip.
    pub fn skipped(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter_map(|r| match &r.status {
                UnitStatus::Skipped { failed_dependency } => {
                    Some((r.name.as_str(), failed_dependency.as_str()))
                }
                _ => None,
            })
            .collect()
    }
}
