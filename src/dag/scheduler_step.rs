// src/dag/scheduler_step.rs

//! Step-by-step execution result types for the scheduler.

use crate::dag::readiness::WaitKind;
use crate::unit::{Outcome, UnitName};

/// What a single scheduler iteration did with the candidate it popped.
///
/// Useful for tests that want to drive the loop manually and assert on
/// individual transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerStep {
    /// Candidate was already terminal; the duplicate entry was dropped.
    Discarded { unit: UnitName },
    /// Candidate was ready and its action ran.
    Executed { unit: UnitName, outcome: Outcome },
    /// Candidate was marked failed because a hard dependency failed.
    Skipped {
        unit: UnitName,
        failed_dependency: UnitName,
    },
    /// Candidate went to the front of the worklist behind its unsettled
    /// dependencies, which were pushed onto the back.
    Requeued {
        unit: UnitName,
        wait: WaitKind,
        waiting_on: Vec<UnitName>,
    },
    /// Candidate hit the re-queue limit and was marked failed.
    Stalled { unit: UnitName, requeues: usize },
    /// Candidate ran but a stop was requested meanwhile and it did not
    /// succeed; it stays unsettled.
    Interrupted { unit: UnitName },
}

impl SchedulerStep {
    pub fn unit(&self) -> &str {
        match self {
            SchedulerStep::Discarded { unit }
            | SchedulerStep::Executed { unit, .. }
            | SchedulerStep::Skipped { unit, .. }
            | SchedulerStep::Requeued { unit, .. }
            | SchedulerStep::Stalled { unit, .. }
            | SchedulerStep::Interrupted { unit } => unit,
        }
    }
}
