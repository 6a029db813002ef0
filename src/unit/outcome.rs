// src/unit/outcome.rs

//! Result of running a single unit.

use std::fmt;

/// Three-way outcome returned by a unit's action.
///
/// Failures are plain data: the scheduler interprets them, nothing is
/// unwound across unit boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The unit completed its effect.
    Success,
    /// The unit's own work failed.
    Error,
    /// The unit asks that everything hard-depending on it be treated as
    /// failed without being attempted.
    StopDependencyChain,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Error => write!(f, "error"),
            Outcome::StopDependencyChain => write!(f, "stop-dependency-chain"),
        }
    }
}
