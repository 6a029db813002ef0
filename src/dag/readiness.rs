// src/dag/readiness.rs

//! Dependency evaluation for a single candidate.

use std::collections::HashSet;

use crate::unit::{Unit, UnitName};

/// Which dependency set a waiting candidate is blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitKind {
    Hard,
    Soft,
}

/// Verdict for a candidate popped off the worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// All hard dependencies succeeded and all soft dependencies are terminal.
    Ready,
    /// A hard dependency is in `failed`; the candidate must not run.
    UpstreamFailed { dependency: UnitName },
    /// Some dependencies have not settled yet.
    Waiting {
        kind: WaitKind,
        missing: Vec<UnitName>,
    },
}

/// Evaluate `unit` against the terminal sets.
///
/// Precedence: upstream failure, then missing hard dependencies, then
/// non-terminal soft dependencies. Soft dependencies are only looked at once
/// every hard dependency has succeeded.
pub fn evaluate(
    unit: &Unit,
    completed: &HashSet<UnitName>,
    failed: &HashSet<UnitName>,
) -> Readiness {
    if let Some(dep) = unit
        .hard_dependencies()
        .iter()
        .find(|dep| failed.contains(*dep))
    {
        return Readiness::UpstreamFailed {
            dependency: dep.clone(),
        };
    }

    let missing_hard: Vec<UnitName> = unit
        .hard_dependencies()
        .iter()
        .filter(|dep| !completed.contains(*dep))
        .cloned()
        .collect();
    if !missing_hard.is_empty() {
        return Readiness::Waiting {
            kind: WaitKind::Hard,
            missing: missing_hard,
        };
    }

    let pending_soft: Vec<UnitName> = unit
        .soft_dependencies()
        .iter()
        .filter(|dep| !completed.contains(*dep) && !failed.contains(*dep))
        .cloned()
        .collect();
    if !pending_soft.is_empty() {
        return Readiness::Waiting {
            kind: WaitKind::Soft,
            missing: pending_soft,
        };
    }

    Readiness::Ready
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Outcome;

    fn set(names: &[&str]) -> HashSet<UnitName> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn unit() -> Unit {
        Unit::new("C", || Outcome::Success)
            .hard_dependency("A")
            .hard_dependency("B")
            .soft_dependency("S")
    }

    #[test]
    fn upstream_failure_wins_over_missing_dependencies() {
        let verdict = evaluate(&unit(), &set(&[]), &set(&["B"]));
        assert_eq!(
            verdict,
            Readiness::UpstreamFailed {
                dependency: "B".to_string()
            }
        );
    }

    #[test]
    fn missing_hard_dependencies_are_listed_in_order() {
        let verdict = evaluate(&unit(), &set(&[]), &set(&[]));
        assert_eq!(
            verdict,
            Readiness::Waiting {
                kind: WaitKind::Hard,
                missing: vec!["A".to_string(), "B".to_string()],
            }
        );
    }

    #[test]
    fn soft_dependencies_only_checked_after_hard_ones_succeed() {
        let verdict = evaluate(&unit(), &set(&["A", "B"]), &set(&[]));
        assert_eq!(
            verdict,
            Readiness::Waiting {
                kind: WaitKind::Soft,
                missing: vec!["S".to_string()],
            }
        );
    }

    #[test]
    fn failed_soft_dependency_counts_as_settled() {
        let verdict = evaluate(&unit(), &set(&["A", "B"]), &set(&["S"]));
        assert_eq!(verdict, Readiness::Ready);
    }

    #[test]
    fn unit_without_dependencies_is_ready() {
        let lone = Unit::new("X", || Outcome::Success);
        assert_eq!(evaluate(&lone, &set(&[]), &set(&[])), Readiness::Ready);
    }
}
