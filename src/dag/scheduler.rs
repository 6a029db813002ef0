// src/dag/scheduler.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, trace, warn};

use crate::dag::readiness::{self, Readiness, WaitKind};
use crate::dag::registry::Registry;
use crate::dag::report::{RunReport, UnitRecord, UnitStatus};
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::stop::StopSignal;
use crate::dag::worklist::Worklist;
use crate::errors::Result;
use crate::unit::{Outcome, Unit, UnitName};

/// Tunables for a scheduler run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// How often a single unit may be put back on the worklist while waiting
    /// for its dependencies before it is given up on as `Stalled`.
    ///
    /// `None` retries forever, which never terminates on a circular
    /// dependency graph. Validate the graph up front (see
    /// [`config::validate_config`](crate::config::validate_config)) or set a
    /// bound.
    pub max_requeues: Option<usize>,
}

/// Scheduler owns the registered units plus all per-run state.
///
/// It is responsible for:
/// - popping candidates off the back of the worklist
/// - dropping candidates that already reached a terminal state
/// - failing candidates whose hard dependencies failed, without running them
/// - re-queueing candidates behind their unsettled dependencies
/// - running ready candidates exactly once and recording the outcome
///
/// There is no hidden global state: independent schedulers can run side by
/// side in the same process.
///
/// An attached [`StopSignal`] ends the loop early. Units still on the
/// worklist are left unsettled and the report is marked interrupted.
#[derive(Debug)]
pub struct Scheduler {
    registry: Registry,
    worklist: Worklist,
    completed: HashSet<UnitName>,
    failed: HashSet<UnitName>,
    records: Vec<UnitRecord>,
    requeues: HashMap<UnitName, usize>,
    options: SchedulerOptions,
    stop: Option<StopSignal>,
}

impl Scheduler {
    /// Construct a scheduler with default options.
    pub fn new(units: Vec<Unit>) -> Result<Self> {
        Self::with_options(units, SchedulerOptions::default())
    }

    /// Construct a scheduler, seeding the worklist with every unit in the
    /// given order.
    pub fn with_options(units: Vec<Unit>, options: SchedulerOptions) -> Result<Self> {
        let registry = Registry::new(units)?;
        let worklist: Worklist = registry.names().collect();

        Ok(Self {
            registry,
            worklist,
            completed: HashSet::new(),
            failed: HashSet::new(),
            records: Vec::new(),
            requeues: HashMap::new(),
            options,
            stop: None,
        })
    }

    /// Attach a stop signal checked before every loop iteration.
    pub fn with_stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop = Some(signal);
        self
    }

    /// Returns `true` once the worklist is empty.
    pub fn is_idle(&self) -> bool {
        self.worklist.is_empty()
    }

    pub fn completed(&self) -> &HashSet<UnitName> {
        &self.completed
    }

    pub fn failed(&self) -> &HashSet<UnitName> {
        &self.failed
    }

    /// Terminal status of `unit`, or `None` if it has not settled yet.
    pub fn status_of(&self, unit: &str) -> Option<&UnitStatus> {
        self.records
            .iter()
            .find(|r| r.name == unit)
            .map(|r| &r.status)
    }

    /// Snapshot of the current state as a report.
    pub fn report(&self) -> RunReport {
        RunReport {
            completed: self.completed.iter().cloned().collect(),
            failed: self.failed.iter().cloned().collect(),
            records: self.records.clone(),
            interrupted: self.stop_requested() && self.records.len() < self.registry.len(),
        }
    }

    /// Drive the loop until the worklist is empty or a stop is requested.
    pub fn run(mut self) -> RunReport {
        info!(
            units = self.registry.len(),
            max_requeues = ?self.options.max_requeues,
            "scheduler: starting run"
        );

        while self.step().is_some() {}

        let report = self.report();
        if report.interrupted {
            warn!(
                completed = report.completed.len(),
                failed = report.failed.len(),
                unsettled = self.registry.len() - report.records.len(),
                "scheduler: stop requested; run abandoned"
            );
        } else {
            info!(
                completed = report.completed.len(),
                failed = report.failed.len(),
                "scheduler: worklist empty; run finished"
            );
        }
        report
    }

    /// Perform a single loop iteration.
    ///
    /// Returns `None` when the worklist is empty or a stop was requested.
    pub fn step(&mut self) -> Option<SchedulerStep> {
        if self.stop_requested() {
            return None;
        }

        let name = self.worklist.pop_back()?;

        if self.is_terminal(&name) {
            trace!(unit = %name, "already terminal; discarding worklist entry");
            return Some(SchedulerStep::Discarded { unit: name });
        }

        let Some(unit) = self.registry.get(&name) else {
            // Registry construction rejects unknown names, so this only
            // guards against internal bugs.
            warn!(unit = %name, "worklist entry not present in registry; discarding");
            return Some(SchedulerStep::Discarded { unit: name });
        };

        let step = match readiness::evaluate(unit, &self.completed, &self.failed) {
            Readiness::Ready => self.execute(name),
            Readiness::UpstreamFailed { dependency } => self.skip(name, dependency),
            Readiness::Waiting { kind, missing } => self.requeue(name, kind, missing),
        };

        Some(step)
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(StopSignal::is_stopped)
    }

    fn is_terminal(&self, name: &str) -> bool {
        self.completed.contains(name) || self.failed.contains(name)
    }

    fn execute(&mut self, name: UnitName) -> SchedulerStep {
        info!(unit = %name, "running unit");

        let outcome = match self.registry.get_mut(&name) {
            Some(unit) => unit.execute(),
            None => Outcome::Error,
        };

        // A non-success outcome under a pending stop means the action was
        // cut short.
        if !outcome.is_success() && self.stop_requested() {
            warn!(
                unit = %name,
                outcome = %outcome,
                "unit interrupted by stop request; leaving it unsettled"
            );
            return SchedulerStep::Interrupted { unit: name };
        }

        match outcome {
            Outcome::Success => info!(unit = %name, "unit finished successfully"),
            Outcome::Error => warn!(unit = %name, "unit failed with an error"),
            Outcome::StopDependencyChain => {
                warn!(unit = %name, "unit requested to stop its dependency chain")
            }
        }

        self.settle(name.clone(), UnitStatus::from_outcome(outcome));
        SchedulerStep::Executed {
            unit: name,
            outcome,
        }
    }

    fn skip(&mut self, name: UnitName, dependency: UnitName) -> SchedulerStep {
        warn!(
            unit = %name,
            dependency = %dependency,
            "skipping unit: hard dependency failed or stopped its chain"
        );

        self.settle(
            name.clone(),
            UnitStatus::Skipped {
                failed_dependency: dependency.clone(),
            },
        );
        SchedulerStep::Skipped {
            unit: name,
            failed_dependency: dependency,
        }
    }

    fn requeue(&mut self, name: UnitName, wait: WaitKind, missing: Vec<UnitName>) -> SchedulerStep {
        let count = self.requeues.get(&name).copied().unwrap_or(0);

        if let Some(limit) = self.options.max_requeues {
            if count >= limit {
                warn!(
                    unit = %name,
                    requeues = count,
                    waiting_on = ?missing,
                    "unit exceeded re-queue limit; marking failed (possible dependency cycle)"
                );
                self.settle(name.clone(), UnitStatus::Stalled { requeues: count });
                return SchedulerStep::Stalled {
                    unit: name,
                    requeues: count,
                };
            }
        }
        self.requeues.insert(name.clone(), count + 1);

        debug!(
            unit = %name,
            wait = ?wait,
            waiting_on = ?missing,
            "dependencies not settled; re-queueing"
        );

        for dep in &missing {
            self.worklist.push_back(dep.clone());
        }
        self.worklist.push_front(name.clone());

        SchedulerStep::Requeued {
            unit: name,
            wait,
            waiting_on: missing,
        }
    }

    /// Record a terminal transition. Each unit settles exactly once.
    fn settle(&mut self, name: UnitName, status: UnitStatus) {
        debug_assert!(!self.is_terminal(&name), "unit {name} settled twice");

        if status.is_success() {
            self.completed.insert(name.clone());
        } else {
            self.failed.insert(name.clone());
        }
        self.records.push(UnitRecord { name, status });
    }
}

/// Register `units` and run them to completion with default options.
pub fn run(units: Vec<Unit>) -> Result<RunReport> {
    Ok(Scheduler::new(units)?.run())
}
