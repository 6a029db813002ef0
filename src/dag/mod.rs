// src/dag/mod.rs

//! Dependency-aware scheduling of units.
//!
//! - `registry` maps names to units, fixed once scheduling starts.
//! - `worklist` is the pending sequence the loop pops from.
//! - [`readiness`] decides whether a candidate can run, must wait, or is
//!   doomed by an upstream failure.
//! - [`scheduler`] contains the loop and the terminal bookkeeping.
//! - [`scheduler_step`] describes what one loop iteration did.
//! - [`report`] holds the final sets and the per-unit log.
//! - [`stop`] lets a caller end a run early.

pub mod readiness;
pub(crate) mod registry;
pub mod report;
pub mod scheduler;
pub mod scheduler_step;
pub mod stop;
pub(crate) mod worklist;

pub use readiness::{Readiness, WaitKind};
pub use report::{RunReport, UnitRecord, UnitStatus};
pub use scheduler::{Scheduler, SchedulerOptions, run};
pub use scheduler_step::SchedulerStep;
pub use stop::{StopHandle, StopSignal, stop_channel};
