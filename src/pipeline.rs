// src/pipeline.rs

//! Turn a validated [`PipelineConfig`] into units and run them.

use std::future::Future;

use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::dag::{RunReport, Scheduler, SchedulerOptions, StopSignal, stop_channel};
use crate::errors::{ModschedError, Result};
use crate::exec::{CommandAction, CommandSpec};
use crate::unit::Unit;

/// Overrides applied on top of the `[config]` section.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Replaces `[config].max_requeues` when set.
    pub max_requeues: Option<usize>,
}

/// Scheduler options derived from config plus overrides.
pub fn scheduler_options(cfg: &PipelineConfig, overrides: PipelineOptions) -> SchedulerOptions {
    SchedulerOptions {
        max_requeues: overrides.max_requeues.or(cfg.config.max_requeues),
    }
}

/// Build one command-backed [`Unit`] per `[unit.<name>]` section, in the
/// order the sections appear in the file.
pub fn build_units(cfg: &PipelineConfig, handle: &Handle, stop: &StopSignal) -> Vec<Unit> {
    cfg.unit
        .iter()
        .map(|(name, uc)| {
            let spec = CommandSpec {
                unit: name.clone(),
                cmd: uc.cmd.clone(),
                env: uc.env.clone(),
                workdir: cfg.config.workdir.clone(),
                stop_exit_code: uc.effective_stop_exit_code(cfg.config.stop_exit_code),
            };

            let action = CommandAction::new(spec, handle.clone()).with_stop_signal(stop.clone());

            Unit::new(name.clone(), action)
                .with_hard_dependencies(uc.after.iter().cloned())
                .with_soft_dependencies(uc.soft_after.iter().cloned())
        })
        .collect()
}

/// Run every unit of `cfg` to a terminal state, or until Ctrl-C.
pub async fn run_pipeline(cfg: &PipelineConfig, overrides: PipelineOptions) -> Result<RunReport> {
    run_pipeline_until(cfg, overrides, interrupted()).await
}

/// Run every unit of `cfg` until they all settle or `shutdown` resolves.
///
/// The scheduler loop is synchronous and each unit blocks until its command
/// exits, so the whole run happens on a blocking worker thread. When
/// `shutdown` fires first, the running command is killed, no further unit
/// is started, and [`ModschedError::Interrupted`] is returned once the
/// worker has wound down.
pub async fn run_pipeline_until<F>(
    cfg: &PipelineConfig,
    overrides: PipelineOptions,
    shutdown: F,
) -> Result<RunReport>
where
    F: Future<Output = ()>,
{
    let options = scheduler_options(cfg, overrides);
    let (stop, signal) = stop_channel();
    let units = build_units(cfg, &Handle::current(), &signal);
    let scheduler = Scheduler::with_options(units, options)?.with_stop_signal(signal);

    info!(units = cfg.unit.len(), "starting pipeline run");

    let mut run = tokio::task::spawn_blocking(move || scheduler.run());

    tokio::select! {
        joined = &mut run => return Ok(joined.map_err(anyhow::Error::from)?),
        () = shutdown => {}
    }

    stop.stop();
    let report = run.await.map_err(anyhow::Error::from)?;
    if !report.interrupted {
        // Everything settled before the stop took effect.
        return Ok(report);
    }

    warn!(
        settled = report.records.len(),
        units = cfg.unit.len(),
        "pipeline stopped before every unit settled"
    );
    Err(ModschedError::Interrupted)
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be
/// installed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Ctrl+C received; stopping pipeline run"),
        Err(e) => {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}
