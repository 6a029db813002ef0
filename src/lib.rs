// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod unit;

use std::io::{self, Write};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::PipelineConfig;
use crate::config::loader::load_and_validate;
use crate::dag::{RunReport, UnitStatus};
use crate::errors::Result;
use crate::pipeline::{PipelineOptions, run_pipeline};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - dry-run output
/// - building command units and running the scheduler
///
/// Returns `None` for a dry run, otherwise the report of the finished run.
pub async fn run(args: CliArgs) -> Result<Option<RunReport>> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        write_dry_run(&mut io::stdout().lock(), &cfg)?;
        debug!("dry-run complete (no execution)");
        return Ok(None);
    }

    let overrides = PipelineOptions {
        max_requeues: args.max_requeues,
    };

    let report = run_pipeline(&cfg, overrides).await?;
    Ok(Some(report))
}

/// Write the units, their dependencies and commands without running them.
pub fn write_dry_run(out: &mut impl Write, cfg: &PipelineConfig) -> io::Result<()> {
    writeln!(out, "modsched dry-run")?;
    writeln!(out, "  config.stop_exit_code = {}", cfg.config.stop_exit_code)?;
    if let Some(max) = cfg.config.max_requeues {
        writeln!(out, "  config.max_requeues = {max}")?;
    }
    if let Some(ref dir) = cfg.config.workdir {
        writeln!(out, "  config.workdir = {}", dir.display())?;
    }
    writeln!(out)?;

    writeln!(out, "units ({}):", cfg.unit.len())?;
    for (name, unit) in cfg.unit.iter() {
        writeln!(out, "  - {name}")?;
        writeln!(out, "      cmd: {}", unit.cmd)?;
        if !unit.after.is_empty() {
            writeln!(out, "      after: {:?}", unit.after)?;
        }
        if !unit.soft_after.is_empty() {
            writeln!(out, "      soft_after: {:?}", unit.soft_after)?;
        }
        if !unit.env.is_empty() {
            writeln!(out, "      env: {:?}", unit.env)?;
        }
        if let Some(code) = unit.stop_exit_code {
            writeln!(out, "      stop_exit_code: {code}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "roots: {:?}", cfg.root_units())
}

/// Write a human-readable summary of a finished run.
///
/// Units that failed on their own are marked `FAILED`; units that never ran
/// because of an upstream failure (or a stall) are marked `SKIPPED`.
pub fn write_summary(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    writeln!(
        out,
        "modsched: {} completed, {} failed",
        report.completed.len(),
        report.failed.len()
    )?;

    for record in &report.records {
        let marker = match record.status {
            UnitStatus::Succeeded => "ok",
            UnitStatus::Errored | UnitStatus::StoppedChain => "FAILED",
            UnitStatus::Skipped { .. } | UnitStatus::Stalled { .. } => "SKIPPED",
        };
        writeln!(out, "  [{marker}] {}: {}", record.name, record.status)?;
    }

    if report.interrupted {
        writeln!(out, "  (run interrupted; remaining units were not attempted)")?;
    }
    Ok(())
}

/// [`write_summary`] to stdout.
pub fn print_summary(report: &RunReport) -> Result<()> {
    write_summary(&mut io::stdout().lock(), report)?;
    Ok(())
}
