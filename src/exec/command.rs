// src/exec/command.rs

//! Run one unit's shell command and map its exit status to an [`Outcome`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::dag::StopSignal;
use crate::unit::{Action, Outcome, UnitName};

/// Environment variable carrying the unit name into its command.
pub const UNIT_ENV_VAR: &str = "MODSCHED_UNIT";

/// Everything needed to launch one unit's command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub unit: UnitName,
    pub cmd: String,
    pub env: BTreeMap<String, String>,
    pub workdir: Option<PathBuf>,
    /// Exit code that means `StopDependencyChain`.
    pub stop_exit_code: i32,
}

/// [`Action`] that runs a [`CommandSpec`] to completion, or until its stop
/// signal fires.
#[derive(Debug)]
pub struct CommandAction {
    spec: CommandSpec,
    handle: Handle,
    stop: Option<StopSignal>,
}

impl CommandAction {
    pub fn new(spec: CommandSpec, handle: Handle) -> Self {
        Self {
            spec,
            handle,
            stop: None,
        }
    }

    /// Kill the running command when `signal` fires.
    pub fn with_stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop = Some(signal);
        self
    }
}

impl Action for CommandAction {
    fn execute(&mut self) -> Outcome {
        match self.handle.block_on(run_command(&self.spec, self.stop.clone())) {
            Ok(Exit::Killed) => {
                warn!(unit = %self.spec.unit, "unit command killed after stop request");
                Outcome::Error
            }
            Ok(Exit::Code(code)) => {
                let outcome = outcome_for_exit(code, self.spec.stop_exit_code);
                info!(
                    unit = %self.spec.unit,
                    exit_code = ?code,
                    outcome = %outcome,
                    "unit command exited"
                );
                outcome
            }
            Err(err) => {
                error!(
                    unit = %self.spec.unit,
                    error = %err,
                    "unit command could not be run"
                );
                Outcome::Error
            }
        }
    }
}

/// Map a process exit code to an outcome.
///
/// `None` (killed by a signal) counts as an error.
pub fn outcome_for_exit(code: Option<i32>, stop_exit_code: i32) -> Outcome {
    match code {
        Some(0) => Outcome::Success,
        Some(c) if c == stop_exit_code => Outcome::StopDependencyChain,
        _ => Outcome::Error,
    }
}

/// How a unit command ended.
enum Exit {
    /// Exited on its own; `None` if a signal ended it.
    Code(Option<i32>),
    /// Killed because a stop was requested.
    Killed,
}

async fn run_command(spec: &CommandSpec, stop: Option<StopSignal>) -> Result<Exit> {
    debug!(unit = %spec.unit, cmd = %spec.cmd, "starting unit command");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&spec.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&spec.cmd);
        c
    };

    cmd.env(UNIT_ENV_VAR, &spec.unit)
        .envs(&spec.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &spec.workdir {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for unit '{}'", spec.unit))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain both pipes while waiting so the child never blocks on a full
    // buffer.
    let finished = async {
        let (status, (), ()) = tokio::join!(
            child.wait(),
            forward_lines(stdout, &spec.unit, Stream::Stdout),
            forward_lines(stderr, &spec.unit, Stream::Stderr),
        );
        status
    };

    let exit = tokio::select! {
        status = finished => {
            let status = status
                .with_context(|| format!("waiting for process of unit '{}'", spec.unit))?;
            Exit::Code(status.code())
        }
        () = wait_for_stop(stop) => Exit::Killed,
    };

    if let Exit::Killed = exit {
        info!(unit = %spec.unit, "stop requested; killing unit command");
        if let Err(e) = child.kill().await {
            warn!(unit = %spec.unit, error = %e, "failed to kill unit command");
        }
    }

    Ok(exit)
}

async fn wait_for_stop(stop: Option<StopSignal>) {
    match stop {
        Some(mut signal) => signal.stopped().await,
        None => std::future::pending::<()>().await,
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

async fn forward_lines<R>(reader: Option<R>, unit: &str, stream: Stream)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };

    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match stream {
            Stream::Stdout => info!(unit = %unit, "stdout: {}", line),
            Stream::Stderr => debug!(unit = %unit, "stderr: {}", line),
        }
    }
}
