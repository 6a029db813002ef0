// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `modsched`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "modsched",
    version,
    about = "Run a pipeline of units in dependency order, cascading failures to dependents.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MODSCHED_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print units and dependencies, but run nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Give up on a unit after it has been re-queued this many times.
    ///
    /// Overrides `[config].max_requeues`.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(usize))]
    pub max_requeues: Option<usize>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_pipeline_file_in_current_dir() {
        let args = CliArgs::try_parse_from(["modsched"]).unwrap();
        assert_eq!(args.config, default_config_path());
        assert!(!args.dry_run);
        assert_eq!(args.max_requeues, None);
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "modsched",
            "--config",
            "demos/Modsched.toml",
            "--dry-run",
            "--max-requeues",
            "4",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("demos/Modsched.toml"));
        assert!(args.dry_run);
        assert_eq!(args.max_requeues, Some(4));
    }
}
