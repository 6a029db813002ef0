// src/exec/mod.rs

//! Command-backed unit actions.
//!
//! Each configured unit runs a shell command through
//! `tokio::process::Command`. The scheduler itself is synchronous, so
//! [`CommandAction`] blocks on a runtime [`Handle`](tokio::runtime::Handle)
//! and must be executed from a blocking thread (see
//! [`pipeline::run_pipeline`](crate::pipeline::run_pipeline)).
//!
//! - [`command`] holds the action type and the exit-code → outcome mapping.

pub mod command;

pub use command::{CommandAction, CommandSpec, outcome_for_exit};
