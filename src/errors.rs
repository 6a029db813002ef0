// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Unit failures are *not* errors; they travel as
//! [`Outcome`](crate::unit::Outcome) values. The variants here cover bad
//! pipeline descriptions and the IO around them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModschedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Duplicate unit name: {0}")]
    DuplicateUnit(String),

    #[error("Unit '{unit}' depends on unknown unit '{dependency}'")]
    UnknownDependency { unit: String, dependency: String },

    #[error("Cycle detected in unit dependencies: {0}")]
    DependencyCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Pipeline run interrupted")]
    Interrupted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ModschedError>;
