#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use modsched::config::{ConfigSection, PipelineConfig, RawPipelineConfig, UnitConfig};

/// Builder for `PipelineConfig` to simplify test setup.
pub struct PipelineConfigBuilder {
    config: RawPipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawPipelineConfig {
                config: ConfigSection::default(),
                unit: Default::default(),
            },
        }
    }

    pub fn with_unit(mut self, name: &str, unit: UnitConfig) -> Self {
        self.config.unit.insert(name.to_string(), unit);
        self
    }

    pub fn stop_exit_code(mut self, code: i32) -> Self {
        self.config.config.stop_exit_code = code;
        self
    }

    pub fn max_requeues(mut self, n: usize) -> Self {
        self.config.config.max_requeues = Some(n);
        self
    }

    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.config.workdir = Some(dir.into());
        self
    }

    /// The raw, unvalidated config (for validation tests).
    pub fn build_raw(self) -> RawPipelineConfig {
        self.config
    }

    pub fn build(self) -> PipelineConfig {
        PipelineConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `UnitConfig`.
pub struct UnitConfigBuilder {
    unit: UnitConfig,
}

impl UnitConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            unit: UnitConfig {
                cmd: cmd.to_string(),
                after: vec![],
                soft_after: vec![],
                env: BTreeMap::new(),
                stop_exit_code: None,
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.unit.after.push(dep.to_string());
        self
    }

    pub fn soft_after(mut self, dep: &str) -> Self {
        self.unit.soft_after.push(dep.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.unit.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn stop_exit_code(mut self, code: i32) -> Self {
        self.unit.stop_exit_code = Some(code);
        self
    }

    pub fn build(self) -> UnitConfig {
        self.unit
    }
}
