// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{PipelineConfig, RawPipelineConfig};
use crate::errors::{ModschedError, Result};

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = ModschedError;

    fn try_from(raw: RawPipelineConfig) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(PipelineConfig::new_unchecked(raw.config, raw.unit))
    }
}

/// Run every check on a raw pipeline description.
///
/// The scheduler itself retries waiting units forever, so a circular
/// dependency must be caught here (or bounded with `max_requeues`).
pub fn validate_config(cfg: &RawPipelineConfig) -> Result<()> {
    ensure_has_units(cfg)?;
    validate_global_config(cfg)?;
    validate_unit_dependencies(cfg)?;
    validate_acyclic(cfg)?;
    Ok(())
}

fn ensure_has_units(cfg: &RawPipelineConfig) -> Result<()> {
    if cfg.unit.is_empty() {
        return Err(ModschedError::ConfigError(
            "config must contain at least one [unit.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawPipelineConfig) -> Result<()> {
    if cfg.config.stop_exit_code == 0 {
        return Err(ModschedError::ConfigError(
            "[config].stop_exit_code must not be 0 (0 means success)".to_string(),
        ));
    }

    if cfg.config.max_requeues == Some(0) {
        return Err(ModschedError::ConfigError(
            "[config].max_requeues must be >= 1 (got 0)".to_string(),
        ));
    }

    for (name, unit) in cfg.unit.iter() {
        if unit.stop_exit_code == Some(0) {
            return Err(ModschedError::ConfigError(format!(
                "unit '{}' has stop_exit_code = 0 (0 means success)",
                name
            )));
        }
    }

    Ok(())
}

fn validate_unit_dependencies(cfg: &RawPipelineConfig) -> Result<()> {
    for (name, unit) in cfg.unit.iter() {
        for (field, deps) in [("after", &unit.after), ("soft_after", &unit.soft_after)] {
            for dep in deps.iter() {
                if !cfg.unit.contains_key(dep) {
                    return Err(ModschedError::ConfigError(format!(
                        "unit '{}' has unknown dependency '{}' in `{}`",
                        name, dep, field
                    )));
                }
                if dep == name {
                    return Err(ModschedError::ConfigError(format!(
                        "unit '{}' cannot depend on itself in `{}`",
                        name, field
                    )));
                }
            }
        }

        if let Some(dep) = unit.after.iter().find(|d| unit.soft_after.contains(*d)) {
            return Err(ModschedError::ConfigError(format!(
                "unit '{}' lists '{}' in both `after` and `soft_after`",
                name, dep
            )));
        }
    }
    Ok(())
}

fn validate_acyclic(cfg: &RawPipelineConfig) -> Result<()> {
    // Edge direction: dep -> unit, for both hard and soft dependencies.
    // Either kind of edge takes part in the wait-and-retry loop.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.unit.keys() {
        graph.add_node(name.as_str());
    }

    for (name, unit) in cfg.unit.iter() {
        for dep in unit.after.iter().chain(unit.soft_after.iter()) {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(ModschedError::DependencyCycle(format!(
            "cycle detected in unit dependencies involving unit '{}'",
            cycle.node_id()
        ))),
    }
}
