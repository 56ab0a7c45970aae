use librunbench_core::{parse_timestamp, BenchmarkConfig, Config, RunbenchError};

use crate::cli::{ConfigSource, Overrides};

/// Load a benchmark config and apply command-line overrides on top.
///
/// The merged config is validated again so an override cannot sneak in a
/// value the file itself would have been rejected for.
pub fn resolve(source: &ConfigSource) -> Result<BenchmarkConfig, RunbenchError> {
    let mut config = BenchmarkConfig::load(&source.config)?;
    apply_overrides(&mut config, &source.overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn apply_overrides(config: &mut BenchmarkConfig, overrides: &Overrides) -> Result<(), RunbenchError> {
    if let Some(name) = &overrides.name {
        config.name = name.clone();
    }
    if let Some(timestamp) = &overrides.timestamp {
        config.timestamp = parse_timestamp(timestamp)
            .map_err(|e| RunbenchError::validation("timestamp", e.to_string()))?;
    }
    if let Some(run_dir) = &overrides.run_dir {
        config.run.run_dir = run_dir.clone();
    }
    if let Some(level) = overrides.log_level {
        config.run.log_level = level;
    }
    if let Some(level) = overrides.log_file_level {
        config.run.log_file_level = level;
    }
    if overrides.no_log_file {
        config.run.log_file_name = None;
    } else if let Some(file_name) = &overrides.log_file_name {
        config.run.log_file_name = Some(file_name.clone());
    }
    if let Some(file_name) = &overrides.task_record_file_name {
        config.run.task_record_file_name = file_name.clone();
    }
    Ok(())
}
