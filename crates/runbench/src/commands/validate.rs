//! Validate command implementation

use std::path::Path;

use librunbench_core::{template, BenchmarkConfig, Config, RunbenchError};
use serde::Serialize;

use crate::cli::Cli;
use crate::output::{emit, Report};

/// The normalized config; the JSON data is the config document itself
#[derive(Serialize)]
struct ValidateReport<'a> {
    #[serde(skip)]
    source: &'a Path,
    #[serde(skip)]
    strict: bool,
    #[serde(flatten)]
    config: &'a BenchmarkConfig,
}

impl Report for ValidateReport<'_> {
    fn summary(&self) -> String {
        let config = self.config;
        let log_file = config.run.log_file_name.as_deref().unwrap_or("(disabled)");
        format!(
            "{} is valid{}\nname: {}\ntimestamp: {}\nexecutor: {}\nworkflow: {}\nrun_dir: {}\nlog_file: {} ({})\nlog_level: {}\ntask_record_file: {}",
            self.source.display(),
            if self.strict { " (strict)" } else { "" },
            config.name,
            config.timestamp,
            config.executor.kind,
            config.workflow.kind,
            config.run.run_dir,
            log_file,
            config.run.log_file_level,
            config.run.log_level,
            config.run.task_record_file_name,
        )
    }
}

pub fn run(cli: &Cli, config_path: &Path, strict: bool) -> Result<(), RunbenchError> {
    let config = BenchmarkConfig::load(config_path)?;
    if strict {
        template::check(&config.run.run_dir)?;
    }

    emit(
        cli,
        &ValidateReport {
            source: config_path,
            strict,
            config: &config,
        },
    );
    Ok(())
}
