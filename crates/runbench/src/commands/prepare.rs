//! Prepare command implementation

use std::path::PathBuf;

use librunbench_core::{RunPaths, RunbenchError};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, ConfigSource};
use crate::context;
use crate::logging;
use crate::output::{emit, Report};

#[derive(Serialize)]
struct PrepareReport {
    name: String,
    #[serde(flatten)]
    paths: RunPaths,
    config_snapshot: PathBuf,
}

impl Report for PrepareReport {
    fn summary(&self) -> String {
        format!(
            "Prepared run {} in {}\n{}\nconfig_snapshot: {}",
            self.name,
            self.paths.run_dir.display(),
            self.paths.summary(),
            self.config_snapshot.display()
        )
    }
}

pub fn run(cli: &Cli, source: &ConfigSource) -> Result<(), RunbenchError> {
    let config = context::resolve(source)?;

    logging::init(&config, cli.json)?;
    let paths = config.get_paths()?;
    let config_snapshot = config.write_config_snapshot()?;

    info!(
        run = %config.name,
        executor = %config.executor.kind,
        workflow = %config.workflow.kind,
        run_dir = %paths.run_dir.display(),
        "run prepared"
    );
    if paths.log_file.is_none() {
        debug!("log file disabled, logging to console only");
    }

    emit(
        cli,
        &PrepareReport {
            name: config.name,
            paths,
            config_snapshot,
        },
    );
    Ok(())
}
