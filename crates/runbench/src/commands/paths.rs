//! Paths command implementation (dry run)

use librunbench_core::RunbenchError;

use crate::cli::{Cli, ConfigSource};
use crate::context;
use crate::output::emit;

pub fn run(cli: &Cli, source: &ConfigSource) -> Result<(), RunbenchError> {
    let config = context::resolve(source)?;
    emit(cli, &config.resolve_paths()?);
    Ok(())
}
