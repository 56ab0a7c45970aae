//! runbench - prepare and inspect workflow benchmark runs

mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use commands::record::RecordArgs;

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Validate { config, strict } => commands::validate::run(&cli, config, *strict),
        Command::Paths { source } => commands::paths::run(&cli, source),
        Command::Prepare { source } => commands::prepare::run(&cli, source),
        Command::Record {
            source,
            task_id,
            task_name,
            status,
            error,
            started,
            finished,
        } => commands::record::run(
            &cli,
            source,
            RecordArgs {
                task_id: task_id.clone(),
                task_name: task_name.clone(),
                status: *status,
                error: error.clone(),
                started: started.clone(),
                finished: finished.clone(),
            },
        ),
    };

    if let Err(e) = result {
        output::emit_error(&cli, &e);
        std::process::exit(e.exit_code());
    }
}
