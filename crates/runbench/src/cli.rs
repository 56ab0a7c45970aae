use clap::{Args, Parser, Subcommand, ValueEnum};
use librunbench_core::LogLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runbench", about = "Prepare and inspect workflow benchmark runs", version)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress human-readable output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a config file and print it normalized
    Validate {
        /// Config file (.toml or .json)
        config: PathBuf,

        /// Also check the run_dir template placeholders
        #[arg(long)]
        strict: bool,
    },

    /// Show the paths a run would use, without creating anything
    Paths {
        #[command(flatten)]
        source: ConfigSource,
    },

    /// Create the run directory, start logging, and snapshot the config
    Prepare {
        #[command(flatten)]
        source: ConfigSource,
    },

    /// Append a task record to the run's task record file
    Record {
        #[command(flatten)]
        source: ConfigSource,

        /// Task identifier
        #[arg(long)]
        task_id: String,

        /// Task name
        #[arg(long = "task-name")]
        task_name: String,

        /// Task outcome
        #[arg(long, value_enum)]
        status: StatusArg,

        /// Error message for failed tasks
        #[arg(long)]
        error: Option<String>,

        /// Task start time (ISO-8601, default: now)
        #[arg(long)]
        started: Option<String>,

        /// Task end time (ISO-8601, default: now)
        #[arg(long)]
        finished: Option<String>,
    },
}

/// A config file plus command-line overrides
#[derive(Clone, Args)]
pub struct ConfigSource {
    /// Config file (.toml or .json)
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Clone, Default, Args)]
pub struct Overrides {
    /// Override the run name
    #[arg(long)]
    pub name: Option<String>,

    /// Override the run timestamp (ISO-8601 or YYYY-MM-DD-HH-MM-SS)
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Override the run directory template
    #[arg(long)]
    pub run_dir: Option<String>,

    /// Override the stdout log level
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Override the log file level
    #[arg(long)]
    pub log_file_level: Option<LogLevel>,

    /// Override the log file name
    #[arg(long, conflicts_with = "no_log_file")]
    pub log_file_name: Option<String>,

    /// Log to stdout only
    #[arg(long)]
    pub no_log_file: bool,

    /// Override the task record file name
    #[arg(long)]
    pub task_record_file_name: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Success,
    Failure,
}
