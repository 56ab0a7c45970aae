//! Run configuration for workflow benchmarks.
//!
//! A [`BenchmarkConfig`] ties a run name and start time to the executor,
//! workflow and [`RunConfig`] settings, and derives the run directory, log
//! file and task record file for that run.

pub mod config;
pub mod error;
pub mod record;
pub mod template;
pub mod types;

pub use config::{Config, Format};
pub use error::{Result, RunbenchError};
pub use record::{read_records, TaskRecord, TaskRecordWriter, TaskStatus};
pub use template::TemplateError;
pub use types::{
    parse_timestamp, BenchmarkConfig, ComponentConfig, ExecutorConfig, LevelName, LogLevel,
    RunConfig, RunPaths, WorkflowConfig,
};
