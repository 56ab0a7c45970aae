pub mod benchmark;
pub mod component;
pub mod level;
pub mod run;

pub use benchmark::{parse_timestamp, BenchmarkConfig, RunPaths, TimestampParseError};
pub use component::{ComponentConfig, ExecutorConfig, WorkflowConfig};
pub use level::{LevelName, LevelParseError, LogLevel};
pub use run::RunConfig;
