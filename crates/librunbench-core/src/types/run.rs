use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::RunbenchError;
use crate::types::level::LogLevel;

pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";
pub const DEFAULT_TASK_RECORD_FILE_NAME: &str = "tasks.json";
pub const DEFAULT_RUN_DIR: &str = "runs/{name}-{timestamp}";

/// Logging and run directory settings.
///
/// Every field may be omitted from a document and falls back to its default.
/// `log_file_name: null` turns file logging off; output then goes to stdout
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Minimum level written to the log file
    pub log_file_level: LogLevel,
    /// Log file name inside the run directory
    pub log_file_name: Option<String>,
    /// Minimum level written to stdout
    pub log_level: LogLevel,
    /// Task record file name inside the run directory
    pub task_record_file_name: String,
    /// Run directory template with `{name}` and `{timestamp}` placeholders
    pub run_dir: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_file_level: LogLevel::default(),
            log_file_name: Some(DEFAULT_LOG_FILE_NAME.to_string()),
            log_level: LogLevel::default(),
            task_record_file_name: DEFAULT_TASK_RECORD_FILE_NAME.to_string(),
            run_dir: DEFAULT_RUN_DIR.to_string(),
        }
    }
}

fn check_file_name(field: &str, value: &str) -> Result<(), RunbenchError> {
    if value.trim().is_empty() {
        return Err(RunbenchError::validation(field, "file name must not be empty"));
    }
    if value.contains('\0') {
        return Err(RunbenchError::validation(field, "file name must not contain NUL"));
    }
    Ok(())
}

impl Config for RunConfig {
    fn validate(&self) -> Result<(), RunbenchError> {
        if let Some(name) = &self.log_file_name {
            check_file_name("log_file_name", name)?;
        }
        check_file_name("task_record_file_name", &self.task_record_file_name)?;
        if self.run_dir.trim().is_empty() {
            return Err(RunbenchError::validation("run_dir", "template must not be empty"));
        }
        Ok(())
    }

    fn check_toml_representable(&self) -> Result<(), RunbenchError> {
        if self.log_file_name.is_none() {
            return Err(RunbenchError::validation(
                "log_file_name",
                "a disabled log file (null) cannot be written as TOML; save as .json instead",
            ));
        }
        Ok(())
    }
}
