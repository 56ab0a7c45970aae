use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

/// Main error type for runbench operations
#[derive(Debug, Error)]
pub enum RunbenchError {
    #[error("invalid config field `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("run_dir template error: {0}")]
    Template(#[from] TemplateError),

    #[error("cannot create run directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("malformed task record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl RunbenchError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RunbenchError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix a validation error's field with the section it was found in
    pub fn within(self, section: &str) -> Self {
        match self {
            RunbenchError::Validation { field, reason } => RunbenchError::Validation {
                field: format!("{}.{}", section, field),
                reason,
            },
            other => other,
        }
    }

    /// True for errors caused by a malformed or invalid configuration document
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RunbenchError::Validation { .. } | RunbenchError::Json(_) | RunbenchError::TomlParse(_)
        )
    }

    /// Get the error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            RunbenchError::Validation { .. } => "invalid_config",
            RunbenchError::Template(_) => "template_error",
            RunbenchError::Filesystem { .. } => "filesystem_error",
            RunbenchError::InvalidArgs(_) => "invalid_args",
            RunbenchError::NotFound(_) => "not_found",
            RunbenchError::Io(_) => "io_error",
            RunbenchError::Json(_) => "invalid_config",
            RunbenchError::TomlParse(_) => "invalid_config",
            RunbenchError::TomlSerialize(_) => "internal_error",
            RunbenchError::Record { .. } => "invalid_record",
        }
    }

    /// Get the process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            RunbenchError::Validation { .. } => 2,
            RunbenchError::Template(_) => 2,
            RunbenchError::InvalidArgs(_) => 2,
            RunbenchError::Json(_) => 2,
            RunbenchError::TomlParse(_) => 2,
            RunbenchError::NotFound(_) => 3,
            RunbenchError::Filesystem { .. } => 5,
            RunbenchError::Io(_) => 5,
            _ => 1,
        }
    }

    /// Get actionable suggestions for fixing the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            RunbenchError::Validation { field, .. } if field.ends_with("level") => vec![
                "Use one of DEBUG, INFO, WARNING, ERROR, CRITICAL or an integer level",
            ],
            RunbenchError::Template(_) => vec![
                "run_dir may only reference {name} and {timestamp}",
                "Write literal braces as {{ and }}",
            ],
            RunbenchError::Filesystem { .. } => vec![
                "Check that no regular file exists at the run directory path",
                "Check write permissions on the parent directory",
            ],
            RunbenchError::NotFound(_) => vec!["Check the config file path"],
            RunbenchError::Json(_) | RunbenchError::TomlParse(_) => vec![
                "Run 'runbench validate <config>' to see the offending field",
            ],
            _ => vec![],
        }
    }
}

pub type Result<T> = std::result::Result<T, RunbenchError>;
