use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::RunbenchError;
use crate::template;
use crate::types::component::{ExecutorConfig, WorkflowConfig};
use crate::types::run::RunConfig;

/// Timestamp layout used inside run directory names
pub const RUN_DIR_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// File name of the resolved config written into the run directory
pub const CONFIG_SNAPSHOT_FILE_NAME: &str = "config.json";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const NAIVE_FORMATS: &[&str] = &[
    ISO_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    RUN_DIR_TIMESTAMP_FORMAT,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp `{0}` (expected ISO-8601, e.g. 2024-01-02T03:04:05)")]
pub struct TimestampParseError(pub String);

/// Parse a run timestamp.
///
/// Inputs with a UTC offset keep their wall-clock time; no conversion is done.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampParseError> {
    let input = input.trim();
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(input)
        .map(|ts| ts.naive_local())
        .map_err(|_| TimestampParseError(input.to_string()))
}

mod timestamp_serde {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampInput {
        Text(String),
        Toml(toml::value::Datetime),
    }

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(ISO_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = match TimestampInput::deserialize(deserializer)? {
            TimestampInput::Text(text) => text,
            TimestampInput::Toml(datetime) => datetime.to_string(),
        };
        parse_timestamp(&text).map_err(D::Error::custom)
    }
}

/// Filesystem locations derived for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPaths {
    pub run_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub task_record_file: PathBuf,
}

/// Workflow benchmark configuration.
///
/// Construction and validation never touch the filesystem. The run directory
/// is created by [`BenchmarkConfig::get_run_dir`] and the accessors built on
/// it; they are idempotent and safe to call from several threads or
/// processes at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Name of the workflow run
    pub name: String,
    /// Start time of the run (naive local time)
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    pub executor: ExecutorConfig,
    pub run: RunConfig,
    pub workflow: WorkflowConfig,
}

impl BenchmarkConfig {
    /// Create a config with default run settings
    pub fn new(
        name: impl Into<String>,
        timestamp: NaiveDateTime,
        executor: ExecutorConfig,
        workflow: WorkflowConfig,
    ) -> Self {
        Self {
            name: name.into(),
            timestamp,
            executor,
            run: RunConfig::default(),
            workflow,
        }
    }

    /// Create a config stamped with the current local time, whole seconds
    pub fn now(name: impl Into<String>, executor: ExecutorConfig, workflow: WorkflowConfig) -> Self {
        let now = Local::now().naive_local();
        let timestamp = now.with_nanosecond(0).unwrap_or(now);
        Self::new(name, timestamp, executor, workflow)
    }

    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Timestamp as it appears in the run directory name
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(RUN_DIR_TIMESTAMP_FORMAT).to_string()
    }

    /// Run directory path without creating it
    pub fn resolve_run_dir(&self) -> Result<PathBuf, RunbenchError> {
        let formatted =
            template::format_run_dir(&self.run.run_dir, &self.name, &self.formatted_timestamp())?;
        Ok(PathBuf::from(formatted))
    }

    /// Log file path without creating the run directory
    pub fn resolve_log_file(&self) -> Result<Option<PathBuf>, RunbenchError> {
        match &self.run.log_file_name {
            Some(file_name) => Ok(Some(self.resolve_run_dir()?.join(file_name))),
            None => Ok(None),
        }
    }

    /// Task record file path without creating the run directory
    pub fn resolve_task_record_file(&self) -> Result<PathBuf, RunbenchError> {
        Ok(self.resolve_run_dir()?.join(&self.run.task_record_file_name))
    }

    /// All derived paths, without touching the filesystem
    pub fn resolve_paths(&self) -> Result<RunPaths, RunbenchError> {
        Ok(RunPaths {
            run_dir: self.resolve_run_dir()?,
            log_file: self.resolve_log_file()?,
            task_record_file: self.resolve_task_record_file()?,
        })
    }

    /// Create (if needed) and return the run directory
    pub fn get_run_dir(&self) -> Result<PathBuf, RunbenchError> {
        let run_dir = self.resolve_run_dir()?;
        std::fs::create_dir_all(&run_dir).map_err(|source| RunbenchError::Filesystem {
            path: run_dir.clone(),
            source,
        })?;
        debug!(run_dir = %run_dir.display(), "run directory ready");
        Ok(run_dir)
    }

    /// Get the log file if one is configured
    pub fn get_log_file(&self) -> Result<Option<PathBuf>, RunbenchError> {
        match &self.run.log_file_name {
            Some(file_name) => Ok(Some(self.get_run_dir()?.join(file_name))),
            None => Ok(None),
        }
    }

    /// Get the task record file
    pub fn get_task_record_file(&self) -> Result<PathBuf, RunbenchError> {
        Ok(self.get_run_dir()?.join(&self.run.task_record_file_name))
    }

    /// All derived paths, creating the run directory
    pub fn get_paths(&self) -> Result<RunPaths, RunbenchError> {
        Ok(RunPaths {
            run_dir: self.get_run_dir()?,
            log_file: self.get_log_file()?,
            task_record_file: self.get_task_record_file()?,
        })
    }

    /// Write this config as JSON into the run directory
    pub fn write_config_snapshot(&self) -> Result<PathBuf, RunbenchError> {
        let path = self.get_run_dir()?.join(CONFIG_SNAPSHOT_FILE_NAME);
        self.save(&path)?;
        Ok(path)
    }
}

impl Config for BenchmarkConfig {
    fn validate(&self) -> Result<(), RunbenchError> {
        if self.name.trim().is_empty() {
            return Err(RunbenchError::validation("name", "must not be empty"));
        }
        self.executor.validate_as("executor")?;
        self.run.validate().map_err(|e| e.within("run"))?;
        self.workflow.validate_as("workflow")?;
        Ok(())
    }

    fn check_toml_representable(&self) -> Result<(), RunbenchError> {
        self.run.check_toml_representable().map_err(|e| e.within("run"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateError;
    use crate::types::component::ComponentConfig;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::tempdir;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn config_in(root: &Path) -> BenchmarkConfig {
        let run = RunConfig {
            run_dir: format!("{}/runs/{{name}}-{{timestamp}}", root.display()),
            ..Default::default()
        };
        BenchmarkConfig::new(
            "bench1",
            ts(),
            ComponentConfig::new("thread-pool"),
            ComponentConfig::new("mapreduce"),
        )
        .with_run(run)
    }

    #[test]
    fn test_formatted_timestamp_zero_padded() {
        let config = config_in(Path::new("/unused"));
        assert_eq!(config.formatted_timestamp(), "2024-01-02-03-04-05");
    }

    #[test]
    fn test_resolve_default_template_is_pure() {
        let config = BenchmarkConfig::new(
            "bench1",
            ts(),
            ComponentConfig::new("thread-pool"),
            ComponentConfig::new("mapreduce"),
        );
        let paths = config.resolve_paths().unwrap();
        assert_eq!(paths.run_dir, PathBuf::from("runs/bench1-2024-01-02-03-04-05"));
        assert_eq!(
            paths.log_file,
            Some(PathBuf::from("runs/bench1-2024-01-02-03-04-05/log.txt"))
        );
        assert_eq!(
            paths.task_record_file,
            PathBuf::from("runs/bench1-2024-01-02-03-04-05/tasks.json")
        );
    }

    #[test]
    fn test_get_run_dir_creates_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let first = config.get_run_dir().unwrap();
        assert!(first.is_dir());
        assert_eq!(first, dir.path().join("runs").join("bench1-2024-01-02-03-04-05"));

        let second = config.get_run_dir().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_log_and_task_record_files() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        let run_dir = config.get_run_dir().unwrap();

        assert_eq!(config.get_log_file().unwrap(), Some(run_dir.join("log.txt")));
        assert_eq!(config.get_task_record_file().unwrap(), run_dir.join("tasks.json"));

        config.run.log_file_name = None;
        assert_eq!(config.get_log_file().unwrap(), None);
        assert_eq!(config.get_task_record_file().unwrap(), run_dir.join("tasks.json"));
    }

    #[test]
    fn test_unknown_placeholder_fails_on_access() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.run.run_dir = format!("{}/runs/{{unknown}}", dir.path().display());

        let err = config.get_run_dir().unwrap_err();
        assert!(matches!(
            err,
            RunbenchError::Template(TemplateError::UnknownPlaceholder(ref key)) if key == "unknown"
        ));
        assert!(config.get_log_file().is_err());
        assert!(!dir.path().join("runs").exists());
    }

    #[test]
    fn test_file_in_the_way_is_filesystem_error() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let target = config.resolve_run_dir().unwrap();
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"not a directory").unwrap();

        let err = config.get_run_dir().unwrap_err();
        assert!(matches!(err, RunbenchError::Filesystem { ref path, .. } if *path == target));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("2024-01-02T03:04:05").unwrap(), ts());
        assert_eq!(parse_timestamp("2024-01-02 03:04:05").unwrap(), ts());
        assert_eq!(parse_timestamp("2024-01-02-03-04-05").unwrap(), ts());
        assert_eq!(parse_timestamp("2024-01-02T03:04:05+09:00").unwrap(), ts());
        assert_eq!(parse_timestamp("2024-01-02T03:04:05Z").unwrap(), ts());
        let fractional = parse_timestamp("2024-01-02T03:04:05.250").unwrap();
        assert_eq!(fractional.nanosecond(), 250_000_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_json_document_roundtrip() {
        let doc = r#"{
            "name": "bench1",
            "timestamp": "2024-01-02T03:04:05",
            "executor": { "kind": "process-pool", "max_workers": 8 },
            "run": { "log_file_name": null, "log_level": 10 },
            "workflow": { "kind": "fedlearn", "rounds": 3 }
        }"#;
        let config = BenchmarkConfig::from_json_str(doc).unwrap();
        assert_eq!(config.timestamp, ts());
        assert_eq!(config.run.log_file_name, None);
        assert_eq!(config.executor.option("max_workers"), Some(&serde_json::json!(8)));

        let json = config.to_json_string().unwrap();
        let reloaded = BenchmarkConfig::from_json_str(&json).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_toml_native_datetime() {
        let doc = r#"
            name = "bench1"
            timestamp = 2024-01-02T03:04:05

            [executor]
            kind = "thread-pool"

            [run]

            [workflow]
            kind = "mapreduce"
        "#;
        let config = BenchmarkConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.timestamp, ts());
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = config_in(Path::new("/unused"));
        config.name = String::new();
        assert!(matches!(config.validate(), Err(RunbenchError::Validation { ref field, .. }) if field == "name"));

        let mut config = config_in(Path::new("/unused"));
        config.run.task_record_file_name = String::new();
        assert!(matches!(
            config.validate(),
            Err(RunbenchError::Validation { ref field, .. }) if field == "run.task_record_file_name"
        ));

        let mut config = config_in(Path::new("/unused"));
        config.workflow.kind = String::new();
        assert!(matches!(
            config.validate(),
            Err(RunbenchError::Validation { ref field, .. }) if field == "workflow.kind"
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let doc = r#"{ "name": "x", "timestamp": "2024-01-02T03:04:05", "run": {}, "workflow": { "kind": "w" } }"#;
        let err = BenchmarkConfig::from_json_str(doc).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("executor"));
    }

    #[test]
    fn test_toml_save_keeps_log_file_disabled() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.run.log_file_name = None;

        let err = config.save(&dir.path().join("c.toml")).unwrap_err();
        assert!(matches!(
            err,
            RunbenchError::Validation { ref field, .. } if field == "run.log_file_name"
        ));
        assert!(!dir.path().join("c.toml").exists());

        let path = dir.path().join("c.json");
        config.save(&path).unwrap();
        assert_eq!(BenchmarkConfig::load(&path).unwrap().run.log_file_name, None);
    }

    #[test]
    fn test_write_config_snapshot() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let path = config.write_config_snapshot().unwrap();
        assert_eq!(path, config.get_run_dir().unwrap().join("config.json"));
        assert_eq!(BenchmarkConfig::load(&path).unwrap(), config);
    }
}
