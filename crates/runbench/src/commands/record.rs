//! Record command implementation

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use librunbench_core::{parse_timestamp, RunbenchError, TaskRecord, TaskRecordWriter};
use serde::Serialize;

use crate::cli::{Cli, ConfigSource, StatusArg};
use crate::context;
use crate::output::{emit, Report};

#[derive(Serialize)]
struct RecordReport {
    task_record_file: PathBuf,
    task_id: String,
    status: &'static str,
}

impl Report for RecordReport {
    fn summary(&self) -> String {
        format!(
            "Recorded task {} ({}) in {}",
            self.task_id,
            self.status,
            self.task_record_file.display()
        )
    }
}

pub struct RecordArgs {
    pub task_id: String,
    pub task_name: String,
    pub status: StatusArg,
    pub error: Option<String>,
    pub started: Option<String>,
    pub finished: Option<String>,
}

/// Parse a record time; times without an offset are taken as UTC
fn parse_record_time(field: &str, value: Option<&str>) -> Result<DateTime<Utc>, RunbenchError> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(ts.with_timezone(&Utc));
    }
    parse_timestamp(value)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| RunbenchError::validation(field, e.to_string()))
}

pub fn run(cli: &Cli, source: &ConfigSource, args: RecordArgs) -> Result<(), RunbenchError> {
    let config = context::resolve(source)?;

    let started = parse_record_time("started", args.started.as_deref())?;
    let finished = parse_record_time("finished", args.finished.as_deref())?;
    if finished < started {
        return Err(RunbenchError::validation("finished", "must not be before started"));
    }

    if matches!(args.status, StatusArg::Success) && args.error.is_some() {
        return Err(RunbenchError::InvalidArgs(
            "--error is only valid with --status failure".to_string(),
        ));
    }

    let record = match args.status {
        StatusArg::Success => TaskRecord::success(args.task_id, args.task_name, started, finished),
        StatusArg::Failure => TaskRecord::failure(
            args.task_id,
            args.task_name,
            started,
            finished,
            args.error.unwrap_or_else(|| "task failed".to_string()),
        ),
    };
    let path = config.get_task_record_file()?;
    let mut writer = TaskRecordWriter::open(&path)?;
    writer.append(&record)?;

    emit(
        cli,
        &RecordReport {
            task_record_file: writer.path().to_path_buf(),
            task_id: record.task_id,
            status: record.status.as_str(),
        },
    );
    Ok(())
}
