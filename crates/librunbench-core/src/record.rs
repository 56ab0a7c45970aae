//! Task record file
//!
//! One JSON object per line. Writers hold an exclusive advisory lock while
//! appending so that several processes can share one record file.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RunbenchError;

/// Outcome of a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Failure,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Success => "success",
            TaskStatus::Failure => "failure",
        }
    }
}

/// One line of the task record file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub name: String,
    pub status: TaskStatus,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Collaborator-defined fields
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    pub fn success(
        task_id: impl Into<String>,
        name: impl Into<String>,
        started: DateTime<Utc>,
        finished: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            name: name.into(),
            status: TaskStatus::Success,
            started,
            finished,
            error: None,
            extra: Map::new(),
        }
    }

    pub fn failure(
        task_id: impl Into<String>,
        name: impl Into<String>,
        started: DateTime<Utc>,
        finished: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status: TaskStatus::Failure,
            error: Some(error.into()),
            ..Self::success(task_id, name, started, finished)
        }
    }

    /// Wall-clock duration in seconds
    pub fn elapsed_secs(&self) -> f64 {
        (self.finished - self.started).num_milliseconds() as f64 / 1000.0
    }
}

/// Appends task records to a record file
pub struct TaskRecordWriter {
    path: PathBuf,
    file: File,
}

impl TaskRecordWriter {
    /// Open (creating if needed) a record file for appending
    pub fn open(path: &Path) -> Result<Self, RunbenchError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line
    pub fn append(&mut self, record: &TaskRecord) -> Result<(), RunbenchError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        FileExt::lock_exclusive(&self.file)?;
        let written = self.file.write_all(&line).and_then(|_| self.file.flush());
        let unlocked = FileExt::unlock(&self.file);
        written?;
        unlocked?;
        Ok(())
    }
}

/// Read every record from a record file, skipping blank lines
pub fn read_records(path: &Path) -> Result<Vec<TaskRecord>, RunbenchError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| RunbenchError::Record {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_append_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut writer = TaskRecordWriter::open(&path).unwrap();
        writer
            .append(&TaskRecord::success("t1", "map", at(0), at(2)))
            .unwrap();
        writer
            .append(&TaskRecord::failure("t2", "reduce", at(2), at(3), "boom"))
            .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, TaskStatus::Success);
        assert_eq!(records[0].elapsed_secs(), 2.0);
        assert_eq!(records[1].error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        for i in 0..3 {
            let mut writer = TaskRecordWriter::open(&path).unwrap();
            writer
                .append(&TaskRecord::success(format!("t{}", i), "map", at(0), at(1)))
                .unwrap();
        }

        let ids: Vec<String> = read_records(&path)
            .unwrap()
            .into_iter()
            .map(|r| r.task_id)
            .collect();
        assert_eq!(ids, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let good = serde_json::to_string(&TaskRecord::success("t1", "map", at(0), at(1))).unwrap();
        std::fs::write(&path, format!("{}\n\n{{not json\n", good)).unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, RunbenchError::Record { line: 3, .. }));
    }

    #[test]
    fn test_extra_fields_preserved() {
        let mut record = TaskRecord::success("t1", "map", at(0), at(1));
        record.extra.insert("worker".to_string(), Value::from("w-3"));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        let back: TaskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
