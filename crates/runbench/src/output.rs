//! Command output
//!
//! Each command hands back one report. With `--json` the report is wrapped in
//! a versioned envelope on stdout; otherwise its human summary is printed.
//! Errors go to stderr in the same two shapes.

use librunbench_core::{RunPaths, RunbenchError};
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::Cli;

const SCHEMA_VERSION: u32 = 1;

/// Result of a command, printable for people and for machines
pub trait Report: Serialize {
    /// Plain-text summary, one fact per line
    fn summary(&self) -> String;
}

impl Report for RunPaths {
    fn summary(&self) -> String {
        let log_file = match &self.log_file {
            Some(path) => path.display().to_string(),
            None => "(disabled)".to_string(),
        };
        format!(
            "run_dir: {}\nlog_file: {}\ntask_record_file: {}",
            self.run_dir.display(),
            log_file,
            self.task_record_file.display()
        )
    }
}

fn envelope_ok<R: Report>(report: &R) -> Value {
    let data = serde_json::to_value(report)
        .unwrap_or_else(|e| json!({ "render_error": e.to_string() }));
    json!({ "schema_version": SCHEMA_VERSION, "ok": true, "data": data })
}

fn envelope_err(err: &RunbenchError) -> Value {
    let mut error = json!({ "code": err.error_code(), "message": err.to_string() });
    let suggestions = err.suggestions();
    if !suggestions.is_empty() {
        error["details"] = json!({ "suggestions": suggestions });
    }
    json!({ "schema_version": SCHEMA_VERSION, "ok": false, "error": error })
}

/// Print a command's report (nothing in quiet mode unless JSON is requested)
pub fn emit<R: Report>(cli: &Cli, report: &R) {
    if cli.json {
        println!("{:#}", envelope_ok(report));
    } else if !cli.quiet {
        println!("{}", report.summary());
    }
}

/// Print an error with any suggestions
pub fn emit_error(cli: &Cli, err: &RunbenchError) {
    if cli.json {
        eprintln!("{:#}", envelope_err(err));
        return;
    }
    eprintln!("error: {}", err);
    let suggestions = err.suggestions();
    if !suggestions.is_empty() {
        eprintln!("\nSuggestions:");
        for suggestion in suggestions {
            eprintln!("  - {}", suggestion);
        }
    }
}
