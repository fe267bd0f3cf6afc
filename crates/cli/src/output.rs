//! Per-file progress lines on stdout

use pagewarm_core::{FileFailure, RunSummary, WarmOutcome, WarmReport};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::{self, Write};

/// How progress is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One `Done: <path> @[block=<key> chunks=<n>]` line per warmed file
    #[default]
    Text,
    /// One JSON object per file followed by a summary object
    Json,
    /// Nothing on stdout
    Quiet,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonLine<'a> {
    Done(&'a WarmReport),
    Failed(&'a FileFailure),
    Summary(&'a RunSummary),
}

/// Serializes report lines from many workers onto one writer.
///
/// Each line is written and flushed under the lock so lines never interleave.
/// Failures go to the log in text mode; only the JSON stream carries them.
pub struct ReportPrinter<W: Write + Send> {
    format: ReportFormat,
    out: Mutex<W>,
}

impl ReportPrinter<io::Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(format, io::stdout())
    }
}

impl<W: Write + Send> ReportPrinter<W> {
    pub fn new(format: ReportFormat, out: W) -> Self {
        Self {
            format,
            out: Mutex::new(out),
        }
    }

    /// Write the line for one outcome. Write errors (closed pipe) are dropped.
    pub fn outcome(&self, outcome: &WarmOutcome) {
        let line = match (self.format, outcome) {
            (ReportFormat::Quiet, _) | (ReportFormat::Text, Err(_)) => return,
            (ReportFormat::Text, Ok(report)) => report.to_string(),
            (ReportFormat::Json, Ok(report)) => json(&JsonLine::Done(report)),
            (ReportFormat::Json, Err(failure)) => json(&JsonLine::Failed(failure)),
        };
        self.write_line(&line);
    }

    /// Write the closing summary; only the JSON format has one
    pub fn summary(&self, summary: &RunSummary) {
        if self.format == ReportFormat::Json {
            self.write_line(&json(&JsonLine::Summary(summary)));
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        if writeln!(out, "{line}").and_then(|()| out.flush()).is_err() {
            tracing::trace!("report line dropped");
        }
    }
}

fn json(line: &JsonLine<'_>) -> String {
    serde_json::to_string(line).unwrap_or_else(|e| format!(r#"{{"status":"error","message":"{e}"}}"#))
}
