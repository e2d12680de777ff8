//! Output sink trait and run report types
//!
//! This module defines the trait interface for record sinks and the summary
//! of a finished run.

use crate::crawler::ItemFailure;
use crate::record::EngineRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of the extracted record batch
pub trait RecordSink {
    /// Writes the whole batch, replacing any earlier content
    fn write_records(&self, records: &[EngineRecord]) -> OutputResult<()>;

    /// Human-readable location, used in log lines and the final confirmation
    fn location(&self) -> String;
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Listing pages fetched during discovery
    pub pages_visited: usize,

    /// Distinct product links found
    pub product_links: usize,

    pub records_written: usize,

    /// Products skipped, with the reason
    pub failures: Vec<ItemFailure>,

    /// Where the batch went
    pub artifact: String,
}

impl RunReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Share of product links that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.product_links == 0 {
            return 0.0;
        }
        (self.records_written as f64 / self.product_links as f64) * 100.0
    }

    /// Multi-line plain text summary for the terminal
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Run Summary ===\n");
        out.push_str(&format!(
            "Started:  {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!(
            "Finished: {} ({}s)\n",
            self.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.duration_seconds()
        ));
        out.push_str(&format!("Listing pages visited: {}\n", self.pages_visited));
        out.push_str(&format!("Product links found:   {}\n", self.product_links));
        out.push_str(&format!(
            "Records written:       {} ({:.1}%)\n",
            self.records_written,
            self.success_rate()
        ));

        if !self.failures.is_empty() {
            out.push_str(&format!("Failures ({}):\n", self.failures.len()));
            for failure in &self.failures {
                out.push_str(&format!("  - {}: {}\n", failure.url, failure.reason));
            }
        }

        out.push_str(&format!("Saved: {}\n", self.artifact));
        out
    }
}
