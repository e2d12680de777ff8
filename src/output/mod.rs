//! Output module for the record batch and run summaries
//!
//! This module handles:
//! - Writing the extracted records as one JSON batch artifact
//! - Summarizing a finished run
//! - Computing statistics over an existing artifact

mod json;
pub mod stats;
mod traits;

pub use json::{read_records, JsonFileSink};
pub use stats::{load_statistics, print_statistics, ArtifactStatistics};
pub use traits::{OutputError, OutputResult, RecordSink, RunReport};
