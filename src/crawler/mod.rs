//! Crawler module for catalog discovery and record extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - Listing page parsing and pagination traversal
//! - Randomized politeness delays and the run deadline
//! - The per-product extraction loop
//! - Overall crawl coordination

mod coordinator;
mod deadline;
mod discovery;
mod fetcher;
#[cfg(test)]
mod mock;
mod pacer;
mod parser;
mod runner;

pub use coordinator::{run_crawl, Coordinator};
pub use deadline::Deadline;
pub use discovery::{Discoverer, Discovery};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use pacer::Pacer;
pub use parser::{parse_listing, ListingLinks};
pub use runner::{Harvest, ItemFailure, RecordRunner};

use crate::config::Config;
use crate::output::RunReport;
use crate::SieveError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Discover every product link from the seed listing page
/// 3. Extract a record from each product page
/// 4. Write the batch artifact
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - Crawl completed, possibly with skipped products
/// * `Err(SieveError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<RunReport, SieveError> {
    run_crawl(config).await
}
