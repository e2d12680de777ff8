//! Record extraction over the discovered product links
//!
//! Products are processed strictly one after another in sorted URL order. A
//! product that cannot be fetched or parsed is logged and skipped; only the
//! run deadline stops the loop.

use crate::crawler::{Deadline, Pacer, PageFetcher};
use crate::extract::ProductParser;
use crate::record::EngineRecord;
use crate::{ProductError, SieveError};
use std::collections::BTreeSet;

/// A product that produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub url: String,
    pub reason: String,
}

/// Records and failures of one extraction pass
#[derive(Debug, Default)]
pub struct Harvest {
    /// Successful records in processing order
    pub records: Vec<EngineRecord>,
    pub failures: Vec<ItemFailure>,
}

impl Harvest {
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Fetches and parses product pages one at a time
pub struct RecordRunner<'a> {
    fetcher: &'a dyn PageFetcher,
    parser: &'a ProductParser,
    pacer: Pacer,
    deadline: Deadline,
}

impl<'a> RecordRunner<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, parser: &'a ProductParser) -> Self {
        Self {
            fetcher,
            parser,
            pacer: Pacer::none(),
            deadline: Deadline::none(),
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Extracts a record from every link
    ///
    /// Per-item errors end up in [`Harvest::failures`]. The only error
    /// returned is [`SieveError::DeadlineExceeded`].
    pub async fn run(&self, links: &BTreeSet<String>) -> Result<Harvest, SieveError> {
        let total = links.len();
        let mut harvest = Harvest::default();

        for (index, url) in links.iter().enumerate() {
            if index > 0 && !self.pacer.pause(&self.deadline).await {
                return Err(SieveError::DeadlineExceeded);
            }

            match self.extract_one(url).await {
                Ok(record) => {
                    tracing::info!("[{}/{}] OK {}", index + 1, total, url);
                    harvest.records.push(record);
                }
                Err(ProductError::Fetch(e)) if e.is_deadline() => {
                    tracing::warn!("[{}/{}] deadline reached at {}", index + 1, total, url);
                    return Err(SieveError::DeadlineExceeded);
                }
                Err(e) => {
                    tracing::warn!("[{}/{}] FAIL {}: {}", index + 1, total, url, e);
                    harvest.failures.push(ItemFailure {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(harvest)
    }

    /// Fetches and parses a single product page
    pub async fn extract_one(&self, url: &str) -> Result<EngineRecord, ProductError> {
        let html = self.deadline.fetch(url, self.fetcher.fetch(url)).await?;
        Ok(self.parser.parse(&html, url)?)
    }
}
