//! In-memory [`PageFetcher`] for unit tests

use crate::crawler::PageFetcher;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves fixed bodies by URL; unknown URLs answer 404
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    failures: Mutex<HashMap<String, FetchError>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Makes `url` fail once with `error`
    pub fn fail(self, url: &str, error: FetchError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(url.to_string(), error);
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        if let Some(error) = self.failures.lock().unwrap().remove(url) {
            return Err(error);
        }

        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
