//! Page discovery over the paginated catalog
//!
//! Starting from the seed listing page, every listing page reachable through
//! pagination links is fetched exactly once and every product link on it is
//! collected. A listing page that cannot be fetched ends discovery with an
//! error: a partial product set would look complete to everything downstream.

use crate::crawler::parser::parse_listing;
use crate::crawler::{Deadline, Pacer, PageFetcher};
use crate::state::Frontier;
use crate::url::{normalize_url, CatalogMatcher};
use crate::SieveError;
use std::collections::BTreeSet;
use url::Url;

/// Outcome of a completed discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Every distinct product detail URL, sorted
    pub product_links: BTreeSet<String>,

    /// Listing pages fetched, sorted
    pub visited_pages: Vec<String>,
}

/// Walks the listing pages of one catalog
pub struct Discoverer<'a> {
    fetcher: &'a dyn PageFetcher,
    matcher: &'a CatalogMatcher,
    pacer: Pacer,
    deadline: Deadline,
}

impl<'a> Discoverer<'a> {
    /// Creates a discoverer without delays or deadline
    pub fn new(fetcher: &'a dyn PageFetcher, matcher: &'a CatalogMatcher) -> Self {
        Self {
            fetcher,
            matcher,
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

    /// Drains the listing-page worklist starting at `seed`
    ///
    /// # Errors
    ///
    /// * [`SieveError::Discovery`] - a listing page could not be fetched
    /// * [`SieveError::DeadlineExceeded`] - the run deadline passed
    pub async fn discover(&self, seed: &Url) -> Result<Discovery, SieveError> {
        let seed = normalize_url(seed.as_str())?;
        let mut frontier = Frontier::with_seed(seed.as_str());
        let mut product_links = BTreeSet::new();
        let mut fetched = 0usize;

        while let Some(page) = frontier.next_page() {
            if fetched > 0 && !self.pacer.pause(&self.deadline).await {
                return Err(SieveError::DeadlineExceeded);
            }
            fetched += 1;

            tracing::debug!("Fetching listing page {}", page);
            let html = self
                .deadline
                .fetch(&page, self.fetcher.fetch(&page))
                .await
                .map_err(|source| {
                    if source.is_deadline() {
                        SieveError::DeadlineExceeded
                    } else {
                        SieveError::Discovery {
                            url: page.clone(),
                            source,
                        }
                    }
                })?;

            let page_url = Url::parse(&page)?;
            let links = parse_listing(&html, &page_url, self.matcher);

            let before = product_links.len();
            product_links.extend(links.products);
            let new_pages = links
                .pages
                .into_iter()
                .filter(|next| frontier.enqueue(next.as_str()))
                .count();

            tracing::debug!(
                "{}: {} new product links, {} new listing pages, {} pending",
                page,
                product_links.len() - before,
                new_pages,
                frontier.pending()
            );
        }

        tracing::info!(
            "Discovery finished: {} product links on {} listing pages",
            product_links.len(),
            frontier.visited_count()
        );

        Ok(Discovery {
            product_links,
            visited_pages: frontier.visited_pages(),
        })
    }
}
