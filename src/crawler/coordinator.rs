//! Crawler coordinator - main crawl orchestration logic
//!
//! This module runs the three phases of a crawl strictly in order:
//! - Discovery of every product link from the seed listing page
//! - Record extraction, one product at a time
//! - Writing the batch artifact
//!
//! Discovery has fully finished before the first product page is fetched.

use crate::config::Config;
use crate::crawler::{Deadline, Discoverer, HttpFetcher, Pacer, PageFetcher, RecordRunner};
use crate::extract::ProductParser;
use crate::output::{JsonFileSink, RecordSink, RunReport};
use crate::url::CatalogMatcher;
use crate::SieveError;
use chrono::Utc;
use std::sync::Arc;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    sink: Box<dyn RecordSink + Send + Sync>,
    matcher: CatalogMatcher,
    parser: ProductParser,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP and writes the JSON artifact
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SieveError)` - Invalid catalog/image settings or HTTP client failure
    pub fn new(config: Config) -> Result<Self, SieveError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self, SieveError> {
        let matcher = CatalogMatcher::new(&config.catalog)?;
        let parser = ProductParser::new(&config)?;
        let sink = Box::new(JsonFileSink::new(&config.output.records_path));

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            sink,
            matcher,
            parser,
        })
    }

    /// Runs discovery, extraction and output
    ///
    /// A discovery failure or an expired run deadline aborts before anything
    /// is written. Individual product failures only show up in the report.
    pub async fn run(&self) -> Result<RunReport, SieveError> {
        let started_at = Utc::now();
        let crawler = &self.config.crawler;
        let deadline = Deadline::from_secs(crawler.run_timeout_secs);

        let seed = self.matcher.seed_url()?;
        tracing::info!("Starting discovery at {}", seed);

        let discovery = Discoverer::new(self.fetcher.as_ref(), &self.matcher)
            .with_pacer(Pacer::new(
                crawler.discovery_delay_min_ms,
                crawler.discovery_delay_max_ms,
            ))
            .with_deadline(deadline)
            .discover(&seed)
            .await?;

        tracing::info!("Found {} product links", discovery.product_links.len());

        let harvest = RecordRunner::new(self.fetcher.as_ref(), &self.parser)
            .with_pacer(Pacer::new(
                crawler.product_delay_min_ms,
                crawler.product_delay_max_ms,
            ))
            .with_deadline(deadline)
            .run(&discovery.product_links)
            .await?;

        self.sink.write_records(&harvest.records)?;

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            pages_visited: discovery.visited_pages.len(),
            product_links: discovery.product_links.len(),
            records_written: harvest.records.len(),
            failures: harvest.failures,
            artifact: self.sink.location(),
        };

        tracing::info!(
            "Crawl completed: {} records from {} product links ({} failed) in {}s",
            report.records_written,
            report.product_links,
            report.failures.len(),
            report.duration_seconds()
        );

        Ok(report)
    }
}

/// Convenience function to run a crawl
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Example
///
/// ```no_run
/// use engine_sieve::config::Config;
/// use engine_sieve::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{}", report.render());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunReport, SieveError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::mock::MapFetcher;
    use crate::output::read_records;
    use tempfile::TempDir;

    fn create_test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.output.records_path = dir
            .path()
            .join("engines.json")
            .to_string_lossy()
            .into_owned();
        config.crawler.discovery_delay_min_ms = 0;
        config.crawler.discovery_delay_max_ms = 0;
        config.crawler.product_delay_min_ms = 0;
        config.crawler.product_delay_max_ms = 0;
        config
    }

    fn shop() -> MapFetcher {
        MapFetcher::new()
            .page(
                "https://mysakura.ru/catalog/dvigatel",
                r#"<a href="/product/2">2</a><a href="/product/1">1</a><a href="/product/404">x</a>"#,
            )
            .page(
                "https://mysakura.ru/product/1",
                "<h1>Двигатель 1KD дизель</h1><p>Цена 185 000 руб.</p>",
            )
            .page(
                "https://mysakura.ru/product/2",
                "<h1>Двигатель CDAB</h1><p>Марка:</p><p>Audi</p>",
            )
    }

    #[test]
    fn test_coordinator_creation() {
        let dir = TempDir::new().unwrap();
        assert!(Coordinator::new(create_test_config(&dir)).is_ok());
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(&dir);
        config.catalog.base_url = "not a url".to_string();
        let result = Coordinator::with_fetcher(config, Arc::new(MapFetcher::new()));
        assert!(matches!(result, Err(SieveError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir);
        let path = config.output.records_path.clone();

        let coordinator = Coordinator::with_fetcher(config, Arc::new(shop())).unwrap();
        let report = coordinator.run().await.unwrap();

        assert_eq!(report.pages_visited, 1);
        assert_eq!(report.product_links, 3);
        assert_eq!(report.records_written, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.artifact, path);

        let records = read_records(std::path::Path::new(&path)).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(records[0].price, Some(185000));
        assert_eq!(records[1].make.as_deref(), Some("Audi"));
    }

    #[tokio::test]
    async fn test_discovery_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir);
        let path = config.output.records_path.clone();

        let coordinator = Coordinator::with_fetcher(config, Arc::new(MapFetcher::new())).unwrap();
        let result = coordinator.run().await;

        assert!(matches!(result, Err(SieveError::Discovery { .. })));
        assert!(!std::path::Path::new(&path).exists());
    }
}
