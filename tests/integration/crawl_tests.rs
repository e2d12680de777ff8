//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full discovery + extraction cycle end-to-end.

use engine_sieve::config::Config;
use engine_sieve::crawler::{Coordinator, HttpFetcher, PageFetcher};
use engine_sieve::output::{load_statistics, read_records};
use engine_sieve::{EngineType, FetchError, SieveError};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CDN: &str = "https://storage.yandexcloud.net/mysakura/";

/// Creates a test configuration pointing the catalog at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = base_url.to_string();
    config.crawler.discovery_delay_min_ms = 1;
    config.crawler.discovery_delay_max_ms = 5;
    config.crawler.product_delay_min_ms = 1;
    config.crawler.product_delay_max_ms = 5;
    config.crawler.request_timeout_secs = 5;
    config.crawler.run_timeout_secs = Some(60);
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config.user_agent.contact_url = "https://example.com/contact".to_string();
    config.user_agent.contact_email = "test@example.com".to_string();
    config.output.records_path = dir
        .path()
        .join("engines.json")
        .to_string_lossy()
        .into_owned();
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn product_page(title: &str, price: &str, make: &str, code: &str, image: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <h1>{title}</h1>
        <div class="price">{price} ₽</div>
        <div class="gallery"><img src="{cdn}{image}" data-src="{cdn}no_photo.png"></div>
        <div class="text">Пробег 90 000 км, проверен на стенде.</div>
        <h3>Характеристики товара</h3>
        <ul>
          <li><span>Марка:</span> <span>{make}</span></li>
          <li><span>Двигатель:</span> <span>{code}</span></li>
        </ul>
        <div class="slider_additional_parts"><img src="{cdn}related.jpg"></div>
        </body></html>"#,
        cdn = CDN
    )
}

/// Mounts a two-page catalog with three products; product 3 is missing (404)
async fn mount_catalog(server: &MockServer) {
    // Specific pages first: the seed mock below also matches any query
    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .and(query_param("page", "2"))
        .respond_with(html(
            r#"<a href="/product/2">2</a><a href="/product/3">3</a>
               <a href="/catalog/dvigatel?page=1">1</a><a href="/catalog/dvigatel?page=2">2</a>"#
                .to_string(),
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .and(query_param("page", "1"))
        .respond_with(html(
            r#"<a href="/product/1">1</a><a href="/catalog/dvigatel?page=2">2</a>"#.to_string(),
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .respond_with(html(
            r#"<div class="catalog"><a href="/product/1">CDAB</a><a href="/product/2/">1KD</a></div>
               <div class="pagination"><a href="/catalog/dvigatel?page=2">2</a></div>
               <a href="/catalog/korobka?page=2">Коробки</a>"#
                .to_string(),
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/1"))
        .respond_with(html(product_page(
            "Двигатель CDAB бензин",
            "120 000",
            "Audi",
            "CDAB",
            "p1/a.jpg",
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/2"))
        .respond_with(html(product_page(
            "Двигатель 1KD-FTV дизель",
            "185\u{a0}000",
            "Toyota",
            "1KD-FTV",
            "p2/b.jpg",
        )))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_writes_artifact() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let records_path = config.output.records_path.clone();

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.product_links, 3);
    assert_eq!(report.records_written, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].url.ends_with("/product/3"));
    assert!(report.failures[0].reason.contains("404"));

    let records = read_records(Path::new(&records_path)).unwrap();
    assert_eq!(records.len(), 2);

    let audi = &records[0];
    assert_eq!(audi.product_id, Some(1));
    assert_eq!(audi.source, "mysakura");
    assert_eq!(audi.source_url, format!("{}/product/1", mock_server.uri()));
    assert_eq!(audi.title.as_deref(), Some("Двигатель CDAB бензин"));
    assert_eq!(audi.make.as_deref(), Some("Audi"));
    assert_eq!(audi.engine_code.as_deref(), Some("CDAB"));
    assert_eq!(audi.engine_type, EngineType::Petrol);
    assert_eq!(audi.price, Some(120000));
    assert_eq!(audi.currency, "RUB");
    assert_eq!(
        audi.description.as_deref(),
        Some("Пробег 90 000 км, проверен на стенде.")
    );
    assert_eq!(audi.images, vec![format!("{}p1/a.jpg", CDN)]);

    let toyota = &records[1];
    assert_eq!(toyota.product_id, Some(2));
    assert_eq!(toyota.engine_type, EngineType::Diesel);
    assert_eq!(toyota.price, Some(185000));
    assert_eq!(toyota.images, vec![format!("{}p2/b.jpg", CDN)]);
}

#[tokio::test]
async fn test_artifact_statistics() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let records_path = config.output.records_path.clone();

    Coordinator::new(config).unwrap().run().await.unwrap();

    let stats = load_statistics(Path::new(&records_path)).unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.with_price, 2);
    assert_eq!(stats.total_images, 2);
    assert_eq!(stats.by_engine_type.get(&EngineType::Diesel), Some(&1));
    assert!(stats.duplicate_product_ids.is_empty());
}

#[tokio::test]
async fn test_listing_failure_aborts_before_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .respond_with(html(
            r#"<a href="/product/1">1</a><a href="/catalog/dvigatel?page=2">2</a>"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/1"))
        .respond_with(html("<h1>Двигатель</h1>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let records_path = config.output.records_path.clone();

    let result = Coordinator::new(config).unwrap().run().await;

    match result {
        Err(SieveError::Discovery { url, .. }) => assert!(url.ends_with("?page=2")),
        other => panic!("expected discovery failure, got {:?}", other.map(|r| r.records_written)),
    }
    assert!(!Path::new(&records_path).exists());
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html("<p>Пусто</p>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let records_path = config.output.records_path.clone();

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.product_links, 0);
    assert_eq!(report.records_written, 0);
    assert_eq!(
        std::fs::read_to_string(&records_path).unwrap().trim(),
        "[]"
    );
}

#[tokio::test]
async fn test_redirected_product_keeps_source_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .respond_with(html(r#"<a href="/product/7">7</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/7"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/product/7-cdab", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/7-cdab"))
        .respond_with(html(product_page(
            "Двигатель CDAB",
            "99 000",
            "Audi",
            "CDAB",
            "p7/1.jpg",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);

    let report = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(report.records_written, 1);

    let records = read_records(Path::new(&report.artifact)).unwrap();
    assert_eq!(records[0].product_id, Some(7));
    assert_eq!(records[0].source_url, format!("{}/product/7", mock_server.uri()));
    assert_eq!(records[0].price, Some(99000));
}

#[tokio::test]
async fn test_slow_response_is_a_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/9"))
        .respond_with(html("<h1>Двигатель</h1>".to_string()).set_delay(Duration::from_secs(4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), &dir);
    config.crawler.request_timeout_secs = 1;
    let fetcher = HttpFetcher::new(&config).unwrap();

    let url = format!("{}/product/9", mock_server.uri());
    let started = Instant::now();
    let result = fetcher.fetch(&url).await;

    match result {
        Err(FetchError::Timeout { url: failed }) => assert_eq!(failed, url),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_slow_product_is_skipped_and_rest_written() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalog/dvigatel"))
        .respond_with(html(
            r#"<a href="/product/1">1</a><a href="/product/2">2</a>"#.to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/1"))
        .respond_with(html(product_page(
            "Двигатель CDAB бензин",
            "120 000",
            "Audi",
            "CDAB",
            "p1/a.jpg",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/2"))
        .respond_with(
            html(product_page(
                "Двигатель 1KD-FTV дизель",
                "185 000",
                "Toyota",
                "1KD-FTV",
                "p2/b.jpg",
            ))
            .set_delay(Duration::from_secs(4)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), &dir);
    config.crawler.request_timeout_secs = 1;
    let records_path = config.output.records_path.clone();

    let report = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.product_links, 2);
    assert_eq!(report.records_written, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].url.ends_with("/product/2"));
    assert!(report.failures[0].reason.to_lowercase().contains("timeout"));

    let records = read_records(Path::new(&records_path)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].product_id, Some(1));
    assert_eq!(records[0].engine_code.as_deref(), Some("CDAB"));
}
