use serde::Deserialize;

/// Main configuration structure for Engine-Sieve
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// values for the mysakura.ru engine catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the catalog lives and how its URLs are shaped
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Site origin, e.g. "https://mysakura.ru"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the seed listing page; also the prefix of every listing page
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// Path prefix followed by the numeric product ID
    #[serde(rename = "product-path")]
    pub product_path: String,

    /// Query parameter that selects a listing page
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Fixed origin tag written into every record
    #[serde(rename = "source-tag")]
    pub source_tag: String,

    /// Fixed currency written into every record
    pub currency: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mysakura.ru".to_string(),
            listing_path: "/catalog/dvigatel".to_string(),
            product_path: "/product".to_string(),
            page_param: "page".to_string(),
            source_tag: "mysakura".to_string(),
            currency: "RUB".to_string(),
        }
    }
}

/// Image filtering rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Only URLs starting with this prefix are kept
    #[serde(rename = "asset-prefix")]
    pub asset_prefix: String,

    /// Case-insensitive substrings marking "no photo" stand-ins
    #[serde(rename = "placeholder-hints")]
    pub placeholder_hints: Vec<String>,

    /// CSS selectors of blocks showing other products (cross-sells)
    #[serde(rename = "excluded-blocks")]
    pub excluded_blocks: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            asset_prefix: "https://storage.yandexcloud.net/mysakura/".to_string(),
            placeholder_hints: ["placeholder", "no_photo", "no-photo", "nophoto", "stub"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_blocks: vec![
                ".slider_additional_parts".to_string(),
                ".additional_parts".to_string(),
            ],
        }
    }
}

/// Crawler pacing and timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Lower bound of the pause between listing-page fetches (milliseconds)
    #[serde(rename = "discovery-delay-min-ms")]
    pub discovery_delay_min_ms: u64,

    /// Upper bound of the pause between listing-page fetches (milliseconds)
    #[serde(rename = "discovery-delay-max-ms")]
    pub discovery_delay_max_ms: u64,

    /// Lower bound of the pause between product-page fetches (milliseconds)
    #[serde(rename = "product-delay-min-ms")]
    pub product_delay_min_ms: u64,

    /// Upper bound of the pause between product-page fetches (milliseconds)
    #[serde(rename = "product-delay-max-ms")]
    pub product_delay_max_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Overall run deadline (seconds); no deadline when absent
    #[serde(rename = "run-timeout-secs")]
    pub run_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            discovery_delay_min_ms: 600,
            discovery_delay_max_ms: 1200,
            product_delay_min_ms: 800,
            product_delay_max_ms: 1500,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
            run_timeout_secs: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "EngineSieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/engine-sieve".to_string(),
            contact_email: "you@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON batch artifact
    #[serde(rename = "records-path")]
    pub records_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: "engines_mysakura_new.json".to_string(),
        }
    }
}
