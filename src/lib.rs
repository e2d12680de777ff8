//! Engine-Sieve: a polite catalog crawler for used engine listings
//!
//! This crate walks the paginated engine catalog of a single shop, visits every
//! product page it finds, and extracts a normalized [`EngineRecord`] from each
//! one through HTML heuristics. The collected records are written out as a
//! single JSON batch for the downstream loader.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Engine-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A listing page could not be fetched; the product set would be incomplete
    #[error("Discovery failed at {url}: {source}")]
    Discovery { url: String, source: FetchError },

    #[error("Run deadline exceeded")]
    DeadlineExceeded,

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Run deadline reached while fetching {url}")]
    DeadlineExceeded { url: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Returns true if the whole run has run out of time
    pub fn is_deadline(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}

/// Errors raised while turning a fetched product page into a record
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid product URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Why a single product could not be turned into a record
///
/// Both variants are recovered by the run loop: the item is logged and skipped.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern in config: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Engine-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;


// Re-export commonly used types
pub use config::Config;
pub use record::{EngineRecord, EngineType};
pub use state::PageState;
pub use url::{normalize_url, product_id_from_url};
