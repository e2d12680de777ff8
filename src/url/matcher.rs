use crate::config::CatalogConfig;
use crate::url::normalize_url;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// What a link on a listing page points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLink {
    /// A product detail page, e.g. `https://mysakura.ru/product/123`
    Product(String),
    /// Another listing page carrying a page selector, e.g. `/catalog/dvigatel?page=2`
    Listing(String),
}

/// Recognizes product and listing links of one catalog site
///
/// Links are resolved against the page they were found on and must stay on
/// the catalog host. Product links are reduced to `{origin}{product-path}/{id}`
/// so trailing slashes and query strings do not produce duplicates; listing
/// links go through [`normalize_url`].
#[derive(Debug, Clone)]
pub struct CatalogMatcher {
    base: Url,
    listing_path: String,
    page_param: String,
    product_path: String,
    product_page: Regex,
    product_id: Regex,
}

impl CatalogMatcher {
    /// Builds a matcher from the catalog configuration
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let escaped = regex::escape(&config.product_path);
        let product_page = Regex::new(&format!(r"^{}/(\d+)/?$", escaped))
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;
        let product_id = product_id_pattern(&config.product_path)?;

        Ok(Self {
            base,
            listing_path: config.listing_path.clone(),
            page_param: config.page_param.clone(),
            product_path: config.product_path.clone(),
            product_page,
            product_id,
        })
    }

    /// The seed listing URL: base URL joined with the listing path
    pub fn seed_url(&self) -> Result<Url, ConfigError> {
        self.base
            .join(&self.listing_path)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.listing_path, e)))
    }

    /// Classifies an `href` found on `page`; `None` for anything else
    pub fn classify(&self, href: &str, page: &Url) -> Option<CatalogLink> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let resolved = page.join(href).ok()?;
        if resolved.host_str() != self.base.host_str() || resolved.port() != self.base.port() {
            return None;
        }

        let path = resolved.path();
        if let Some(caps) = self.product_page.captures(path) {
            let mut product = resolved.clone();
            product.set_path(&format!("{}/{}", self.product_path, &caps[1]));
            product.set_query(None);
            product.set_fragment(None);
            return Some(CatalogLink::Product(product.into()));
        }

        if path.starts_with(&self.listing_path) && self.has_page_selector(&resolved) {
            return normalize_url(resolved.as_str())
                .ok()
                .map(|url| CatalogLink::Listing(url.into()));
        }

        None
    }

    /// Parses the product ID of a product URL
    pub fn product_id(&self, url: &str) -> Option<u64> {
        capture_id(&self.product_id, url)
    }

    fn has_page_selector(&self, url: &Url) -> bool {
        url.query_pairs().any(|(key, _)| key == self.page_param.as_str())
    }
}

/// Parses the first integer that directly follows `/product/` in a URL
///
/// Returns `None` (never panics) when the URL has no such segment or the
/// number does not fit.
///
/// ```
/// use engine_sieve::url::product_id_from_url;
///
/// assert_eq!(product_id_from_url("https://mysakura.ru/product/48213"), Some(48213));
/// assert_eq!(product_id_from_url("https://mysakura.ru/catalog/dvigatel"), None);
/// ```
pub fn product_id_from_url(url: &str) -> Option<u64> {
    let pattern = product_id_pattern("/product").ok()?;
    capture_id(&pattern, url)
}

fn product_id_pattern(product_path: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!(r"{}/(\d+)", regex::escape(product_path)))
        .map_err(|e| ConfigError::InvalidPattern(e.to_string()))
}

fn capture_id(pattern: &Regex, url: &str) -> Option<u64> {
    pattern
        .captures(url)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}
