use crate::config::types::{
    CatalogConfig, Config, CrawlerConfig, ImageConfig, OutputConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_image_config(&config.images)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the catalog location and URL shapes
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_http_url("base_url", &config.base_url)?;

    validate_path("listing_path", &config.listing_path)?;
    validate_path("product_path", &config.product_path)?;

    if config.page_param.is_empty() {
        return Err(ConfigError::Validation(
            "page_param cannot be empty".to_string(),
        ));
    }

    if config.source_tag.is_empty() {
        return Err(ConfigError::Validation(
            "source_tag cannot be empty".to_string(),
        ));
    }

    if config.currency.is_empty() {
        return Err(ConfigError::Validation(
            "currency cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates image filtering rules
fn validate_image_config(config: &ImageConfig) -> Result<(), ConfigError> {
    validate_http_url("asset_prefix", &config.asset_prefix)?;

    if config.placeholder_hints.iter().any(|h| h.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "placeholder_hints cannot contain empty entries".to_string(),
        ));
    }

    for block in &config.excluded_blocks {
        Selector::parse(block).map_err(|e| {
            ConfigError::InvalidPattern(format!("Invalid excluded block selector '{}': {:?}", block, e))
        })?;
    }

    Ok(())
}

/// Validates crawler pacing and timeouts
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.discovery_delay_min_ms > config.discovery_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "discovery delay range is empty: {}ms > {}ms",
            config.discovery_delay_min_ms, config.discovery_delay_max_ms
        )));
    }

    if config.product_delay_min_ms > config.product_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "product delay range is empty: {}ms > {}ms",
            config.product_delay_min_ms, config.product_delay_max_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.run_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "run_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a URL parses, is HTTP(S) and has a host
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}

/// Path prefixes must be absolute and must not end with a slash
fn validate_path(field: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') || path.len() < 2 {
        return Err(ConfigError::InvalidPattern(format!(
            "{} must be an absolute path like '/catalog', got '{}'",
            field, path
        )));
    }

    if path.ends_with('/') {
        return Err(ConfigError::InvalidPattern(format!(
            "{} must not end with '/', got '{}'",
            field, path
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
