//! Record extraction from product pages
//!
//! This module turns the raw HTML of one product page into an [`EngineRecord`]:
//! - `dom`: reading-order node abstraction used by the label/value search
//! - `fields`: title, labeled attributes, description, price, engine type
//! - `images`: trusted photo URLs of the current product

mod dom;
mod fields;
mod images;

pub use dom::{element_text, join_text, visible_text, DocumentNode, DomCursor, FlatDocument};
pub use fields::{
    extract_description, extract_price, extract_title, guess_engine_type, labeled_value,
    value_after, ENGINE_CODE_LABEL, MAKE_LABEL, MAX_VALUE_HOPS, MODEL_LABEL, OEM_LABEL,
    STOCK_LABEL, YEAR_LABEL,
};
pub use images::{collect_images, srcset_urls, ImageRules};

use crate::config::Config;
use crate::record::EngineRecord;
use crate::url::CatalogMatcher;
use crate::{ConfigError, ExtractError};
use scraper::Html;
use url::Url;

/// Builds [`EngineRecord`]s from product page HTML
///
/// Holds everything that is compiled once per run: the product URL pattern,
/// the image rules, and the fixed source tag and currency.
#[derive(Debug, Clone)]
pub struct ProductParser {
    matcher: CatalogMatcher,
    images: ImageRules,
    source: String,
    currency: String,
}

impl ProductParser {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            matcher: CatalogMatcher::new(&config.catalog)?,
            images: ImageRules::new(&config.images)?,
            source: config.catalog.source_tag.clone(),
            currency: config.catalog.currency.clone(),
        })
    }

    /// Parses one product page
    ///
    /// Missing fields come back as `None`, even on an empty page; only an
    /// unusable URL is an error.
    pub fn parse(&self, html: &str, url: &str) -> Result<EngineRecord, ExtractError> {
        Url::parse(url).map_err(|e| ExtractError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let document = Html::parse_document(html);
        let flat = FlatDocument::new(&document);
        let field = |label: &str| flat.first().and_then(|start| labeled_value(start, label));

        let title = extract_title(&document);
        let make = field(MAKE_LABEL);
        let model = field(MODEL_LABEL);
        let year = field(YEAR_LABEL);
        let engine_code = field(ENGINE_CODE_LABEL);
        let oem = field(OEM_LABEL);
        let stock_text = field(STOCK_LABEL);

        let description = extract_description(&visible_text(&document, "\n"));
        let price = extract_price(&visible_text(&document, " "));
        let images = collect_images(&document, &self.images);
        let engine_type = guess_engine_type(engine_code.as_deref(), title.as_deref());

        tracing::trace!(
            "Parsed {}: title={:?} price={:?} images={}",
            url,
            title,
            price,
            images.len()
        );

        Ok(EngineRecord {
            source: self.source.clone(),
            source_url: url.to_string(),
            product_id: self.matcher.product_id(url),
            title,
            make,
            model,
            year,
            engine_code,
            engine_type,
            price,
            currency: self.currency.clone(),
            stock_text,
            oem,
            description,
            images,
        })
    }
}
