//! Product photo collection
//!
//! Candidates come from every `<img>` outside the cross-sell blocks, from the
//! direct `src`, the lazy-loading attributes and both kinds of srcset. Only
//! URLs on the trusted asset host with an image extension survive, minus the
//! "no photo" stand-ins. The result is sorted: DOM order differs between
//! markup variants, and the display order is assigned downstream anyway.

use crate::config::ImageConfig;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Attributes holding a single image URL
const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-original", "data-lazy"];

/// Attributes holding `url descriptor, url descriptor` candidate lists
const SRCSET_ATTRS: &[&str] = &["srcset", "data-srcset"];

static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)(\?|$)").unwrap());

/// Compiled image filtering rules
#[derive(Debug, Clone)]
pub struct ImageRules {
    asset_prefix: String,
    placeholder_hints: Vec<String>,
    excluded_blocks: Vec<Selector>,
}

impl ImageRules {
    pub fn new(config: &ImageConfig) -> Result<Self, ConfigError> {
        let excluded_blocks = config
            .excluded_blocks
            .iter()
            .map(|block| {
                Selector::parse(block).map_err(|e| {
                    ConfigError::InvalidPattern(format!("Invalid selector '{}': {:?}", block, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            asset_prefix: config.asset_prefix.clone(),
            placeholder_hints: config
                .placeholder_hints
                .iter()
                .map(|hint| hint.to_lowercase())
                .collect(),
            excluded_blocks,
        })
    }

    /// Returns true if `url` may appear in a record
    pub fn accepts(&self, url: &str) -> bool {
        if !url.starts_with(&self.asset_prefix) || !IMAGE_EXTENSION.is_match(url) {
            return false;
        }
        let lower = url.to_lowercase();
        !self.placeholder_hints.iter().any(|hint| lower.contains(hint.as_str()))
    }
}

/// Collects the trusted, deduplicated, sorted photo URLs of one product page
pub fn collect_images(document: &Html, rules: &ImageRules) -> Vec<String> {
    let img = match Selector::parse("img") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    // Images inside cross-sell blocks belong to other products
    let mut excluded = HashSet::new();
    for block_selector in &rules.excluded_blocks {
        for block in document.select(block_selector) {
            excluded.extend(block.select(&img).map(|el| el.id()));
        }
    }

    let mut candidates = Vec::new();
    for element in document.select(&img).filter(|el| !excluded.contains(&el.id())) {
        let attrs = element.value();

        for name in SOURCE_ATTRS {
            if let Some(value) = attrs.attr(name).map(str::trim).filter(|v| !v.is_empty()) {
                candidates.push(value.to_string());
            }
        }

        for name in SRCSET_ATTRS {
            if let Some(value) = attrs.attr(name) {
                candidates.extend(srcset_urls(value));
            }
        }
    }

    candidates
        .into_iter()
        .filter(|url| rules.accepts(url))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits a srcset-style value into its URLs, dropping width/density descriptors
pub fn srcset_urls(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
