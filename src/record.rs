//! The normalized output unit of a crawl

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fuel type guessed from the engine code and title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Petrol,
    Diesel,
    Unknown,
}

impl EngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One engine listing, as extracted from its product page
///
/// Serialized with snake_case keys, the shape the batch loader reads. Every
/// field scraped from the page is optional; `images` is an owned, sorted,
/// duplicate-free list of trusted asset URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRecord {
    /// Fixed origin tag, e.g. "mysakura"
    pub source: String,
    pub source_url: String,
    pub product_id: Option<u64>,
    pub title: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub engine_code: Option<String>,
    pub engine_type: EngineType,
    /// Whole currency units; the catalog shows no minor units
    pub price: Option<u64>,
    pub currency: String,
    pub stock_text: Option<String>,
    pub oem: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}
