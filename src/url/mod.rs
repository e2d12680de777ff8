//! URL handling module for Engine-Sieve
//!
//! This module provides URL normalization (listing-page identity) and the
//! catalog-specific link recognition used by the page discoverer.

mod matcher;
mod normalize;

pub use matcher::{product_id_from_url, CatalogLink, CatalogMatcher};
pub use normalize::normalize_url;
