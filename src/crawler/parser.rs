//! Listing page parser
//!
//! Pulls the two kinds of links discovery cares about out of a listing page:
//! - product detail pages (numeric ID under the product path)
//! - other listing pages (listing path plus the page selector parameter)
//!
//! Everything else on the page (menus, filters, footer) is ignored.

use crate::url::{CatalogLink, CatalogMatcher};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Links found on one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingLinks {
    /// Product detail URLs, deduplicated
    pub products: BTreeSet<String>,

    /// Normalized listing page URLs, deduplicated
    pub pages: BTreeSet<String>,
}

/// Parses a listing page and classifies its `<a href>` links
///
/// # Arguments
///
/// * `html` - The HTML content of the listing page
/// * `page_url` - The URL the page was fetched from, for resolving relative links
/// * `matcher` - Product/listing link recognition for the catalog
///
/// # Example
///
/// ```
/// use engine_sieve::config::CatalogConfig;
/// use engine_sieve::crawler::parse_listing;
/// use engine_sieve::url::CatalogMatcher;
/// use url::Url;
///
/// let matcher = CatalogMatcher::new(&CatalogConfig::default()).unwrap();
/// let page = Url::parse("https://mysakura.ru/catalog/dvigatel").unwrap();
/// let html = r#"<a href="/product/12">CDAB</a><a href="/catalog/dvigatel?page=2">2</a>"#;
///
/// let links = parse_listing(html, &page, &matcher);
/// assert!(links.products.contains("https://mysakura.ru/product/12"));
/// assert!(links.pages.contains("https://mysakura.ru/catalog/dvigatel?page=2"));
/// ```
pub fn parse_listing(html: &str, page_url: &Url, matcher: &CatalogMatcher) -> ListingLinks {
    let document = Html::parse_document(html);
    let mut links = ListingLinks::default();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match matcher.classify(href, page_url) {
            Some(CatalogLink::Product(url)) => {
                links.products.insert(url);
            }
            Some(CatalogLink::Listing(url)) => {
                links.pages.insert(url);
            }
            None => {}
        }
    }

    tracing::trace!(
        "Listing {} has {} product links and {} page links",
        page_url,
        links.products.len(),
        links.pages.len()
    );

    links
}
