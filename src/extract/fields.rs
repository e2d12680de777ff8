//! Field heuristics for product pages
//!
//! Every function here tolerates missing markup and returns `None` instead of
//! failing: a product page without a price or a make still yields a record.

use crate::extract::dom::{element_text, DocumentNode};
use crate::record::EngineType;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Labels of the "Характеристики товара" block
pub const MAKE_LABEL: &str = "Марка";
pub const MODEL_LABEL: &str = "Модель";
pub const YEAR_LABEL: &str = "Год";
pub const ENGINE_CODE_LABEL: &str = "Двигатель";
pub const OEM_LABEL: &str = "OEM";
pub const STOCK_LABEL: &str = "Наличие";

/// How many nodes past a label the value may sit
pub const MAX_VALUE_HOPS: usize = 10;

static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(Пробег.*?)(?:Характеристики товара|Отзывы о товаре|##|$)").unwrap()
});

// Either a plain 4-7 digit run or 1-3 digits followed by space/nbsp-grouped thousands
static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}(?:[ \x{A0}][0-9]{3})+|[0-9]{4,7})\b").unwrap()
});

const DIESEL_TOKENS: &[&str] = &["диз", "diesel"];
const PETROL_TOKENS: &[&str] = &["бенз", "petrol", "gasoline"];

/// Finds the value written next to `label`
///
/// Looks for the first text node that reads exactly `label:`; failing that,
/// the bare `label`. From there walks at most [`MAX_VALUE_HOPS`] nodes forward
/// and returns the first non-empty text that does not itself end with a colon.
/// When several labels match, the first one in reading order wins.
pub fn labeled_value<N>(start: N, label: &str) -> Option<String>
where
    N: DocumentNode + Clone,
{
    let node = find_label(start.clone(), label, true).or_else(|| find_label(start, label, false))?;
    value_after(&node, MAX_VALUE_HOPS)
}

fn find_label<N: DocumentNode>(start: N, label: &str, require_colon: bool) -> Option<N> {
    let mut node = Some(start);
    while let Some(current) = node {
        if current.is_text() && is_label_text(&current.text(), label, require_colon) {
            return Some(current);
        }
        node = current.next_node();
    }
    None
}

fn is_label_text(text: &str, label: &str, require_colon: bool) -> bool {
    let Some(rest) = text.trim().strip_prefix(label) else {
        return false;
    };
    match rest.trim_start() {
        ":" => true,
        "" => !require_colon,
        _ => false,
    }
}

/// First qualifying text within `max_hops` nodes after `label`
pub fn value_after<N: DocumentNode>(label: &N, max_hops: usize) -> Option<String> {
    let mut node = label.next_node();
    for _ in 0..max_hops {
        let current = node?;
        let text = current.text();
        if !text.is_empty() && !text.ends_with(':') {
            return Some(text);
        }
        node = current.next_node();
    }
    None
}

/// Text of the first `<h1>`
pub fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty())
}

/// The free-text block that starts at "Пробег"
///
/// Ends at the characteristics header, the reviews header, a `##` marker or the
/// end of the text, whichever comes first.
pub fn extract_description(text: &str) -> Option<String> {
    DESCRIPTION
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|description| !description.is_empty())
}

/// The first 4 to 7 digit amount in the page text, grouping spaces removed
///
/// ```
/// use engine_sieve::extract::extract_price;
///
/// assert_eq!(extract_price("Цена: 120 000 ₽"), Some(120000));
/// assert_eq!(extract_price("Цена по запросу"), None);
/// ```
pub fn extract_price(text: &str) -> Option<u64> {
    PRICE.find_iter(text).find_map(|m| {
        let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
        if (4..=7).contains(&digits.len()) {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// Guesses the fuel type from the engine code and the title
///
/// Diesel tokens are checked first, so a text mentioning both is diesel.
pub fn guess_engine_type(engine_code: Option<&str>, title: Option<&str>) -> EngineType {
    let text = format!("{} {}", engine_code.unwrap_or(""), title.unwrap_or("")).to_lowercase();

    if DIESEL_TOKENS.iter().any(|token| text.contains(token)) {
        EngineType::Diesel
    } else if PETROL_TOKENS.iter().any(|token| text.contains(token)) {
        EngineType::Petrol
    } else {
        EngineType::Unknown
    }
}
