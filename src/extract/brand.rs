//! Brand resolution: selectors first, then embedded JSON-LD product data.

use crate::extract::document::{self, Document};
use crate::extract::error::ExtractError;
use crate::extract::models::Field;
use crate::extract::profiles::SelectorProfile;
use crate::extract::resolve::{resolve_field, DEFAULT_ATTRIBUTE};
use scraper::Selector;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// Resolves and cleans the brand for a document.
pub fn resolve_brand(
    document: &Document,
    profile: &SelectorProfile,
    generic: &SelectorProfile,
) -> Option<String> {
    resolve_field(document, profile, generic, Field::Brand, DEFAULT_ATTRIBUTE)
        .or_else(|| structured_brand(document))
        .map(|brand| clean_brand(&brand))
        .filter(|brand| !brand.is_empty())
}

/// Brand from the first JSON-LD block that describes a product with a brand.
fn structured_brand(document: &Document) -> Option<String> {
    for element in document.select(&JSON_LD) {
        match parse_structured_brand(&document::text(&element)) {
            Ok(Some(brand)) => {
                debug!("Brand '{}' found in structured data", brand);
                return Some(brand);
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping structured data block: {}", e),
        }
    }
    None
}

/// Parses one JSON-LD block and returns the product brand name, if any.
///
/// Accepts a single object, an array of objects, or an `@graph` container.
pub fn parse_structured_brand(raw: &str) -> Result<Option<String>, ExtractError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(raw)?;
    Ok(find_product_brand(&value))
}

fn find_product_brand(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(find_product_brand),
        Value::Object(obj) => {
            if let Some(graph) = obj.get("@graph") {
                return find_product_brand(graph);
            }
            if !is_product(obj.get("@type")?) {
                return None;
            }
            let name = match obj.get("brand")? {
                Value::Object(brand) => brand.get("name")?.as_str()?,
                Value::String(brand) => brand.as_str(),
                _ => return None,
            };
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        }
        _ => None,
    }
}

fn is_product(type_value: &Value) -> bool {
    match type_value {
        Value::String(t) => t == "Product",
        Value::Array(types) => types.iter().any(|t| t.as_str() == Some("Product")),
        _ => false,
    }
}

/// Collapses whitespace and folds an exactly repeated name ("Nike Nike") into one copy.
pub fn clean_brand(raw: &str) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let half = words.len() / 2;

    if half > 0 && words.len() % 2 == 0 && words[..half] == words[half..] {
        return words[..half].join(" ");
    }

    words.join(" ")
}
