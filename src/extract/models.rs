//! Data models for extracted products and intermediate price candidates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured product data extracted from one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product title
    pub title: Option<String>,
    /// Product description
    pub description: Option<String>,
    /// Brand or manufacturer
    pub brand: Option<String>,
    /// Price with exactly two fraction digits ("19.50")
    pub price: Option<String>,
    /// Currency code (USD, EUR, ...) or the raw symbol when unknown
    pub currency: Option<String>,
    /// Image URLs in document order, duplicates kept
    pub images: Vec<String>,
}

impl ProductRecord {
    /// Returns true if no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.brand.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.images.is_empty()
    }
}

/// Product fields that a selector profile provides candidates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Description,
    Brand,
    Price,
    Currency,
    Images,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Brand => "brand",
            Field::Price => "price",
            Field::Currency => "currency",
            Field::Images => "images",
        };
        write!(f, "{}", name)
    }
}

/// Tag types scanned by the heuristic price pass, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTag {
    H2,
    P,
    Span,
}

impl SourceTag {
    /// Maps an element name to a scanned tag type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "h2" => Some(SourceTag::H2),
            "p" => Some(SourceTag::P),
            "span" => Some(SourceTag::Span),
            _ => None,
        }
    }

    /// Lower rank wins.
    pub fn rank(&self) -> u8 {
        match self {
            SourceTag::H2 => 0,
            SourceTag::P => 1,
            SourceTag::Span => 2,
        }
    }
}

/// A price found by the heuristic document scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate {
    /// Raw currency symbol or prefix, possibly empty
    pub currency: String,
    pub amount: f64,
    pub source_tag: SourceTag,
    /// Inner markup of the element the candidate came from
    pub raw_markup: String,
}
