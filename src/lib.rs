//! shop-extract - Structured product data from arbitrary e-commerce HTML
//!
//! Picks a selector profile from the page URL, resolves title, description
//! and brand, disambiguates price and currency with a heuristic scan, and
//! normalizes currency symbols into codes.

pub mod config;
pub mod extract;
pub mod format;

pub use config::Config;
pub use extract::{CurrencyTable, ExtractError, Extractor, ProductRecord, ProfileRegistry};
