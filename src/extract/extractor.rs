//! End-to-end product extraction for a single HTML document.

use crate::config::Config;
use crate::extract::brand::resolve_brand;
use crate::extract::currency::CurrencyTable;
use crate::extract::document::{self, Document};
use crate::extract::models::{Field, ProductRecord};
use crate::extract::price::extract_price;
use crate::extract::profiles::{ProfileRegistry, SelectorProfile};
use crate::extract::resolve::{resolve_field, DEFAULT_ATTRIBUTE};
use tracing::debug;

/// Extracts products using immutable profile and currency tables.
///
/// An `Extractor` holds no per-call state, so one instance can serve many
/// documents, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    profiles: ProfileRegistry,
    currencies: CurrencyTable,
}

impl Extractor {
    /// Creates an extractor from explicit tables.
    pub fn new(profiles: ProfileRegistry, currencies: CurrencyTable) -> Self {
        Self { profiles, currencies }
    }

    /// Creates an extractor with built-in tables plus the configured domain aliases.
    pub fn from_config(config: &Config) -> Self {
        let profiles = ProfileRegistry::new().with_aliases(&config.domains);
        Self::new(profiles, CurrencyTable::default())
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Extracts a product record. Never fails; missing data yields `None` fields.
    pub fn extract(&self, html: &str, url: Option<&str>) -> ProductRecord {
        let compacted = document::compact(html);
        let document = Document::parse(&compacted);

        let profile = self.profiles.select(url);
        let generic = self.profiles.generic();

        let title = resolve_field(&document, profile, generic, Field::Title, DEFAULT_ATTRIBUTE);
        let description =
            resolve_field(&document, profile, generic, Field::Description, DEFAULT_ATTRIBUTE);
        let brand = resolve_brand(&document, profile, generic);
        let price = extract_price(&document, profile, generic, &self.currencies);
        let images = collect_images(&document, profile, generic);

        debug!(
            "Extracted with {} profile: title={:?} price={:?} {:?} images={}",
            profile.name(),
            title,
            price.price,
            price.currency,
            images.len()
        );

        ProductRecord {
            title,
            description,
            brand,
            price: price.price,
            currency: price.currency,
            images,
        }
    }
}

/// Every image URL matched by the profile's selectors, then the generic ones.
fn collect_images(
    document: &Document,
    profile: &SelectorProfile,
    generic: &SelectorProfile,
) -> Vec<String> {
    let generic_selectors =
        if profile.is_generic() { &[][..] } else { generic.selectors(Field::Images) };

    profile
        .selectors(Field::Images)
        .iter()
        .chain(generic_selectors)
        .flat_map(|selector| document.select(selector))
        .filter_map(|element| {
            document::attr(&element, "content")
                .filter(|content| !content.trim().is_empty())
                .or_else(|| document::attr(&element, "src"))
        })
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
        .collect()
}
