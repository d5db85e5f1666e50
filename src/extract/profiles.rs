//! Site selector profiles and domain-based profile selection.
//!
//! Update the tables in this file when a storefront changes its markup.
//! Every profile is compiled once; a selector that fails to parse is
//! dropped with a warning instead of aborting.

use crate::extract::error::ExtractError;
use crate::extract::models::Field;
use scraper::Selector;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

pub const GENERIC: &str = "generic";

type FieldTable = &'static [(Field, &'static [&'static str])];

const GENERIC_SELECTORS: FieldTable = &[
    (
        Field::Title,
        &[
            "meta[property='og:title']",
            "meta[name='twitter:title']",
            "[itemprop='name']",
            "h1",
            "title",
        ],
    ),
    (
        Field::Description,
        &[
            "meta[property='og:description']",
            "meta[name='description']",
            "meta[name='twitter:description']",
            "[itemprop='description']",
        ],
    ),
    (
        Field::Brand,
        &[
            "meta[property='product:brand']",
            "meta[property='og:brand']",
            "[itemprop='brand'] [itemprop='name']",
            "[itemprop='brand']",
            ".product-brand",
            ".brand",
        ],
    ),
    (
        Field::Price,
        &[
            "meta[property='product:price:amount']",
            "meta[property='og:price:amount']",
            "[itemprop='price']",
            ".product-price",
            ".price",
        ],
    ),
    (
        Field::Currency,
        &[
            "meta[property='product:price:currency']",
            "meta[property='og:price:currency']",
            "[itemprop='priceCurrency']",
        ],
    ),
    (Field::Images, &["meta[property='og:image']", "meta[name='twitter:image']", "[itemprop='image']"]),
];

const AMAZON_SELECTORS: FieldTable = &[
    (Field::Title, &["#productTitle", "#title span"]),
    (Field::Description, &["#feature-bullets", "#productDescription"]),
    (Field::Brand, &["#bylineInfo", ".po-brand .po-break-word"]),
    (
        Field::Price,
        &[
            "#corePrice_feature_div .a-price .a-offscreen",
            "#priceblock_ourprice",
            "#priceblock_dealprice",
            ".a-price .a-offscreen",
        ],
    ),
    (Field::Currency, &[".a-price-symbol"]),
    (Field::Images, &["#landingImage", "#imgTagWrapperId img"]),
];

const EBAY_SELECTORS: FieldTable = &[
    (Field::Title, &[".x-item-title__mainTitle", "h1.it-ttl"]),
    (Field::Description, &["#viTabs_0_is"]),
    (Field::Brand, &[".ux-labels-values--brand .ux-labels-values__values"]),
    (Field::Price, &[".x-price-primary", "#prcIsum"]),
    (Field::Currency, &[]),
    (Field::Images, &[".ux-image-carousel-item img", "#icImg"]),
];

const WALMART_SELECTORS: FieldTable = &[
    (Field::Title, &["h1[itemprop='name']", "#main-title"]),
    (Field::Description, &["[data-testid='product-description-content']"]),
    (Field::Brand, &["[data-seo-id='brand-name']", "a[link-identifier='brandName']"]),
    (Field::Price, &["[itemprop='price']", "[data-testid='price-wrap'] span"]),
    (Field::Currency, &[]),
    (Field::Images, &["[data-testid='hero-image-container'] img"]),
];

const ETSY_SELECTORS: FieldTable = &[
    (Field::Title, &["h1[data-buy-box-listing-title]"]),
    (Field::Description, &["[data-product-details-description-text-content]"]),
    (Field::Brand, &["[data-shop-name]", ".wt-text-body-01 a[href*='/shop/']"]),
    (Field::Price, &["[data-buy-box-region='price'] .wt-text-title-larger"]),
    (Field::Currency, &[]),
    (Field::Images, &["[data-carousel-pane] img"]),
];

const SHOPIFY_SELECTORS: FieldTable = &[
    (Field::Title, &[".product__title h1", ".product-single__title"]),
    (Field::Description, &[".product__description", ".product-single__description"]),
    (Field::Brand, &[".product__vendor", ".product-single__vendor"]),
    (Field::Price, &[".price-item--sale", ".price-item--regular", ".product__price"]),
    (Field::Currency, &[]),
    (Field::Images, &[".product__media img", ".product-single__photo img"]),
];

const PROFILES: &[(&str, FieldTable)] = &[
    (GENERIC, GENERIC_SELECTORS),
    ("amazon", AMAZON_SELECTORS),
    ("ebay", EBAY_SELECTORS),
    ("walmart", WALMART_SELECTORS),
    ("etsy", ETSY_SELECTORS),
    ("shopify", SHOPIFY_SELECTORS),
];

/// Hostname (without `www.`) to profile name.
///
/// Shopify storefronts live on per-store hosts, so the `shopify` profile is
/// only reachable through configured domain aliases.
const DOMAINS: &[(&str, &str)] = &[
    ("amazon.com", "amazon"),
    ("amazon.co.uk", "amazon"),
    ("amazon.de", "amazon"),
    ("amazon.fr", "amazon"),
    ("amazon.es", "amazon"),
    ("amazon.it", "amazon"),
    ("amazon.ca", "amazon"),
    ("amazon.com.au", "amazon"),
    ("amazon.co.jp", "amazon"),
    ("amazon.in", "amazon"),
    ("amazon.com.br", "amazon"),
    ("amazon.com.mx", "amazon"),
    ("amazon.nl", "amazon"),
    ("amazon.se", "amazon"),
    ("amazon.pl", "amazon"),
    ("ebay.com", "ebay"),
    ("ebay.co.uk", "ebay"),
    ("ebay.de", "ebay"),
    ("ebay.com.au", "ebay"),
    ("walmart.com", "walmart"),
    ("walmart.ca", "walmart"),
    ("etsy.com", "etsy"),
];

/// A named set of ordered selector candidates per field.
#[derive(Debug, Clone)]
pub struct SelectorProfile {
    name: String,
    fields: HashMap<Field, Vec<Selector>>,
}

impl SelectorProfile {
    /// Compiles a profile from raw selector strings.
    pub fn new<'a>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (Field, &'a [&'a str])>,
    ) -> Self {
        let name = name.into();
        let mut compiled: HashMap<Field, Vec<Selector>> = HashMap::new();

        for (field, raw) in fields {
            let selectors = compiled.entry(field).or_default();
            for source in raw {
                match Selector::parse(source) {
                    Ok(selector) => selectors.push(selector),
                    Err(e) => warn!("Dropping invalid {} selector '{}' in profile {}: {}", field, source, name, e),
                }
            }
        }

        Self { name, fields: compiled }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered selectors for a field; empty when the profile has none.
    pub fn selectors(&self, field: Field) -> &[Selector] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_generic(&self) -> bool {
        self.name == GENERIC
    }
}

/// Immutable registry of built-in profiles and domain mappings.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, SelectorProfile>,
    domains: HashMap<String, String>,
}

impl ProfileRegistry {
    /// Builds the registry from the built-in tables.
    pub fn new() -> Self {
        let profiles = PROFILES
            .iter()
            .map(|(name, table)| {
                (name.to_string(), SelectorProfile::new(*name, table.iter().copied()))
            })
            .collect();

        let domains =
            DOMAINS.iter().map(|(domain, name)| (domain.to_string(), name.to_string())).collect();

        Self { profiles, domains }
    }

    /// Adds domain aliases. Aliases pointing at an unknown profile are ignored.
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (domain, name) in aliases {
            let domain = normalize_host(domain.as_ref());
            let name = name.as_ref();
            if self.profiles.contains_key(name) {
                debug!("Mapping domain {} to profile {}", domain, name);
                self.domains.insert(domain, name.to_string());
            } else {
                warn!("Ignoring alias {} -> unknown profile '{}'", domain, name);
            }
        }
        self
    }

    /// The generic fallback profile.
    pub fn generic(&self) -> &SelectorProfile {
        &self.profiles[GENERIC]
    }

    /// Looks up a profile by name.
    pub fn get(&self, name: &str) -> Option<&SelectorProfile> {
        self.profiles.get(name)
    }

    /// Profile name for a hostname, if it is mapped.
    pub fn profile_name_for_host(&self, host: &str) -> Option<&str> {
        self.domains.get(host).map(String::as_str)
    }

    /// Chooses the profile for a page URL; anything unknown or malformed gets the generic one.
    pub fn select(&self, url: Option<&str>) -> &SelectorProfile {
        let Some(url) = url else {
            return self.generic();
        };

        let host = match hostname(url) {
            Ok(host) => host,
            Err(e) => {
                debug!("Using generic profile: {}", e);
                return self.generic();
            }
        };

        match self.profile_name_for_host(&host).and_then(|name| self.get(name)) {
            Some(profile) => {
                debug!("Using {} profile for {}", profile.name(), host);
                profile
            }
            None => self.generic(),
        }
    }

    /// Names of all registered profiles.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Hostnames mapped to the named profile, sorted.
    pub fn domains_for(&self, name: &str) -> Vec<&str> {
        let mut domains: Vec<&str> = self
            .domains
            .iter()
            .filter(|(_, profile)| profile.as_str() == name)
            .map(|(domain, _)| domain.as_str())
            .collect();
        domains.sort_unstable();
        domains
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the lower-cased hostname of a URL with a leading `www.` removed.
pub fn hostname(url: &str) -> Result<String, ExtractError> {
    let parsed = Url::parse(url.trim())
        .map_err(|source| ExtractError::InvalidUrl { url: url.to_string(), source })?;

    let host = parsed.host_str().ok_or_else(|| ExtractError::MissingHost(url.to_string()))?;

    Ok(normalize_host(host))
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_builtin_profiles_compile() {
        let registry = ProfileRegistry::new();
        for (name, table) in PROFILES {
            let profile = registry.get(name).unwrap();
            for (field, raw) in table.iter() {
                assert_eq!(
                    profile.selectors(*field).len(),
                    raw.len(),
                    "selector failed to compile in {} / {}",
                    name,
                    field
                );
            }
        }
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("https://www.amazon.com/dp/B08N5WRWNW").unwrap(), "amazon.com");
        assert_eq!(hostname("https://WWW.Etsy.com/listing/1").unwrap(), "etsy.com");
        assert_eq!(hostname("http://shop.example.org").unwrap(), "shop.example.org");
    }

    #[test]
    fn test_hostname_errors() {
        assert!(matches!(hostname("not a url"), Err(ExtractError::InvalidUrl { .. })));
        assert!(matches!(hostname(""), Err(ExtractError::InvalidUrl { .. })));
        assert!(matches!(hostname("mailto:someone@example.com"), Err(ExtractError::MissingHost(_))));
    }

    #[test]
    fn test_select_known_domains() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.select(Some("https://www.amazon.co.uk/dp/X")).name(), "amazon");
        assert_eq!(registry.select(Some("https://ebay.com/itm/1")).name(), "ebay");
        assert_eq!(registry.select(Some("https://www.walmart.com/ip/1")).name(), "walmart");
        assert_eq!(registry.select(Some("https://www.etsy.com/listing/1")).name(), "etsy");
    }

    #[test]
    fn test_select_falls_back_to_generic() {
        let registry = ProfileRegistry::new();
        assert!(registry.select(None).is_generic());
        assert!(registry.select(Some("https://unknown-store.example/p/1")).is_generic());
        assert!(registry.select(Some("::::")).is_generic());
        assert!(registry.select(Some("mailto:a@b.c")).is_generic());
    }

    #[test]
    fn test_subdomains_are_not_matched() {
        let registry = ProfileRegistry::new();
        assert!(registry.select(Some("https://smile.amazon.com/dp/X")).is_generic());
    }

    #[test]
    fn test_shopify_needs_an_alias() {
        let registry = ProfileRegistry::new();
        assert!(registry.domains_for("shopify").is_empty());
        assert!(registry.select(Some("https://store.myshopify.com/products/x")).is_generic());
    }

    #[test]
    fn test_with_aliases() {
        let registry = ProfileRegistry::new()
            .with_aliases([("www.mystore.example", "shopify"), ("other.example", "nope")]);
        assert_eq!(registry.select(Some("https://mystore.example/products/x")).name(), "shopify");
        assert!(registry.select(Some("https://other.example/")).is_generic());
    }

    #[test]
    fn test_invalid_selector_is_dropped() {
        let profile = SelectorProfile::new("test", [(Field::Title, &["h1", "[[broken"][..])]);
        assert_eq!(profile.selectors(Field::Title).len(), 1);
        assert!(profile.selectors(Field::Price).is_empty());
    }

    #[test]
    fn test_names() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.names(), vec!["amazon", "ebay", "etsy", "generic", "shopify", "walmart"]);
    }

    #[test]
    fn test_domains_for() {
        let registry = ProfileRegistry::new();
        assert_eq!(registry.domains_for("etsy"), vec!["etsy.com"]);
        assert!(registry.domains_for("amazon").contains(&"amazon.co.jp"));
        assert!(registry.domains_for(GENERIC).is_empty());
    }

    #[test]
    fn test_amazon_title_selector_matches() {
        let registry = ProfileRegistry::new();
        let profile = registry.get("amazon").unwrap();
        let html = Html::parse_document(r#"<span id="productTitle">Echo Dot</span>"#);
        let selector = &profile.selectors(Field::Title)[0];
        assert_eq!(html.select(selector).count(), 1);
    }
}
