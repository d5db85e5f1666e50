//! Price and currency extraction.
//!
//! Stage A reads the profile's price selectors and splits the text inline.
//! Stage B runs only when Stage A found nothing: it scans every `h2`, `p`
//! and `span`, keeps text that is shaped exactly like a price, and prefers
//! candidates by tag (`h2` over `p` over `span`), then document order.

use crate::extract::currency::CurrencyTable;
use crate::extract::document::{self, Document};
use crate::extract::models::{Field, PriceCandidate, SourceTag};
use crate::extract::patterns;
use crate::extract::profiles::SelectorProfile;
use crate::extract::resolve::{resolve_field, DEFAULT_ATTRIBUTE};
use scraper::Selector;
use std::sync::LazyLock;
use tracing::{debug, trace};

static SCANNED_TAGS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2, p, span").unwrap());

/// Final, normalized price output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInfo {
    /// Amount with two fraction digits
    pub price: Option<String>,
    /// Normalized currency code
    pub currency: Option<String>,
}

/// Runs both stages, the currency fallback and post-processing.
pub fn extract_price(
    document: &Document,
    profile: &SelectorProfile,
    generic: &SelectorProfile,
    currencies: &CurrencyTable,
) -> PriceInfo {
    let (mut currency, mut amount) = selector_price(document, profile, generic);

    if currency.is_none() && amount.is_none() {
        if let Some(candidate) = best_candidate(scan_candidates(document)) {
            debug!(
                "Heuristic price {} {} from <{:?}> {}",
                candidate.currency, candidate.amount, candidate.source_tag, candidate.raw_markup
            );
            currency = Some(patterns::map_dollar_variant(&candidate.currency));
            amount = Some(candidate.amount);
        }
    }

    let currency = currency
        .filter(|c| !c.trim().is_empty())
        .or_else(|| resolve_field(document, profile, generic, Field::Currency, DEFAULT_ATTRIBUTE));

    finalize(currency, amount, currencies)
}

/// Stage A: selector-resolved price text split into `(currency, amount)`.
fn selector_price(
    document: &Document,
    profile: &SelectorProfile,
    generic: &SelectorProfile,
) -> (Option<String>, Option<f64>) {
    match resolve_field(document, profile, generic, Field::Price, DEFAULT_ATTRIBUTE) {
        Some(text) => {
            trace!("Selector price text: {}", text);
            patterns::split_inline_price(&text)
        }
        None => (None, None),
    }
}

/// Stage B: every price-shaped `h2`, `p` or `span` in document order.
pub fn scan_candidates(document: &Document) -> Vec<PriceCandidate> {
    let mut candidates = Vec::new();

    for element in document.select(&SCANNED_TAGS) {
        let Some(source_tag) = SourceTag::from_name(element.value().name()) else {
            continue;
        };

        let text = patterns::normalize_spaces(&document::text(&element));
        if !patterns::looks_like_price(&text) {
            continue;
        }

        if let Some((currency, amount)) = patterns::extract_loose_price(&text) {
            candidates.push(PriceCandidate {
                currency,
                amount,
                source_tag,
                raw_markup: document::inner_markup(&element),
            });
        }
    }

    trace!("Found {} heuristic price candidates", candidates.len());
    candidates
}

/// Highest-priority candidate; equal tags keep document order.
pub fn best_candidate(mut candidates: Vec<PriceCandidate>) -> Option<PriceCandidate> {
    candidates.sort_by_key(|c| c.source_tag.rank());
    candidates.into_iter().next()
}

fn finalize(currency: Option<String>, amount: Option<f64>, currencies: &CurrencyTable) -> PriceInfo {
    let price = amount
        .and_then(patterns::format_price)
        .map(|p| patterns::strip_undefined(&p))
        .filter(|p| !p.is_empty());

    let currency = currency
        .map(|c| patterns::strip_undefined(&c))
        .filter(|c| !c.is_empty())
        .map(|c| currencies.normalize(&c));

    PriceInfo { price, currency }
}
