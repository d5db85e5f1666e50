//! First-match-wins selector resolution.

use crate::extract::document::{self, Document};
use crate::extract::models::Field;
use crate::extract::patterns::strip_noise;
use crate::extract::profiles::SelectorProfile;
use scraper::Selector;
use tracing::trace;

/// Attribute read before falling back to element text.
pub const DEFAULT_ATTRIBUTE: &str = "content";

/// Returns the value of the first selector that yields non-empty text.
///
/// For each selector only the first matched element is considered. Its
/// `attribute` wins when present; otherwise the element text is used after
/// noise phrases are stripped.
pub fn resolve_first(document: &Document, selectors: &[Selector], attribute: &str) -> Option<String> {
    for selector in selectors {
        let Some(element) = document.first(selector) else {
            continue;
        };

        let value = match document::attr(&element, attribute) {
            Some(value) => value.trim().to_string(),
            None => strip_noise(document::text(&element).trim()),
        };

        if !value.is_empty() {
            trace!("Resolved '{}' from {:?}", value, selector);
            return Some(value);
        }
    }

    None
}

/// Resolves a field against the active profile, then the generic profile.
pub fn resolve_field(
    document: &Document,
    profile: &SelectorProfile,
    generic: &SelectorProfile,
    field: Field,
    attribute: &str,
) -> Option<String> {
    resolve_first(document, profile.selectors(field), attribute).or_else(|| {
        if profile.is_generic() {
            None
        } else {
            resolve_first(document, generic.selectors(field), attribute)
        }
    })
}
