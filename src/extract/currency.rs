//! Currency symbol to code normalization.
//!
//! The table is declared as an ordered list and folded into a map once. When
//! a symbol appears more than once the FIRST entry wins; later entries are
//! kept as recorded collisions so the ambiguity stays visible.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Ordered (symbol, code) definitions. Earlier entries take precedence.
///
/// Known ambiguities: `¥` is both JPY and CNY, `kr` covers SEK, NOK and DKK,
/// and `R$`/`$` prefixes overlap with several dollar currencies.
pub const DEFAULT_CURRENCIES: &[(&str, &str)] = &[
    ("$", "USD"),
    ("US$", "USD"),
    ("USD", "USD"),
    ("€", "EUR"),
    ("EUR", "EUR"),
    ("£", "GBP"),
    ("GBP", "GBP"),
    ("¥", "JPY"),
    ("¥", "CNY"),
    ("元", "CNY"),
    ("₹", "INR"),
    ("Rs", "INR"),
    ("A$", "AUD"),
    ("AU$", "AUD"),
    ("C$", "CAD"),
    ("CA$", "CAD"),
    ("S$", "SGD"),
    ("HK$", "HKD"),
    ("NZ$", "NZD"),
    ("R$", "BRL"),
    ("MX$", "MXN"),
    ("kr", "SEK"),
    ("kr", "NOK"),
    ("kr", "DKK"),
    ("kr.", "DKK"),
    ("Fr", "CHF"),
    ("CHF", "CHF"),
    ("zł", "PLN"),
    ("Kč", "CZK"),
    ("Ft", "HUF"),
    ("RM", "MYR"),
    ("Rp", "IDR"),
    ("R", "ZAR"),
    ("₩", "KRW"),
    ("₽", "RUB"),
    ("₺", "TRY"),
    ("₱", "PHP"),
    ("฿", "THB"),
    ("₫", "VND"),
    ("₪", "ILS"),
];

/// Immutable symbol → code lookup.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    codes: HashMap<String, String>,
    collisions: BTreeMap<String, Vec<String>>,
}

impl CurrencyTable {
    /// Builds a table from ordered definitions, first entry wins.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut codes: HashMap<String, String> = HashMap::new();
        let mut collisions: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (symbol, code) in entries {
            match codes.get(symbol) {
                Some(existing) if existing != code => {
                    debug!("Currency symbol '{}' is ambiguous: keeping {}, ignoring {}", symbol, existing, code);
                    collisions
                        .entry(symbol.to_string())
                        .or_insert_with(|| vec![existing.clone()])
                        .push(code.to_string());
                }
                Some(_) => {}
                None => {
                    codes.insert(symbol.to_string(), code.to_string());
                }
            }
        }

        Self { codes, collisions }
    }

    /// Maps a raw symbol or prefix to its code. Unknown input is returned unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        self.lookup(raw).unwrap_or(raw).to_string()
    }

    /// Exact-match lookup.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.codes.get(raw).map(String::as_str)
    }

    /// Symbols defined with more than one code, with every code in declaration order.
    pub fn collisions(&self) -> &BTreeMap<String, Vec<String>> {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbols() {
        let table = CurrencyTable::default();
        assert_eq!(table.normalize("$"), "USD");
        assert_eq!(table.normalize("€"), "EUR");
        assert_eq!(table.normalize("£"), "GBP");
        assert_eq!(table.normalize("₹"), "INR");
        assert_eq!(table.normalize("A$"), "AUD");
        assert_eq!(table.normalize("RM"), "MYR");
        assert_eq!(table.normalize("Fr"), "CHF");
    }

    #[test]
    fn test_normalize_unknown_is_identity() {
        let table = CurrencyTable::default();
        assert_eq!(table.normalize("XYZ"), "XYZ");
        assert_eq!(table.normalize(""), "");
        assert_eq!(table.normalize("AUD"), "AUD");
    }

    #[test]
    fn test_normalize_is_exact_match() {
        let table = CurrencyTable::default();
        assert_eq!(table.normalize(" $"), " $");
        assert_eq!(table.normalize("KR"), "KR");
    }

    #[test]
    fn test_first_definition_wins() {
        let table = CurrencyTable::default();
        assert_eq!(table.normalize("¥"), "JPY");
        assert_eq!(table.normalize("kr"), "SEK");
    }

    #[test]
    fn test_collisions_recorded() {
        let table = CurrencyTable::default();
        let collisions = table.collisions();
        assert_eq!(collisions.get("¥"), Some(&vec!["JPY".to_string(), "CNY".to_string()]));
        assert_eq!(
            collisions.get("kr"),
            Some(&vec!["SEK".to_string(), "NOK".to_string(), "DKK".to_string()])
        );
        assert!(!collisions.contains_key("$"));
    }

    #[test]
    fn test_duplicate_same_code_is_not_collision() {
        let table = CurrencyTable::new([("$", "USD"), ("$", "USD")]);
        assert!(table.collisions().is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_custom_table() {
        let table = CurrencyTable::new([("◎", "XTS")]);
        assert_eq!(table.normalize("◎"), "XTS");
        assert_eq!(table.normalize("$"), "$");
        assert!(!table.is_empty());
    }
}
