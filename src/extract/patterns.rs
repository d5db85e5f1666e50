//! Text-only price classification.
//!
//! Everything here works on plain strings so the price-shape rules can be
//! tested without building a DOM.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Currency symbols accepted as a price prefix, in addition to ASCII letters.
const SYMBOLS: &str = "$€£¥₹₩₽₺₱฿₫₪";

/// Marketing phrases that wrap price text on many storefronts.
static NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)sale price",
        r"(?i)price:",
        r"(?i)\bprice\s+[a-z]+\b",
        r"(?i)limited time offer",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Leading non-digits, an amount with `,` thousands separators, trailing non-digits.
static INLINE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\D*)(\d[\d,]*(?:\.\d+)?)(\D*)").unwrap());

/// The whole text must look like a price and nothing else.
static PRICE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[A-Za-z{SYMBOLS}]{{0,3}}\s*\d+(?:,\d{{3}})*(?:\.\d{{2}})?$")).unwrap()
});

static LOOSE_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"([A-Za-z{SYMBOLS}]{{0,3}})\s*(\d+(?:,\d{{3}})*(?:\.\d+)?)")).unwrap()
});

/// Removes known marketing noise from price-ish text and trims it.
pub fn strip_noise(text: &str) -> String {
    let mut cleaned = text.to_string();
    for re in NOISE.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}

/// Splits selector-resolved price text like "$1,299.00" or "45.00 EUR"
/// into `(currency, amount)`.
///
/// The currency is the token right before the number, or failing that the
/// token right after it.
pub fn split_inline_price(text: &str) -> (Option<String>, Option<f64>) {
    let Some(caps) = INLINE_PRICE.captures(text) else {
        return (None, None);
    };

    let amount = caps.get(2).and_then(|m| parse_amount(m.as_str()));

    let leading = caps.get(1).and_then(|m| m.as_str().split_whitespace().last());
    let trailing = caps.get(3).and_then(|m| m.as_str().split_whitespace().next());
    let currency = leading.or(trailing).map(String::from);

    (currency, amount)
}

/// Returns true if the text is nothing but a price, e.g. "$10", "EUR 1,299.99".
pub fn looks_like_price(text: &str) -> bool {
    PRICE_SHAPE.is_match(text.trim())
}

/// Pulls a raw currency prefix (possibly empty) and amount out of price text.
pub fn extract_loose_price(text: &str) -> Option<(String, f64)> {
    let caps = LOOSE_PRICE.captures(text)?;
    let currency = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
    let amount = parse_amount(caps.get(2)?.as_str())?;
    Some((currency, amount))
}

/// Resolves the dollar-sign family; other symbols pass through unchanged.
pub fn map_dollar_variant(symbol: &str) -> String {
    match symbol {
        "A$" => "AUD".to_string(),
        "C$" => "CAD".to_string(),
        "S$" => "SGD".to_string(),
        "$" => "USD".to_string(),
        other => other.to_string(),
    }
}

/// Parses "1,234.56" as 1234.56.
pub fn parse_amount(digits: &str) -> Option<f64> {
    let cleaned = digits.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Formats an amount with exactly two fraction digits, rounding half away
/// from zero on the shortest decimal representation ("10.125" -> "10.13").
///
/// Returns `None` for non-finite amounts.
pub fn format_price(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }

    let repr = amount.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<char> =
        whole.chars().chain(fraction.chars().chain(std::iter::repeat('0')).take(2)).collect();

    if fraction.chars().nth(2).is_some_and(|d| d >= '5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
        }
    }

    let split = digits.len() - 2;
    let whole: String = digits[..split].iter().collect();
    let cents: String = digits[split..].iter().collect();
    let sign = if amount < 0.0 && digits.iter().any(|d| *d != '0') { "-" } else { "" };

    Some(format!("{}{}.{}", sign, whole, cents))
}

/// Removes literal "undefined" left behind by broken template rendering.
pub fn strip_undefined(text: &str) -> String {
    text.replace("undefined", "").trim().to_string()
}

/// Normalizes non-breaking spaces to regular spaces and trims.
pub fn normalize_spaces(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_noise() {
        assert_eq!(strip_noise("Sale price $45.00"), "$45.00");
        assert_eq!(strip_noise("SALE PRICE $45.00"), "$45.00");
        assert_eq!(strip_noise("Price: €12"), "€12");
        assert_eq!(strip_noise("Price from $9.99"), "$9.99");
        assert_eq!(strip_noise("Limited Time Offer £5"), "£5");
        assert_eq!(strip_noise("Trail Runner"), "Trail Runner");
    }

    #[test]
    fn test_strip_noise_keeps_amount_after_price_word() {
        // "Price" followed by a number is not a noise phrase
        assert_eq!(strip_noise("Price 45.00"), "Price 45.00");
    }

    #[test]
    fn test_strip_noise_only_noise() {
        assert_eq!(strip_noise("Sale price"), "");
        assert_eq!(strip_noise("  Limited time offer  "), "");
    }

    #[test]
    fn test_split_inline_price_leading_symbol() {
        assert_eq!(split_inline_price("$19.50"), (Some("$".to_string()), Some(19.5)));
        assert_eq!(split_inline_price("$1,299.00"), (Some("$".to_string()), Some(1299.0)));
        assert_eq!(split_inline_price("A$ 25"), (Some("A$".to_string()), Some(25.0)));
    }

    #[test]
    fn test_split_inline_price_trailing_code() {
        assert_eq!(split_inline_price("45.00 EUR"), (Some("EUR".to_string()), Some(45.0)));
        assert_eq!(split_inline_price("99 kr"), (Some("kr".to_string()), Some(99.0)));
    }

    #[test]
    fn test_split_inline_price_prefers_leading() {
        assert_eq!(split_inline_price("£10 GBP"), (Some("£".to_string()), Some(10.0)));
    }

    #[test]
    fn test_split_inline_price_bare_number() {
        assert_eq!(split_inline_price("19.99"), (None, Some(19.99)));
    }

    #[test]
    fn test_split_inline_price_no_digits() {
        assert_eq!(split_inline_price("Out of stock"), (None, None));
        assert_eq!(split_inline_price(""), (None, None));
    }

    #[test]
    fn test_looks_like_price_accepts() {
        assert!(looks_like_price("$10"));
        assert!(looks_like_price("$19.99"));
        assert!(looks_like_price("€ 1,299.00"));
        assert!(looks_like_price("USD 25.00"));
        assert!(looks_like_price("A$25"));
        assert!(looks_like_price("  42  "));
        assert!(looks_like_price("₹1,500"));
    }

    #[test]
    fn test_looks_like_price_rejects() {
        assert!(!looks_like_price("Only $10 today"));
        assert!(!looks_like_price("$10.5"));
        assert!(!looks_like_price("10 €"));
        assert!(!looks_like_price("ABCD 10"));
        assert!(!looks_like_price("Free shipping"));
        assert!(!looks_like_price(""));
        assert!(!looks_like_price("$10 - $20"));
    }

    #[test]
    fn test_extract_loose_price() {
        assert_eq!(extract_loose_price("$10"), Some(("$".to_string(), 10.0)));
        assert_eq!(extract_loose_price("C$ 1,050.25"), Some(("C$".to_string(), 1050.25)));
        assert_eq!(extract_loose_price("42"), Some((String::new(), 42.0)));
        assert_eq!(extract_loose_price("none"), None);
    }

    #[test]
    fn test_map_dollar_variant() {
        assert_eq!(map_dollar_variant("A$"), "AUD");
        assert_eq!(map_dollar_variant("C$"), "CAD");
        assert_eq!(map_dollar_variant("S$"), "SGD");
        assert_eq!(map_dollar_variant("$"), "USD");
        assert_eq!(map_dollar_variant("€"), "€");
        assert_eq!(map_dollar_variant(""), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("10"), Some(10.0));
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        assert_eq!(parse_amount(&"9".repeat(400)), None);
        assert_eq!(split_inline_price(&format!("${}", "9".repeat(400))), (Some("$".to_string()), None));
        assert_eq!(extract_loose_price(&format!("${}", "9".repeat(400))), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(19.5).as_deref(), Some("19.50"));
        assert_eq!(format_price(10.0).as_deref(), Some("10.00"));
        assert_eq!(format_price(1299.999).as_deref(), Some("1300.00"));
        assert_eq!(format_price(10.124).as_deref(), Some("10.12"));
        assert_eq!(format_price(0.0).as_deref(), Some("0.00"));
    }

    #[test]
    fn test_format_price_rounds_half_away_from_zero() {
        assert_eq!(format_price(10.125).as_deref(), Some("10.13"));
        assert_eq!(format_price(0.125).as_deref(), Some("0.13"));
        assert_eq!(format_price(2.675).as_deref(), Some("2.68"));
        assert_eq!(format_price(9.995).as_deref(), Some("10.00"));
        assert_eq!(format_price(-1.005).as_deref(), Some("-1.01"));
    }

    #[test]
    fn test_format_price_non_finite() {
        assert_eq!(format_price(f64::INFINITY), None);
        assert_eq!(format_price(f64::NAN), None);
    }

    #[test]
    fn test_strip_undefined() {
        assert_eq!(strip_undefined("undefined$"), "$");
        assert_eq!(strip_undefined("USD"), "USD");
        assert_eq!(strip_undefined("undefined"), "");
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("\u{a0}$10\u{a0}"), "$10");
        assert_eq!(normalize_spaces("€\u{a0}10"), "€ 10");
    }
}
