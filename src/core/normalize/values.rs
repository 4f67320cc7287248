use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

// "BTC/USD", "ETH-USDT", "SOL-EUR-PERP" -> base asset only
static QUOTE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/-](?:USDT|USD|EUR).*$").expect("valid quote suffix regex"));

static NUMBER_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$,€£]").expect("valid number noise regex"));

/// Uppercase a symbol and strip a trailing quote currency
pub fn clean_symbol(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    QUOTE_SUFFIX.replace(&upper, "").trim().to_string()
}

/// Parse a monetary or quantity cell, ignoring currency symbols and thousands separators.
///
/// Accepts plain (`1234.5`) and scientific (`1.2e-3`) notation.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned = NUMBER_NOISE.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn strips_quote_suffixes() {
        assert_eq!(clean_symbol("btc/usd"), "BTC");
        assert_eq!(clean_symbol(" ETH-USDT "), "ETH");
        assert_eq!(clean_symbol("SOL-EUR"), "SOL");
        assert_eq!(clean_symbol("ada-usdc"), "ADA");
        assert_eq!(clean_symbol("DOT"), "DOT");
    }

    #[test]
    fn keeps_symbols_without_separator() {
        // no separator before the quote currency, nothing to strip
        assert_eq!(clean_symbol("BTCUSD"), "BTCUSD");
        assert_eq!(clean_symbol("BTC-GBP"), "BTC-GBP");
    }

    #[test]
    fn parses_currency_formatted_numbers() {
        assert_eq!(parse_decimal("$25,000.00"), Some(dec!(25000.00)));
        assert_eq!(parse_decimal("€1,234.5"), Some(dec!(1234.5)));
        assert_eq!(parse_decimal("£ 99.5 "), Some(dec!(99.5)));
        assert_eq!(parse_decimal("0.25"), Some(dec!(0.25)));
        assert_eq!(parse_decimal("-3"), Some(dec!(-3)));
    }

    #[test]
    fn parses_scientific_notation() {
        assert_eq!(parse_decimal("1.5e-3"), Some(dec!(0.0015)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("$"), None);
        assert_eq!(parse_decimal("n/a"), None);
    }
}
