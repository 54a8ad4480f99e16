//! Price formatting for product cards.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown when a price string has no leading number.
pub const PRICE_UNAVAILABLE: &str = "N/A";

// Leading decimal number, the same prefix a lenient float parser accepts.
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid leading number regex")
});

/// Formats a decimal-as-string price to two places, or [`PRICE_UNAVAILABLE`].
///
/// Trailing text is ignored (`"19.9 USD"` → `"19.90"`) and exponents are
/// honoured (`"1e3"` → `"1000.00"`); halves round away from zero. Magnitudes
/// beyond `Decimal`'s range fall back to binary floating point.
#[must_use]
pub fn format_price(raw: &str) -> String {
    let Some(number) = leading_number(raw) else {
        return PRICE_UNAVAILABLE.to_string();
    };
    match parse_decimal(number) {
        Some(price) => {
            let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        }
        None => match number.parse::<f64>() {
            Ok(price) if price.is_finite() => format!("{price:.2}"),
            _ => PRICE_UNAVAILABLE.to_string(),
        },
    }
}

fn leading_number(raw: &str) -> Option<&str> {
    Some(LEADING_NUMBER_RE.captures(raw)?.get(1)?.as_str())
}

fn parse_decimal(number: &str) -> Option<Decimal> {
    if number.contains(['e', 'E']) {
        Decimal::from_scientific(number).ok()
    } else {
        Decimal::from_str(number).ok()
    }
}
