//! Best-effort extraction of structured facts from distributor free text.
//!
//! Every function here is pure and total: unparseable input yields `None`
//! (or zero stock), never an error.

use std::sync::LazyLock;

use partscout_core::ComponentGrade;
use regex::Regex;

static SIGNED_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("valid regex"));

/// Extracts `(min, max)` from text such as `"-40°C ~ 125°C"`.
///
/// Takes the first two signed integers, normalizing the Unicode minus sign
/// first. The pair is returned ordered so that `min <= max`.
#[must_use]
pub fn parse_temperature_range(text: &str) -> Option<(f64, f64)> {
    let normalized = text.replace('\u{2212}', "-");
    let mut numbers = SIGNED_INT_RE
        .find_iter(&normalized)
        .filter_map(|m| m.as_str().parse::<f64>().ok());
    let first = numbers.next()?;
    let second = numbers.next()?;
    Some((first.min(second), first.max(second)))
}

/// Parses a single temperature bound such as `"- 40 C"` or `"+ 125 C"`.
#[must_use]
pub fn parse_temperature(text: &str) -> Option<f64> {
    let compact: String = text
        .replace('\u{2212}', "-")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect();
    SIGNED_INT_RE
        .find(&compact)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Infers a qualification grade from keywords, case-insensitively.
///
/// Precedence: automotive, military, industrial.
#[must_use]
pub fn infer_grade(text: &str) -> Option<ComponentGrade> {
    let lower = text.to_lowercase();
    if lower.contains("automotive") || lower.contains("aec-q") {
        Some(ComponentGrade::Automotive)
    } else if lower.contains("military") || lower.contains("mil-") {
        Some(ComponentGrade::Military)
    } else if lower.contains("industrial") {
        Some(ComponentGrade::Industrial)
    } else {
        None
    }
}

/// Leading count of an availability string like `"1,234 In Stock"`, or 0.
#[must_use]
pub fn parse_stock(text: &str) -> u64 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.replace(',', "").parse::<u64>().ok())
        .unwrap_or(0)
}

/// Parses a display price such as `"$1,003.10"`. Negative prices are rejected.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let price = cleaned.parse::<f64>().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}
