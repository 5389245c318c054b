//! Additive 0–100 compatibility score for a candidate replacement.
//!
//! | factor | max |
//! |---|---|
//! | grade | 30 |
//! | temperature margin | 20 |
//! | stock | 20 |
//! | price ratio | 20 |
//! | same manufacturer | 10 |

use partscout_core::{ComponentAvailability, ComponentGrade, ComponentRequirements};

#[must_use]
pub fn grade_score(grade: ComponentGrade) -> f64 {
    match grade {
        ComponentGrade::Automotive => 30.0,
        ComponentGrade::Industrial => 25.0,
        ComponentGrade::Military => 20.0,
        ComponentGrade::Commercial => 10.0,
        ComponentGrade::Unknown => 0.0,
    }
}

/// Full credit when the part's range covers the required range, half credit
/// when it misses by at most 10 °C on either side.
#[must_use]
pub fn temperature_score(
    candidate: &ComponentAvailability,
    requirements: &ComponentRequirements,
) -> f64 {
    let (Some(lo), Some(hi)) = (candidate.temp_min, candidate.temp_max) else {
        return 0.0;
    };
    let margin_low = requirements.temp_range.min - lo;
    let margin_high = hi - requirements.temp_range.max;
    if margin_low >= 0.0 && margin_high >= 0.0 {
        20.0
    } else if margin_low >= -10.0 && margin_high >= -10.0 {
        10.0
    } else {
        0.0
    }
}

#[must_use]
pub fn stock_score(stock: u64) -> f64 {
    match stock {
        1000.. => 20.0,
        100..=999 => 15.0,
        10..=99 => 10.0,
        1..=9 => 5.0,
        0 => 0.0,
    }
}

/// Scored only when both unit prices are known and positive.
#[must_use]
pub fn price_score(original_price: f64, candidate_price: f64) -> f64 {
    if original_price <= 0.0 || candidate_price <= 0.0 {
        return 0.0;
    }
    let ratio = candidate_price / original_price;
    if ratio <= 0.9 {
        20.0
    } else if ratio <= 1.0 {
        18.0
    } else if ratio <= 1.2 {
        15.0
    } else if ratio <= 1.5 {
        10.0
    } else {
        0.0
    }
}

#[must_use]
pub fn manufacturer_bonus(original: &str, candidate: &str) -> f64 {
    if original.to_lowercase() == candidate.to_lowercase() {
        10.0
    } else {
        0.0
    }
}

/// Sums every factor for `candidate` against `original`.
#[must_use]
pub fn score_alternative(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
    requirements: &ComponentRequirements,
) -> f64 {
    grade_score(candidate.grade)
        + temperature_score(candidate, requirements)
        + stock_score(candidate.stock)
        + price_score(original.unit_price(), candidate.unit_price())
        + manufacturer_bonus(&original.manufacturer, &candidate.manufacturer)
}
