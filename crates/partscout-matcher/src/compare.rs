//! Side-by-side comparison and recommendation text for a candidate.

use partscout_core::{
    ComponentAvailability, ComponentComparison, ComponentGrade, ComponentRequirements,
    GradeComparison, ManufacturerComparison, PriceComparison, StockComparison,
    TemperatureComparison,
};

/// `true` if `candidate` is strictly more robust than `original`.
#[must_use]
pub fn is_grade_better(candidate: ComponentGrade, original: ComponentGrade) -> bool {
    candidate > original
}

/// Price delta in percent of the original price; 0 when the original is unpriced.
#[must_use]
pub fn price_difference_pct(original_price: f64, candidate_price: f64) -> f64 {
    if original_price > 0.0 {
        (candidate_price - original_price) / original_price * 100.0
    } else {
        0.0
    }
}

#[must_use]
pub fn compare_components(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
) -> ComponentComparison {
    let original_price = original.unit_price();
    let candidate_price = candidate.unit_price();

    let temperature_better = matches!(
        (original.temp_min, original.temp_max, candidate.temp_min, candidate.temp_max),
        (Some(olo), Some(ohi), Some(clo), Some(chi)) if clo <= olo && chi >= ohi
    );

    ComponentComparison {
        manufacturer: ManufacturerComparison {
            original: original.manufacturer.clone(),
            alternative: candidate.manufacturer.clone(),
            same: original.manufacturer.to_lowercase() == candidate.manufacturer.to_lowercase(),
        },
        grade: GradeComparison {
            original: original.grade,
            alternative: candidate.grade,
            better: is_grade_better(candidate.grade, original.grade),
        },
        temperature: TemperatureComparison {
            original: [original.temp_min, original.temp_max],
            alternative: [candidate.temp_min, candidate.temp_max],
            better: temperature_better,
        },
        price: PriceComparison {
            original: original_price,
            alternative: candidate_price,
            difference: candidate_price - original_price,
            difference_pct: price_difference_pct(original_price, candidate_price),
            cheaper: candidate_price < original_price,
        },
        stock: StockComparison {
            original: original.stock,
            alternative: candidate.stock,
            better: candidate.stock > original.stock,
        },
    }
}

/// The individual reasons `candidate` improves on `original`, in a fixed order:
/// grade, temperature, aviation suitability, price, stock.
#[must_use]
pub fn recommendation_reasons(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if is_grade_better(candidate.grade, original.grade) {
        reasons.push(format!("Upgraded to {} grade", candidate.grade));
    }

    if let (Some(olo), Some(ohi), Some(clo), Some(chi)) = (
        original.temp_min,
        original.temp_max,
        candidate.temp_min,
        candidate.temp_max,
    ) {
        if clo < olo || chi > ohi {
            reasons.push(format!(
                "Better temperature range ({clo}C to {chi}C vs {olo}C to {ohi}C)"
            ));
        }
    }

    if candidate.is_aviation_suitable() && !original.is_aviation_suitable() {
        reasons.push("Meets aviation requirements (-40C to 125C)".to_owned());
    }

    let original_price = original.unit_price();
    let candidate_price = candidate.unit_price();
    if candidate_price < original_price {
        reasons.push(format!(
            "Costs less (save ${:.2} per unit)",
            original_price - candidate_price
        ));
    } else if candidate_price > original_price {
        reasons.push(format!(
            "Costs ${:.2} more per unit for higher grade",
            candidate_price - original_price
        ));
    }

    if candidate.stock > original.stock {
        reasons.push(format!(
            "Better availability ({} in stock)",
            group_thousands(candidate.stock)
        ));
    }

    reasons
}

/// Reasons joined with `"; "`, or `"Meets requirements"` when none hold.
#[must_use]
pub fn recommendation_reason(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
) -> String {
    let reasons = recommendation_reasons(original, candidate);
    if reasons.is_empty() {
        "Meets requirements".to_owned()
    } else {
        reasons.join("; ")
    }
}

/// Footprint match between the two records' packages.
///
/// Returns `(same_footprint, note)`. Unknown packages never count as a match.
#[must_use]
pub fn footprint_match(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
) -> (bool, String) {
    match (original.package.as_deref(), candidate.package.as_deref()) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => (true, format!("Same package ({a})")),
        (Some(a), Some(b)) => (false, format!("Different package ({b} vs {a})")),
        _ => (false, "Package unknown; verify footprint".to_owned()),
    }
}

/// Advisory notes for a candidate. They never disqualify it.
#[must_use]
pub fn compatibility_notes(
    original: &ComponentAvailability,
    candidate: &ComponentAvailability,
    requirements: &ComponentRequirements,
) -> Vec<String> {
    let mut notes = recommendation_reasons(original, candidate);

    let (same_footprint, footprint_note) = footprint_match(original, candidate);
    if requirements.same_footprint && !same_footprint {
        notes.push(format!("Footprint check required: {footprint_note}"));
    } else {
        notes.push(footprint_note);
    }

    let increase = price_difference_pct(original.unit_price(), candidate.unit_price());
    if increase > requirements.max_price_increase_pct {
        notes.push(format!(
            "Price increase {increase:.1}% exceeds {:.1}% limit",
            requirements.max_price_increase_pct
        ));
    }

    notes
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
