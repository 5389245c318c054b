//! Serializable results returned by [`crate::AlternativeFinder`].

use std::collections::BTreeMap;

use partscout_core::{AlternativeComponent, ComponentAvailability, ComponentGrade, Distributor};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindOutcome {
    /// At least one qualifying alternative was scored.
    Found,
    /// The original already meets the requirements; no search was run.
    AlreadyCompliant,
    /// The original was found but no candidate qualified.
    NoAlternatives,
    /// No source returned the original part.
    NotFound,
}

/// Flat view of the resolved original part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub mpn: String,
    pub manufacturer: String,
    pub description: String,
    pub distributor: Distributor,
    pub stock: u64,
    pub price: f64,
    pub grade: ComponentGrade,
    pub temp_range: [Option<f64>; 2],
    pub package: Option<String>,
    pub aviation_suitable: bool,
    pub datasheet_url: Option<String>,
    pub product_url: Option<String>,
}

impl From<&ComponentAvailability> for ComponentSummary {
    fn from(c: &ComponentAvailability) -> Self {
        Self {
            mpn: c.mpn.clone(),
            manufacturer: c.manufacturer.clone(),
            description: c.description.clone(),
            distributor: c.distributor,
            stock: c.stock,
            price: c.unit_price(),
            grade: c.grade,
            temp_range: [c.temp_min, c.temp_max],
            package: c.package.clone(),
            aviation_suitable: c.is_aviation_suitable(),
            datasheet_url: c.datasheet_url.clone(),
            product_url: c.product_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAlternative {
    pub mpn: String,
    pub manufacturer: String,
    pub reason: String,
    pub compatibility_score: f64,
    pub price_difference: f64,
    pub price_difference_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeReport {
    pub success: bool,
    pub outcome: FindOutcome,
    /// Mirrors `outcome == AlreadyCompliant` for flat JSON consumers.
    pub already_compliant: bool,
    pub mpn: String,
    pub message: String,
    pub original: Option<ComponentSummary>,
    /// Top candidates, best first. At most five.
    pub alternatives: Vec<AlternativeComponent>,
    pub best_alternative: Option<BestAlternative>,
}

impl AlternativeReport {
    pub(crate) fn not_found(mpn: &str) -> Self {
        Self {
            success: false,
            outcome: FindOutcome::NotFound,
            already_compliant: false,
            mpn: mpn.to_owned(),
            message: format!("Original component '{mpn}' not found"),
            original: None,
            alternatives: Vec::new(),
            best_alternative: None,
        }
    }

    pub(crate) fn already_compliant(mpn: &str, original: &ComponentAvailability) -> Self {
        Self {
            success: true,
            outcome: FindOutcome::AlreadyCompliant,
            already_compliant: true,
            mpn: mpn.to_owned(),
            message: format!("{mpn} already meets requirements"),
            original: Some(original.into()),
            alternatives: Vec::new(),
            best_alternative: None,
        }
    }

    pub(crate) fn no_alternatives(mpn: &str, original: &ComponentAvailability) -> Self {
        Self {
            success: true,
            outcome: FindOutcome::NoAlternatives,
            already_compliant: false,
            mpn: mpn.to_owned(),
            message: format!("No suitable alternatives found for {mpn}"),
            original: Some(original.into()),
            alternatives: Vec::new(),
            best_alternative: None,
        }
    }
}

/// Per-distributor lookup results for one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    /// `true` if any distributor returned a record.
    pub success: bool,
    pub mpn: String,
    pub availability: BTreeMap<Distributor, ComponentAvailability>,
    pub errors: BTreeMap<Distributor, String>,
    /// Highest-stock record; the first source wins ties.
    pub best: Option<ComponentAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub keyword: String,
    pub results: Vec<ComponentAvailability>,
    pub errors: BTreeMap<Distributor, String>,
}

/// Cross-distributor view of one part in a batch comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartAvailability {
    pub mpn: String,
    pub found: bool,
    /// Highest-stock record; the first source wins ties.
    pub best: Option<ComponentSummary>,
    /// Every distributor record, in source order.
    pub availability: Vec<ComponentAvailability>,
    pub total_stock: u64,
    /// Lowest single-unit price among records that carry pricing.
    pub lowest_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub success: bool,
    /// One entry per requested part, in request order.
    pub components: Vec<PartAvailability>,
    pub total: usize,
}
