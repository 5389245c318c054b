//! Canonical component records produced by every distributor client.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Minimum operating temperature (°C) a part must reach to be aviation-suitable.
pub const AVIATION_TEMP_MIN: f64 = -40.0;
/// Maximum operating temperature (°C) a part must reach to be aviation-suitable.
pub const AVIATION_TEMP_MAX: f64 = 125.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distributor {
    Mouser,
    DigiKey,
}

impl Distributor {
    pub const ALL: [Distributor; 2] = [Distributor::Mouser, Distributor::DigiKey];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Distributor::Mouser => "mouser",
            Distributor::DigiKey => "digikey",
        }
    }
}

impl std::fmt::Display for Distributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distributor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mouser" => Ok(Distributor::Mouser),
            "digikey" | "digi-key" => Ok(Distributor::DigiKey),
            _ => Err(CoreError::UnknownDistributor(s.to_owned())),
        }
    }
}

/// Qualification tier of a component.
///
/// Variants are declared from least to most environmentally robust, so the
/// derived `Ord` ranks `Unknown < Commercial < Industrial < Automotive < Military`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComponentGrade {
    #[default]
    Unknown,
    /// Typically 0 °C to 70 °C.
    Commercial,
    /// Typically −40 °C to 85 °C.
    Industrial,
    /// Typically −40 °C to 125/150 °C, AEC-Q qualified.
    Automotive,
    /// Typically −55 °C to 125 °C, MIL-spec.
    Military,
}

impl ComponentGrade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentGrade::Unknown => "unknown",
            ComponentGrade::Commercial => "commercial",
            ComponentGrade::Industrial => "industrial",
            ComponentGrade::Automotive => "automotive",
            ComponentGrade::Military => "military",
        }
    }
}

impl std::fmt::Display for ComponentGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentGrade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commercial" => Ok(ComponentGrade::Commercial),
            "industrial" => Ok(ComponentGrade::Industrial),
            "automotive" => Ok(ComponentGrade::Automotive),
            "military" => Ok(ComponentGrade::Military),
            "unknown" => Ok(ComponentGrade::Unknown),
            _ => Err(CoreError::UnknownGrade(s.to_owned())),
        }
    }
}

/// Unit price at a minimum order quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    pub quantity: u64,
    pub unit_price: f64,
    pub currency: String,
}

impl PriceBreak {
    /// Builds a USD price break.
    #[must_use]
    pub fn usd(quantity: u64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
            currency: "USD".to_owned(),
        }
    }
}

/// One distributor's knowledge of one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAvailability {
    pub mpn: String,
    pub manufacturer: String,
    pub description: String,
    pub distributor: Distributor,
    pub stock: u64,
    pub price_breaks: Vec<PriceBreak>,
    pub datasheet_url: Option<String>,
    pub product_url: Option<String>,
    pub lead_time: Option<String>,
    pub package: Option<String>,
    pub grade: ComponentGrade,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub specs: BTreeMap<String, String>,
}

impl ComponentAvailability {
    /// Creates a record with no stock, pricing, grade, or temperature data.
    #[must_use]
    pub fn new(
        mpn: impl Into<String>,
        manufacturer: impl Into<String>,
        description: impl Into<String>,
        distributor: Distributor,
    ) -> Self {
        Self {
            mpn: mpn.into(),
            manufacturer: manufacturer.into(),
            description: description.into(),
            distributor,
            stock: 0,
            price_breaks: Vec::new(),
            datasheet_url: None,
            product_url: None,
            lead_time: None,
            package: None,
            grade: ComponentGrade::Unknown,
            temp_min: None,
            temp_max: None,
            specs: BTreeMap::new(),
        }
    }

    /// Sets the operating temperature range, swapping the bounds if they
    /// arrive inverted so that `temp_min <= temp_max` always holds.
    pub fn set_temperature_range(&mut self, min: Option<f64>, max: Option<f64>) {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                self.temp_min = Some(hi);
                self.temp_max = Some(lo);
            }
            _ => {
                self.temp_min = min;
                self.temp_max = max;
            }
        }
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price of the lowest-quantity break, or `0.0` when no pricing is known.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        self.price_breaks
            .iter()
            .min_by_key(|pb| pb.quantity)
            .map_or(0.0, |pb| pb.unit_price)
    }

    #[must_use]
    pub fn is_automotive_grade(&self) -> bool {
        self.grade == ComponentGrade::Automotive
    }

    /// `true` when both temperature bounds are known and cover −40 °C to 125 °C.
    #[must_use]
    pub fn is_aviation_suitable(&self) -> bool {
        is_aviation_range(self.temp_min, self.temp_max)
    }
}

/// Returns `true` if the given bounds are both present and cover the aviation range.
#[must_use]
pub fn is_aviation_range(temp_min: Option<f64>, temp_max: Option<f64>) -> bool {
    match (temp_min, temp_max) {
        (Some(lo), Some(hi)) => lo <= AVIATION_TEMP_MIN && hi >= AVIATION_TEMP_MAX,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerComparison {
    pub original: String,
    pub alternative: String,
    pub same: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeComparison {
    pub original: ComponentGrade,
    pub alternative: ComponentGrade,
    pub better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureComparison {
    pub original: [Option<f64>; 2],
    pub alternative: [Option<f64>; 2],
    pub better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub original: f64,
    pub alternative: f64,
    pub difference: f64,
    pub difference_pct: f64,
    pub cheaper: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockComparison {
    pub original: u64,
    pub alternative: u64,
    pub better: bool,
}

/// Side-by-side comparison of an original part and a candidate replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentComparison {
    pub manufacturer: ManufacturerComparison,
    pub grade: GradeComparison,
    pub temperature: TemperatureComparison,
    pub price: PriceComparison,
    pub stock: StockComparison,
}

/// A scored candidate replacement for an original part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeComponent {
    pub mpn: String,
    pub manufacturer: String,
    pub description: String,
    /// Every distributor record found for this candidate, in source order.
    pub availability: Vec<ComponentAvailability>,
    pub same_footprint: bool,
    pub footprint_notes: String,
    /// Positive when the candidate costs more than the original.
    pub price_difference_pct: f64,
    pub grade: ComponentGrade,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    /// 0–100, higher is better.
    pub compatibility_score: f64,
    pub compatibility_notes: Vec<String>,
    pub comparison: ComponentComparison,
    pub recommended: bool,
}

impl AlternativeComponent {
    /// Lowest positive unit price across all distributor records.
    #[must_use]
    pub fn best_price(&self) -> f64 {
        self.availability
            .iter()
            .filter(|a| !a.price_breaks.is_empty())
            .map(ComponentAvailability::unit_price)
            .fold(None, |best: Option<f64>, p| {
                Some(best.map_or(p, |b| b.min(p)))
            })
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn total_stock(&self) -> u64 {
        self.availability.iter().map(|a| a.stock).sum()
    }

    #[must_use]
    pub fn is_aviation_suitable(&self) -> bool {
        is_aviation_range(self.temp_min, self.temp_max)
    }
}
