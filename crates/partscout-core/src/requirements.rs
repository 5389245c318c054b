//! Caller-supplied acceptance policy for replacement parts.

use serde::{Deserialize, Serialize};

use crate::component::{ComponentGrade, AVIATION_TEMP_MAX, AVIATION_TEMP_MIN};
use crate::CoreError;

/// Operating temperature range in °C.
///
/// Deserialization goes through [`TempRange::new`], so `min > max` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTempRange")]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct RawTempRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawTempRange> for TempRange {
    type Error = CoreError;

    fn try_from(raw: RawTempRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl TempRange {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTempRange`] if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidTempRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns `true` if a part rated `part_min..=part_max` covers this whole range.
    /// Unknown bounds never cover anything.
    #[must_use]
    pub fn is_covered_by(&self, part_min: Option<f64>, part_max: Option<f64>) -> bool {
        match (part_min, part_max) {
            (Some(lo), Some(hi)) => lo <= self.min && hi >= self.max,
            _ => false,
        }
    }
}

impl Default for TempRange {
    fn default() -> Self {
        Self {
            min: AVIATION_TEMP_MIN,
            max: AVIATION_TEMP_MAX,
        }
    }
}

/// Replacement policy. Every field is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentRequirements {
    pub temp_range: TempRange,
    /// Acceptable grades. Empty means any grade is acceptable.
    pub grades: Vec<ComponentGrade>,
    pub min_stock: u64,
    pub same_footprint: bool,
    pub max_price_increase_pct: f64,
}

impl Default for ComponentRequirements {
    fn default() -> Self {
        Self {
            temp_range: TempRange::default(),
            grades: Vec::new(),
            min_stock: 0,
            same_footprint: true,
            max_price_increase_pct: 50.0,
        }
    }
}

impl ComponentRequirements {
    /// Returns `true` if `grade` is in the acceptable set (or the set is empty).
    #[must_use]
    pub fn accepts_grade(&self, grade: ComponentGrade) -> bool {
        self.grades.is_empty() || self.grades.contains(&grade)
    }
}
