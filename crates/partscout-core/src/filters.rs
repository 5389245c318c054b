//! Post-normalization filters for keyword search results.

use crate::component::{ComponentAvailability, ComponentGrade};
use crate::requirements::TempRange;

/// Filters applied to normalized records after a keyword search.
///
/// They are never pushed down to the remote query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Case-insensitive manufacturer name.
    pub manufacturer: Option<String>,
    pub min_stock: Option<u64>,
    /// Acceptable grades. Empty means any.
    pub grades: Vec<ComponentGrade>,
    /// The component's rated range must contain this range.
    pub temp_range: Option<TempRange>,
}

impl SearchFilters {
    #[must_use]
    pub fn matches(&self, component: &ComponentAvailability) -> bool {
        if let Some(manufacturer) = &self.manufacturer {
            if !component.manufacturer.eq_ignore_ascii_case(manufacturer) {
                return false;
            }
        }
        if let Some(min_stock) = self.min_stock {
            if component.stock < min_stock {
                return false;
            }
        }
        if !self.grades.is_empty() && !self.grades.contains(&component.grade) {
            return false;
        }
        if let Some(range) = &self.temp_range {
            if !range.is_covered_by(component.temp_min, component.temp_max) {
                return false;
            }
        }
        true
    }
}
