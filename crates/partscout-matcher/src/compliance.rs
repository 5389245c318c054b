//! Aviation compliance checks and the requirement predicate.

use partscout_core::component::{AVIATION_TEMP_MAX, AVIATION_TEMP_MIN};
use partscout_core::{ComponentAvailability, ComponentGrade, ComponentRequirements};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub mpn: String,
    pub compliant: bool,
    pub grade: ComponentGrade,
    pub temp_range: [Option<f64>; 2],
    pub issues: Vec<String>,
    pub recommendation: String,
}

/// Checks one record against the −40 °C to 125 °C aviation range.
///
/// Commercial grade is reported as an issue even when the temperature range
/// passes, but it does not affect `compliant`.
#[must_use]
pub fn check_aviation_compliance(component: &ComponentAvailability) -> ComplianceReport {
    let compliant = component.is_aviation_suitable();
    let mut issues = Vec::new();

    match (component.temp_min, component.temp_max) {
        (Some(lo), Some(hi)) => {
            if lo > AVIATION_TEMP_MIN {
                issues.push(format!(
                    "Min temperature {lo}C > {AVIATION_TEMP_MIN}C requirement"
                ));
            }
            if hi < AVIATION_TEMP_MAX {
                issues.push(format!(
                    "Max temperature {hi}C < {AVIATION_TEMP_MAX}C requirement"
                ));
            }
        }
        _ => issues.push("Temperature range not specified".to_owned()),
    }

    if component.grade == ComponentGrade::Commercial {
        issues.push("Commercial grade (prefer automotive/industrial)".to_owned());
    }

    let recommendation = if compliant {
        "Component meets aviation requirements".to_owned()
    } else {
        format!("Upgrade needed: {}", issues.join("; "))
    };

    ComplianceReport {
        mpn: component.mpn.clone(),
        compliant,
        grade: component.grade,
        temp_range: [component.temp_min, component.temp_max],
        issues,
        recommendation,
    }
}

/// Temperature containment, grade membership, and minimum stock.
#[must_use]
pub fn meets_requirements(
    component: &ComponentAvailability,
    requirements: &ComponentRequirements,
) -> bool {
    requirements
        .temp_range
        .is_covered_by(component.temp_min, component.temp_max)
        && requirements.accepts_grade(component.grade)
        && component.stock >= requirements.min_stock
}

#[cfg(test)]
mod tests {
    use partscout_core::{Distributor, TempRange};

    use super::*;

    fn part(grade: ComponentGrade, temps: Option<(f64, f64)>) -> ComponentAvailability {
        let mut c = ComponentAvailability::new("X1", "Acme", "", Distributor::Mouser);
        c.grade = grade;
        if let Some((lo, hi)) = temps {
            c.set_temperature_range(Some(lo), Some(hi));
        }
        c.stock = 50;
        c
    }

    #[test]
    fn automotive_full_range_is_compliant() {
        let report = check_aviation_compliance(&part(ComponentGrade::Automotive, Some((-40.0, 125.0))));
        assert!(report.compliant);
        assert!(report.issues.is_empty());
        assert_eq!(report.recommendation, "Component meets aviation requirements");
    }

    #[test]
    fn both_bounds_are_reported_independently() {
        let report = check_aviation_compliance(&part(ComponentGrade::Commercial, Some((0.0, 70.0))));
        assert!(!report.compliant);
        assert_eq!(
            report.issues,
            vec![
                "Min temperature 0C > -40C requirement".to_owned(),
                "Max temperature 70C < 125C requirement".to_owned(),
                "Commercial grade (prefer automotive/industrial)".to_owned(),
            ]
        );
        assert!(report.recommendation.starts_with("Upgrade needed: Min temperature 0C"));
    }

    #[test]
    fn missing_range_is_an_issue() {
        let report = check_aviation_compliance(&part(ComponentGrade::Unknown, None));
        assert!(!report.compliant);
        assert_eq!(report.issues, vec!["Temperature range not specified".to_owned()]);
        assert_eq!(report.temp_range, [None, None]);
    }

    #[test]
    fn commercial_grade_is_flagged_without_failing() {
        let report = check_aviation_compliance(&part(ComponentGrade::Commercial, Some((-55.0, 150.0))));
        assert!(report.compliant);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn one_degree_short_is_not_compliant() {
        assert!(!check_aviation_compliance(&part(ComponentGrade::Industrial, Some((-39.0, 125.0)))).compliant);
    }

    #[test]
    fn requirement_predicate() {
        let req = ComponentRequirements::default();
        assert!(meets_requirements(&part(ComponentGrade::Commercial, Some((-55.0, 150.0))), &req));
        assert!(!meets_requirements(&part(ComponentGrade::Commercial, Some((0.0, 70.0))), &req));
        assert!(!meets_requirements(&part(ComponentGrade::Automotive, None), &req));

        let strict = ComponentRequirements {
            grades: vec![ComponentGrade::Automotive, ComponentGrade::Industrial],
            min_stock: 100,
            ..ComponentRequirements::default()
        };
        assert!(!meets_requirements(&part(ComponentGrade::Commercial, Some((-55.0, 150.0))), &strict));
        assert!(
            !meets_requirements(&part(ComponentGrade::Automotive, Some((-40.0, 125.0))), &strict),
            "stock 50 is below the minimum"
        );

        let narrow = ComponentRequirements {
            temp_range: TempRange::new(0.0, 70.0).unwrap(),
            ..ComponentRequirements::default()
        };
        assert!(meets_requirements(&part(ComponentGrade::Commercial, Some((0.0, 70.0))), &narrow));
    }
}
