//! Command handlers for the CLI.
//!
//! Each handler prints one pretty JSON document to stdout. Logs go to stderr.

use partscout_core::{
    ComponentGrade, ComponentRequirements, Distributor, SearchFilters, TempRange,
};
use partscout_matcher::AlternativeFinder;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `None` means every configured distributor.
fn selection(distributors: &[Distributor]) -> Option<&[Distributor]> {
    (!distributors.is_empty()).then_some(distributors)
}

/// Builds the replacement policy from CLI flags.
///
/// # Errors
///
/// Returns an error if `temp_min > temp_max`.
pub(crate) fn requirements(
    temp_min: f64,
    temp_max: f64,
    grades: Vec<ComponentGrade>,
    min_stock: u64,
    any_footprint: bool,
    max_price_increase_pct: f64,
) -> anyhow::Result<ComponentRequirements> {
    Ok(ComponentRequirements {
        temp_range: TempRange::new(temp_min, temp_max)?,
        grades,
        min_stock,
        same_footprint: !any_footprint,
        max_price_increase_pct,
    })
}

/// # Errors
///
/// Returns an error if only one temperature bound is given or `min > max`.
pub(crate) fn search_filters(
    manufacturer: Option<String>,
    min_stock: Option<u64>,
    grades: Vec<ComponentGrade>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
) -> anyhow::Result<SearchFilters> {
    let temp_range = match (temp_min, temp_max) {
        (Some(min), Some(max)) => Some(TempRange::new(min, max)?),
        (None, None) => None,
        _ => anyhow::bail!("--temp-min and --temp-max must be given together"),
    };
    Ok(SearchFilters {
        manufacturer,
        min_stock,
        grades,
        temp_range,
    })
}

pub(crate) async fn run_find_alternative(
    finder: &AlternativeFinder,
    mpn: &str,
    requirements: &ComponentRequirements,
) -> anyhow::Result<()> {
    let report = finder.find_alternative(mpn, requirements).await?;
    print_json(&report)
}

pub(crate) async fn run_availability(
    finder: &AlternativeFinder,
    mpn: &str,
    distributors: &[Distributor],
) -> anyhow::Result<()> {
    let report = finder.get_availability(mpn, selection(distributors)).await?;
    print_json(&report)
}

pub(crate) async fn run_compare(finder: &AlternativeFinder, mpns: &[String]) -> anyhow::Result<()> {
    let report = finder.compare_availability(mpns).await?;
    print_json(&report)
}

pub(crate) async fn run_compliance(finder: &AlternativeFinder, mpn: &str) -> anyhow::Result<()> {
    match finder.check_compliance(mpn).await? {
        Some(report) => print_json(&serde_json::json!({
            "success": true,
            "compliance": report,
        })),
        None => print_json(&serde_json::json!({
            "success": false,
            "mpn": mpn.trim(),
            "message": format!("Component {} not found", mpn.trim()),
        })),
    }
}

pub(crate) async fn run_search(
    finder: &AlternativeFinder,
    keyword: &str,
    filters: &SearchFilters,
    distributors: &[Distributor],
) -> anyhow::Result<()> {
    let report = finder
        .search(keyword, filters, selection(distributors))
        .await;
    tracing::info!(keyword, results = report.results.len(), "search complete");
    print_json(&report)
}
