//! Multi-distributor lookup and alternative recommendation.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use partscout_core::{
    AlternativeComponent, ComponentAvailability, ComponentRequirements, Distributor, SearchFilters,
};
use partscout_distributors::{DistributorError, PartSource};

use crate::compare::{
    compare_components, compatibility_notes, footprint_match, price_difference_pct,
    recommendation_reason,
};
use crate::compliance::{check_aviation_compliance, meets_requirements, ComplianceReport};
use crate::error::MatchError;
use crate::report::{
    AlternativeReport, AvailabilityReport, BestAlternative, ComparisonReport, FindOutcome,
    PartAvailability, SearchReport,
};
use crate::scoring::score_alternative;

/// Number of scored alternatives kept in a report.
const MAX_ALTERNATIVES: usize = 5;

/// Queries an ordered set of [`PartSource`]s and ranks replacement parts.
///
/// Source order matters: it breaks stock ties and orders candidate
/// suggestions. Lookups fan out concurrently on the calling task.
pub struct AlternativeFinder {
    sources: Vec<Arc<dyn PartSource>>,
}

impl AlternativeFinder {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn PartSource>>) -> Self {
        Self { sources }
    }

    #[must_use]
    pub fn distributors(&self) -> Vec<Distributor> {
        self.sources.iter().map(|s| s.distributor()).collect()
    }

    /// Every record any source returns for `mpn`, in source order.
    ///
    /// Failing sources are logged and skipped.
    pub async fn resolve_all(&self, mpn: &str) -> Vec<ComponentAvailability> {
        let lookups = join_all(self.sources.iter().map(|s| s.search_by_mpn(mpn))).await;
        self.sources
            .iter()
            .zip(lookups)
            .filter_map(|(source, result)| match result {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(
                        distributor = %source.distributor(),
                        mpn,
                        error = %e,
                        "part lookup failed"
                    );
                    None
                }
            })
            .collect()
    }

    /// The highest-stock record for `mpn`.
    pub async fn resolve(&self, mpn: &str) -> Option<ComponentAvailability> {
        let records = self.resolve_all(mpn).await;
        best_record(&records).cloned()
    }

    /// Finds and ranks replacements for `mpn` that satisfy `requirements`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingMpn`] if `mpn` is blank. Distributor
    /// failures never surface here; they only reduce the data available.
    pub async fn find_alternative(
        &self,
        mpn: &str,
        requirements: &ComponentRequirements,
    ) -> Result<AlternativeReport, MatchError> {
        let mpn = mpn.trim();
        if mpn.is_empty() {
            return Err(MatchError::MissingMpn);
        }

        let Some(original) = self.resolve(mpn).await else {
            tracing::info!(mpn, "original part not found");
            return Ok(AlternativeReport::not_found(mpn));
        };

        if meets_requirements(&original, requirements) {
            return Ok(AlternativeReport::already_compliant(mpn, &original));
        }

        let candidates = self.candidate_mpns(mpn).await;
        let resolved = join_all(candidates.iter().map(|c| self.resolve_all(c))).await;

        let mut scored: Vec<(AlternativeComponent, ComponentAvailability)> = resolved
            .into_iter()
            .filter_map(|records| {
                let best = best_record(&records)?.clone();
                if !meets_requirements(&best, requirements) {
                    tracing::debug!(mpn = %best.mpn, "candidate rejected by requirements");
                    return None;
                }
                let alternative = build_alternative(&original, &best, records, requirements);
                Some((alternative, best))
            })
            .collect();

        if scored.is_empty() {
            return Ok(AlternativeReport::no_alternatives(mpn, &original));
        }

        // Stable: equal scores keep suggestion order.
        scored.sort_by(|(a, _), (b, _)| b.compatibility_score.total_cmp(&a.compatibility_score));
        scored.truncate(MAX_ALTERNATIVES);

        let best_alternative = scored.first().map(|(alt, record)| BestAlternative {
            mpn: alt.mpn.clone(),
            manufacturer: alt.manufacturer.clone(),
            reason: recommendation_reason(&original, record),
            compatibility_score: alt.compatibility_score,
            price_difference: record.unit_price() - original.unit_price(),
            price_difference_pct: alt.price_difference_pct,
        });

        let mut alternatives: Vec<AlternativeComponent> =
            scored.into_iter().map(|(alt, _)| alt).collect();
        if let Some(top) = alternatives.first_mut() {
            top.recommended = true;
        }

        tracing::info!(
            mpn,
            count = alternatives.len(),
            best = ?best_alternative.as_ref().map(|b| b.mpn.as_str()),
            "alternatives ranked"
        );

        Ok(AlternativeReport {
            success: true,
            outcome: FindOutcome::Found,
            already_compliant: false,
            mpn: mpn.to_owned(),
            message: format!("Found {} alternative(s) for {mpn}", alternatives.len()),
            original: Some((&original).into()),
            alternatives,
            best_alternative,
        })
    }

    /// Looks `mpn` up at the selected distributors (every source when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingMpn`] if `mpn` is blank.
    pub async fn get_availability(
        &self,
        mpn: &str,
        distributors: Option<&[Distributor]>,
    ) -> Result<AvailabilityReport, MatchError> {
        let mpn = mpn.trim();
        if mpn.is_empty() {
            return Err(MatchError::MissingMpn);
        }

        let selected = self.selected(distributors);
        let lookups = join_all(selected.iter().map(|s| s.search_by_mpn(mpn))).await;

        let mut availability = BTreeMap::new();
        let mut errors = BTreeMap::new();
        let mut ordered = Vec::new();
        for (source, result) in selected.iter().zip(lookups) {
            match result {
                Ok(Some(record)) => {
                    ordered.push(record.clone());
                    availability.insert(source.distributor(), record);
                }
                Ok(None) => {}
                Err(e) => {
                    record_failure(&mut errors, source.distributor(), mpn, &e);
                }
            }
        }

        Ok(AvailabilityReport {
            success: !availability.is_empty(),
            mpn: mpn.to_owned(),
            best: best_record(&ordered).cloned(),
            availability,
            errors,
        })
    }

    /// Looks up every part in `mpns` across all sources.
    ///
    /// Blank entries are skipped. Parts no source lists are reported with
    /// `found: false` rather than failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingComponents`] if no entry is a usable MPN.
    pub async fn compare_availability(
        &self,
        mpns: &[String],
    ) -> Result<ComparisonReport, MatchError> {
        let wanted: Vec<&str> = mpns
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();
        if wanted.is_empty() {
            return Err(MatchError::MissingComponents);
        }

        let resolved = join_all(wanted.iter().map(|mpn| self.resolve_all(mpn))).await;
        let components: Vec<PartAvailability> = wanted
            .into_iter()
            .zip(resolved)
            .map(|(mpn, records)| part_availability(mpn, records))
            .collect();

        tracing::info!(
            requested = components.len(),
            found = components.iter().filter(|c| c.found).count(),
            "availability compared"
        );

        Ok(ComparisonReport {
            success: true,
            total: components.len(),
            components,
        })
    }

    /// Resolves `mpn` and checks it against the aviation range.
    ///
    /// `Ok(None)` when no source returns the part.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingMpn`] if `mpn` is blank.
    pub async fn check_compliance(
        &self,
        mpn: &str,
    ) -> Result<Option<ComplianceReport>, MatchError> {
        let mpn = mpn.trim();
        if mpn.is_empty() {
            return Err(MatchError::MissingMpn);
        }
        Ok(self.resolve(mpn).await.as_ref().map(check_aviation_compliance))
    }

    /// Keyword search across the selected distributors, results in source order.
    pub async fn search(
        &self,
        keyword: &str,
        filters: &SearchFilters,
        distributors: Option<&[Distributor]>,
    ) -> SearchReport {
        let selected = self.selected(distributors);
        let searches =
            join_all(selected.iter().map(|s| s.search_by_keyword(keyword, filters))).await;

        let mut results = Vec::new();
        let mut errors = BTreeMap::new();
        for (source, result) in selected.iter().zip(searches) {
            match result {
                Ok(found) => results.extend(found),
                Err(e) => record_failure(&mut errors, source.distributor(), keyword, &e),
            }
        }

        SearchReport {
            keyword: keyword.to_owned(),
            results,
            errors,
        }
    }

    fn selected(&self, distributors: Option<&[Distributor]>) -> Vec<&Arc<dyn PartSource>> {
        self.sources
            .iter()
            .filter(|s| distributors.is_none_or(|wanted| wanted.contains(&s.distributor())))
            .collect()
    }

    /// Candidate MPNs from every source, in source order, without duplicates.
    async fn candidate_mpns(&self, mpn: &str) -> Vec<String> {
        let suggestions =
            join_all(self.sources.iter().map(|s| s.suggest_alternatives(mpn))).await;

        let mut candidates: Vec<String> = Vec::new();
        for (source, result) in self.sources.iter().zip(suggestions) {
            match result {
                Ok(list) => {
                    for candidate in list {
                        if !candidates.iter().any(|c| c.eq_ignore_ascii_case(&candidate)) {
                            candidates.push(candidate);
                        }
                    }
                }
                Err(e) => tracing::warn!(
                    distributor = %source.distributor(),
                    mpn,
                    error = %e,
                    "alternative suggestion failed"
                ),
            }
        }
        candidates
    }
}

fn record_failure(
    errors: &mut BTreeMap<Distributor, String>,
    distributor: Distributor,
    query: &str,
    error: &DistributorError,
) {
    tracing::warn!(distributor = %distributor, query, error = %error, "distributor request failed");
    errors.insert(distributor, error.to_string());
}

/// Highest stock wins; the earliest record wins ties.
fn best_record(records: &[ComponentAvailability]) -> Option<&ComponentAvailability> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if current.stock >= record.stock => Some(current),
        _ => Some(record),
    })
}

fn part_availability(mpn: &str, records: Vec<ComponentAvailability>) -> PartAvailability {
    let lowest_price = records
        .iter()
        .filter(|r| !r.price_breaks.is_empty())
        .map(ComponentAvailability::unit_price)
        .fold(None, |low: Option<f64>, p| Some(low.map_or(p, |l| l.min(p))));

    PartAvailability {
        mpn: mpn.to_owned(),
        found: !records.is_empty(),
        best: best_record(&records).map(Into::into),
        total_stock: records.iter().map(|r| r.stock).sum(),
        lowest_price,
        message: records
            .is_empty()
            .then(|| "Component not found".to_owned()),
        availability: records,
    }
}

/// Widest range over the records that carry both bounds.
fn widest_range(records: &[ComponentAvailability]) -> (Option<f64>, Option<f64>) {
    records
        .iter()
        .filter_map(|r| Some((r.temp_min?, r.temp_max?)))
        .fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), (rlo, rhi)| {
            (
                Some(lo.map_or(rlo, |l| l.min(rlo))),
                Some(hi.map_or(rhi, |h| h.max(rhi))),
            )
        })
}

fn build_alternative(
    original: &ComponentAvailability,
    best: &ComponentAvailability,
    records: Vec<ComponentAvailability>,
    requirements: &ComponentRequirements,
) -> AlternativeComponent {
    let (same_footprint, footprint_notes) = footprint_match(original, best);
    let grade = records.iter().map(|r| r.grade).max().unwrap_or(best.grade);
    let (temp_min, temp_max) = widest_range(&records);

    AlternativeComponent {
        mpn: best.mpn.clone(),
        manufacturer: best.manufacturer.clone(),
        description: best.description.clone(),
        availability: records,
        same_footprint,
        footprint_notes,
        price_difference_pct: price_difference_pct(original.unit_price(), best.unit_price()),
        grade,
        temp_min,
        temp_max,
        compatibility_score: score_alternative(original, best, requirements),
        compatibility_notes: compatibility_notes(original, best, requirements),
        comparison: compare_components(original, best),
        recommended: false,
    }
}

#[cfg(test)]
#[path = "finder_test.rs"]
mod tests;
