use async_trait::async_trait;
use partscout_core::{ComponentAvailability, Distributor, SearchFilters};

use crate::error::DistributorError;

/// A place part data comes from: a live distributor API or the offline
/// fixture table.
///
/// Callers hold sources as `Arc<dyn PartSource>` and never branch on which
/// implementation they have.
#[async_trait]
pub trait PartSource: Send + Sync {
    fn distributor(&self) -> Distributor;

    /// Looks up one part by manufacturer part number.
    ///
    /// `Ok(None)` means the distributor does not list the part.
    async fn search_by_mpn(&self, mpn: &str)
        -> Result<Option<ComponentAvailability>, DistributorError>;

    /// Looks up one part by the distributor's own part number.
    async fn get_component_details(
        &self,
        part_number: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError>;

    /// Free-text search. `filters` are applied after normalization.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ComponentAvailability>, DistributorError>;

    /// Candidate replacement MPNs for `mpn`. Sources without a
    /// cross-reference return none.
    async fn suggest_alternatives(&self, _mpn: &str) -> Result<Vec<String>, DistributorError> {
        Ok(Vec::new())
    }
}
