//! Distributor clients for component sourcing.
//!
//! Every data source implements [`PartSource`]: the live [`MouserClient`] and
//! [`DigiKeyClient`], and the offline [`FixtureSource`]. [`build_sources`]
//! picks between them once, from configuration. Live clients share the
//! [`DistributorHttp`] layer (token-bucket rate limiting, TTL response cache,
//! scoped sessions).

pub mod cache;
pub mod client;
pub mod digikey;
pub mod error;
pub mod fixtures;
pub mod heuristics;
pub mod mouser;
pub mod rate_limit;
pub mod source;
pub mod sources;

pub use cache::ResponseCache;
pub use client::{ApiRequest, ClientSettings, DistributorHttp, Session};
pub use digikey::token::{FileTokenStore, MemoryTokenStore, StoredToken, TokenStore};
pub use digikey::DigiKeyClient;
pub use error::DistributorError;
pub use fixtures::FixtureSource;
pub use mouser::MouserClient;
pub use rate_limit::RateLimiter;
pub use source::PartSource;
pub use sources::build_sources;

/// Normalizes a base URL to have no trailing slash, rejecting unparseable input.
fn validate_base_url(base_url: &str) -> Result<String, DistributorError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed).map_err(|e| DistributorError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}
