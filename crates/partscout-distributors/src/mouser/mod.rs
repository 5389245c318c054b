//! Client for the Mouser Search API (API-key authentication).

mod parse;
mod types;

use async_trait::async_trait;
use partscout_core::{ComponentAvailability, Distributor, SearchFilters};

use crate::client::{ApiRequest, ClientSettings, DistributorHttp};
use crate::error::DistributorError;
use crate::source::PartSource;
use crate::validate_base_url;

use self::parse::{decode_parts, normalize_part, select_part};
use self::types::{KeywordRequest, KeywordSearch, PartNumberRequest, PartNumberSearch};

const DEFAULT_BASE_URL: &str = "https://api.mouser.com";

/// Client for the Mouser Search API.
///
/// Use [`MouserClient::new`] for production or [`MouserClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug)]
pub struct MouserClient {
    http: DistributorHttp,
    api_key: String,
    base_url: String,
}

impl MouserClient {
    /// Creates a client pointed at the production Mouser API.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::MissingCredentials`] if `api_key` is blank.
    pub fn new(api_key: &str, settings: ClientSettings) -> Result<Self, DistributorError> {
        Self::with_base_url(api_key, settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::MissingCredentials`] if `api_key` is blank,
    /// or [`DistributorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        settings: ClientSettings,
        base_url: &str,
    ) -> Result<Self, DistributorError> {
        if api_key.trim().is_empty() {
            return Err(DistributorError::MissingCredentials {
                distributor: Distributor::Mouser,
                what: "an API key",
            });
        }
        Ok(Self {
            http: DistributorHttp::new(settings),
            api_key: api_key.trim().to_owned(),
            base_url: validate_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn http(&self) -> &DistributorHttp {
        &self.http
    }

    async fn post_search(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, DistributorError> {
        let request = ApiRequest::post(format!("{}{path}", self.base_url), body)
            .query("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .cached(true);
        self.http.request(request).await
    }
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<serde_json::Value, DistributorError> {
    serde_json::to_value(payload).map_err(|e| DistributorError::Deserialize {
        context: "mouser request body".to_owned(),
        source: e,
    })
}

#[async_trait]
impl PartSource for MouserClient {
    fn distributor(&self) -> Distributor {
        Distributor::Mouser
    }

    async fn search_by_mpn(
        &self,
        mpn: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        let _session = self.http.open_session()?;
        let body = to_body(&PartNumberRequest {
            search: PartNumberSearch {
                mouser_part_number: mpn,
                part_search_options: "",
            },
        })?;
        let response = self.post_search("/api/v1/search/partnumber", body).await?;
        let parts = decode_parts(response)?;
        Ok(select_part(parts).and_then(|part| normalize_part(part, mpn)))
    }

    /// Mouser has no separate details endpoint; this is a part-number search.
    async fn get_component_details(
        &self,
        part_number: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        self.search_by_mpn(part_number).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ComponentAvailability>, DistributorError> {
        let _session = self.http.open_session()?;
        let body = to_body(&KeywordRequest {
            search: KeywordSearch {
                keyword,
                records: 0,
                starting_record: 0,
                search_options: "",
                search_with_your_sign_up_language: "",
            },
        })?;
        let response = self.post_search("/api/v1/search/keyword", body).await?;
        let parts = decode_parts(response)?;
        Ok(parts
            .into_iter()
            .filter_map(|part| normalize_part(part, ""))
            .filter(|component| filters.matches(component))
            .collect())
    }
}
