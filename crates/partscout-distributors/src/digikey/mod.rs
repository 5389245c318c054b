//! Client for the DigiKey Product Information V4 API (OAuth2 client credentials).

mod parse;
pub mod token;
mod types;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use partscout_core::{ComponentAvailability, Distributor, SearchFilters};
use reqwest::Url;
use tokio::sync::Mutex;

use crate::client::{ApiRequest, ClientSettings, DistributorHttp};
use crate::error::DistributorError;
use crate::source::PartSource;
use crate::validate_base_url;

use self::parse::{decode_product, normalize_product};
use self::token::{MemoryTokenStore, StoredToken, TokenStore};
use self::types::{
    DetailsResponse, ExactFilter, KeywordFilters, KeywordRequest, KeywordResponse, TokenResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.digikey.com";
const KEYWORD_RECORD_COUNT: u32 = 50;

/// Client for the DigiKey V4 API.
///
/// Tokens are kept in memory and mirrored to the injected [`TokenStore`]
/// (in-memory by default; see [`DigiKeyClient::with_token_store`]).
pub struct DigiKeyClient {
    http: DistributorHttp,
    client_id: String,
    client_secret: String,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
    /// Serializes token acquisition so concurrent requests share one exchange.
    token: Mutex<Option<StoredToken>>,
}

impl fmt::Debug for DigiKeyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigiKeyClient")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("token_store", &self.token_store)
            .finish_non_exhaustive()
    }
}

impl DigiKeyClient {
    /// Creates a client pointed at the production DigiKey API.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::MissingCredentials`] if either credential is blank.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        settings: ClientSettings,
    ) -> Result<Self, DistributorError> {
        Self::with_base_url(client_id, client_secret, settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::MissingCredentials`] if either credential is
    /// blank, or [`DistributorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client_id: &str,
        client_secret: &str,
        settings: ClientSettings,
        base_url: &str,
    ) -> Result<Self, DistributorError> {
        if client_id.trim().is_empty() {
            return Err(DistributorError::MissingCredentials {
                distributor: Distributor::DigiKey,
                what: "a client id",
            });
        }
        if client_secret.trim().is_empty() {
            return Err(DistributorError::MissingCredentials {
                distributor: Distributor::DigiKey,
                what: "a client secret",
            });
        }
        Ok(Self {
            http: DistributorHttp::new(settings),
            client_id: client_id.trim().to_owned(),
            client_secret: client_secret.trim().to_owned(),
            base_url: validate_base_url(base_url)?,
            token_store: Arc::new(MemoryTokenStore::new()),
            token: Mutex::new(None),
        })
    }

    /// Replaces the token store.
    #[must_use]
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }

    #[must_use]
    pub fn http(&self) -> &DistributorHttp {
        &self.http
    }

    /// Returns a valid access token, exchanging credentials only when neither
    /// the in-memory token nor the stored one is fresh.
    ///
    /// Must be called inside a session.
    ///
    /// # Errors
    ///
    /// - [`DistributorError::Auth`] if the exchange is rejected or unparseable.
    /// - [`DistributorError::ClientNotInitialized`] outside a session.
    /// - [`DistributorError::Http`] on network failure.
    pub async fn access_token(&self) -> Result<String, DistributorError> {
        let mut slot = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        if let Some(stored) = self.token_store.load().filter(|t| t.is_fresh(now)) {
            tracing::debug!(distributor = "digikey", "reusing stored access token");
            let access = stored.access_token.clone();
            *slot = Some(stored);
            return Ok(access);
        }

        let issued = self.exchange_token().await?;
        if let Err(e) = self.token_store.save(&issued) {
            tracing::warn!(distributor = "digikey", error = %e, "failed to persist access token");
        }
        let access = issued.access_token.clone();
        *slot = Some(issued);
        Ok(access)
    }

    async fn exchange_token(&self) -> Result<StoredToken, DistributorError> {
        let client = self.http.session_client()?;
        let response = client
            .post(format!("{}/v1/oauth2/token", self.base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DistributorError::Auth(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| DistributorError::Auth(format!("token parse error: {e}")))?;

        tracing::info!(distributor = "digikey", expires_in = ?token.expires_in, "obtained access token");
        Ok(StoredToken::issued(
            token.access_token,
            token.token_type,
            token.expires_in,
            Utc::now(),
        ))
    }

    async fn authorized(&self, request: ApiRequest) -> Result<serde_json::Value, DistributorError> {
        let token = self.access_token().await?;
        let request = request
            .header("Authorization", format!("Bearer {token}"))
            .header("X-DIGIKEY-Client-Id", self.client_id.clone())
            .header("Accept", "application/json");
        self.http.request(request).await
    }

    async fn keyword_search(
        &self,
        keywords: &str,
        record_count: u32,
        filters: KeywordFilters<'_>,
    ) -> Result<KeywordResponse, DistributorError> {
        let payload = KeywordRequest {
            keywords,
            record_count,
            record_start_position: 0,
            filters,
        };
        let body = serde_json::to_value(&payload).map_err(|e| DistributorError::Deserialize {
            context: "digikey request body".to_owned(),
            source: e,
        })?;
        let request = ApiRequest::post(format!("{}/products/v4/search/keyword", self.base_url), body)
            .cached(true);
        let response = self.authorized(request).await?;
        serde_json::from_value(response).map_err(|e| DistributorError::Deserialize {
            context: format!("digikey keyword search ({keywords})"),
            source: e,
        })
    }

    fn details_url(&self, part_number: &str) -> Result<Url, DistributorError> {
        let invalid = |reason: &str| DistributorError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: reason.to_owned(),
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base"))?
            .pop_if_empty()
            .extend(["products", "v4", "search", part_number, "productdetails"]);
        Ok(url)
    }
}

#[async_trait]
impl PartSource for DigiKeyClient {
    fn distributor(&self) -> Distributor {
        Distributor::DigiKey
    }

    async fn search_by_mpn(
        &self,
        mpn: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        let _session = self.http.open_session()?;
        let filters = KeywordFilters {
            manufacturer_part_number: Some(ExactFilter::new(mpn)),
        };
        let response = self.keyword_search(mpn, 1, filters).await?;
        Ok(response
            .products
            .into_iter()
            .next()
            .and_then(decode_product)
            .and_then(|product| normalize_product(product, mpn)))
    }

    async fn get_component_details(
        &self,
        part_number: &str,
    ) -> Result<Option<ComponentAvailability>, DistributorError> {
        let _session = self.http.open_session()?;
        let url = self.details_url(part_number)?;
        let response = self.authorized(ApiRequest::get(url.as_str())).await?;
        let details: DetailsResponse =
            serde_json::from_value(response).map_err(|e| DistributorError::Deserialize {
                context: format!("digikey product details ({part_number})"),
                source: e,
            })?;
        Ok(details
            .product
            .and_then(decode_product)
            .and_then(|product| normalize_product(product, part_number)))
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ComponentAvailability>, DistributorError> {
        let _session = self.http.open_session()?;
        let response = self
            .keyword_search(keyword, KEYWORD_RECORD_COUNT, KeywordFilters::default())
            .await?;
        Ok(response
            .products
            .into_iter()
            .filter_map(decode_product)
            .filter_map(|product| normalize_product(product, ""))
            .filter(|component| filters.matches(component))
            .collect())
    }
}
