//! Shared networking layer for distributor clients.
//!
//! [`DistributorHttp`] composes a [`RateLimiter`], a [`ResponseCache`], and a
//! scoped network session. Sessions are opened with
//! [`DistributorHttp::open_session`] and closed when the last [`Session`]
//! guard drops, on every exit path. Pooled idle connections are disabled so a
//! socket is never reused after the peer closes it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use partscout_core::AppConfig;
use reqwest::{Client, Method};

use crate::cache::{cache_key, ResponseCache};
use crate::error::DistributorError;
use crate::rate_limit::RateLimiter;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-client networking knobs.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub requests_per_minute: u32,
    pub cache_ttl_secs: u64,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            requests_per_minute: 30,
            cache_ttl_secs: 3600,
            user_agent: "partscout/0.1 (component-sourcing)".to_owned(),
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            requests_per_minute: config.requests_per_minute,
            cache_ttl_secs: config.cache_ttl_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// A single outbound JSON request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: String,
    headers: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    use_cache: bool,
}

impl ApiRequest {
    /// A read request. Cached by default.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            use_cache: true,
        }
    }

    /// A write-style request carrying a JSON body. Not cached by default.
    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: Some(body),
            use_cache: false,
        }
    }

    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn cached(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Default)]
struct SessionSlot {
    client: Option<Client>,
    holders: usize,
}

/// Rate-limited, cached HTTP executor owned by one distributor client.
#[derive(Debug)]
pub struct DistributorHttp {
    settings: ClientSettings,
    limiter: RateLimiter,
    cache: ResponseCache,
    session: Mutex<SessionSlot>,
}

/// RAII guard keeping the owning client's session open.
#[derive(Debug)]
pub struct Session<'a> {
    http: &'a DistributorHttp,
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.http.release_session();
    }
}

impl DistributorHttp {
    #[must_use]
    pub fn new(settings: ClientSettings) -> Self {
        let limiter = RateLimiter::new(settings.requests_per_minute);
        let cache = ResponseCache::new(Duration::from_secs(settings.cache_ttl_secs));
        Self {
            settings,
            limiter,
            cache,
            session: Mutex::new(SessionSlot::default()),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Opens (or joins) the network session for a unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::Http`] if the `reqwest::Client` cannot be built.
    pub fn open_session(&self) -> Result<Session<'_>, DistributorError> {
        let mut slot = self.lock_slot();
        if slot.client.is_none() {
            slot.client = Some(self.build_client()?);
            tracing::debug!(user_agent = %self.settings.user_agent, "opened distributor session");
        }
        slot.holders += 1;
        Ok(Session { http: self })
    }

    /// Returns `true` while at least one [`Session`] guard is alive.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.lock_slot().client.is_some()
    }

    /// Returns the live session's client.
    ///
    /// # Errors
    ///
    /// Returns [`DistributorError::ClientNotInitialized`] outside a session.
    pub fn session_client(&self) -> Result<Client, DistributorError> {
        self.lock_slot()
            .client
            .clone()
            .ok_or(DistributorError::ClientNotInitialized)
    }

    /// Executes `request`: cache lookup, rate-limiter admission, HTTP call,
    /// status check, JSON decode, cache fill.
    ///
    /// # Errors
    ///
    /// - [`DistributorError::ClientNotInitialized`] outside a session.
    /// - [`DistributorError::RateLimited`] on HTTP 429.
    /// - [`DistributorError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`DistributorError::Http`] on network failure or timeout.
    /// - [`DistributorError::Deserialize`] if the body is not JSON.
    pub async fn request(&self, request: ApiRequest) -> Result<serde_json::Value, DistributorError> {
        let key = request.use_cache.then(|| {
            cache_key(
                &request.method,
                &request.url,
                &request.query,
                request.body.as_ref(),
            )
        });

        if let Some(key) = &key {
            if let Some(hit) = self.cache.get(key).await {
                tracing::debug!(url = %request.url, "distributor cache hit");
                return Ok(hit);
            }
        }

        let client = self.session_client()?;
        self.limiter.acquire().await;

        let mut builder = client.request(request.method.clone(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DistributorError::RateLimited {
                url: request.url,
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(DistributorError::UnexpectedStatus {
                status: status.as_u16(),
                url: request.url,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| DistributorError::Deserialize {
                context: request.url.clone(),
                source: e,
            })?;

        if let Some(key) = key {
            self.cache.set(key, value.clone(), None).await;
        }

        Ok(value)
    }

    fn build_client(&self) -> Result<Client, DistributorError> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(0)
            .user_agent(&self.settings.user_agent)
            .build()?)
    }

    fn release_session(&self) {
        let mut slot = self.lock_slot();
        slot.holders = slot.holders.saturating_sub(1);
        if slot.holders == 0 && slot.client.take().is_some() {
            tracing::debug!("closed distributor session");
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, SessionSlot> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
