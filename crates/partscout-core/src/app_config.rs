use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub mouser_api_key: Option<String>,
    pub digikey_client_id: Option<String>,
    pub digikey_client_secret: Option<String>,
    pub digikey_token_cache_path: PathBuf,
    /// Forces the static fixture data source even when credentials exist.
    pub force_fixtures: bool,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub requests_per_minute: u32,
    pub cache_ttl_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    #[must_use]
    pub fn has_mouser_credentials(&self) -> bool {
        self.mouser_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    #[must_use]
    pub fn has_digikey_credentials(&self) -> bool {
        self.digikey_client_id.as_deref().is_some_and(|k| !k.is_empty())
            && self
                .digikey_client_secret
                .as_deref()
                .is_some_and(|k| !k.is_empty())
    }

    /// `true` when lookups should be served from static fixtures: either
    /// forced, or no distributor has usable credentials.
    #[must_use]
    pub fn use_fixtures(&self) -> bool {
        self.force_fixtures || !(self.has_mouser_credentials() || self.has_digikey_credentials())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "mouser_api_key",
                &self.mouser_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("digikey_client_id", &self.digikey_client_id)
            .field(
                "digikey_client_secret",
                &self.digikey_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("digikey_token_cache_path", &self.digikey_token_cache_path)
            .field("force_fixtures", &self.force_fixtures)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
