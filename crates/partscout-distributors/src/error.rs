use partscout_core::Distributor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributorError {
    /// Transport failure. The request URL is stripped, since it may carry
    /// an API key in its query string.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The distributor answered 2xx but reported an application-level error.
    #[error("distributor API error: {0}")]
    Api(String),

    /// OAuth2 token exchange failed or was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A request was issued with no open session.
    #[error("client not initialized: open a session before issuing requests")]
    ClientNotInitialized,

    #[error("{distributor} client requires {what}")]
    MissingCredentials {
        distributor: Distributor,
        what: &'static str,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("token store error: {0}")]
    TokenStore(String),
}

impl From<reqwest::Error> for DistributorError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.without_url())
    }
}
