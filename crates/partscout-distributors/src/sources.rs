//! Chooses between live distributor clients and the offline fixture table.

use std::sync::Arc;

use partscout_core::{AppConfig, Distributor};

use crate::client::ClientSettings;
use crate::digikey::token::FileTokenStore;
use crate::digikey::DigiKeyClient;
use crate::error::DistributorError;
use crate::fixtures::FixtureSource;
use crate::mouser::MouserClient;
use crate::source::PartSource;

/// Builds the ordered source list for `config`.
///
/// Fixture sources for every distributor when fixture mode is forced or no
/// credentials are configured; otherwise one live client per distributor with
/// credentials, Mouser first.
///
/// # Errors
///
/// Returns [`DistributorError`] if a live client cannot be constructed.
pub fn build_sources(config: &AppConfig) -> Result<Vec<Arc<dyn PartSource>>, DistributorError> {
    if config.use_fixtures() {
        tracing::info!(forced = config.force_fixtures, "using fixture part data");
        return Ok(Distributor::ALL
            .into_iter()
            .map(|d| Arc::new(FixtureSource::new(d)) as Arc<dyn PartSource>)
            .collect());
    }

    let settings = ClientSettings::from_config(config);
    let mut sources: Vec<Arc<dyn PartSource>> = Vec::new();

    if let Some(api_key) = config.mouser_api_key.as_deref() {
        sources.push(Arc::new(MouserClient::new(api_key, settings.clone())?));
    }

    if let (Some(id), Some(secret)) = (
        config.digikey_client_id.as_deref(),
        config.digikey_client_secret.as_deref(),
    ) {
        let store = FileTokenStore::new(config.digikey_token_cache_path.clone());
        sources.push(Arc::new(
            DigiKeyClient::new(id, secret, settings)?.with_token_store(Arc::new(store)),
        ));
    }

    let names: Vec<&str> = sources.iter().map(|s| s.distributor().as_str()).collect();
    tracing::info!(sources = ?names, "using live distributor APIs");
    Ok(sources)
}
