/// Factory: build the `ApiKeyStore` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{ApiKeyStore, InMemoryApiKeyStore};

pub fn build_api_key_store(config: &Config) -> Arc<dyn ApiKeyStore> {
    let store = InMemoryApiKeyStore::from_entries(
        config
            .api_keys
            .iter()
            .map(|entry| (entry.principal.clone(), entry.key.as_str())),
    );

    tracing::info!(keys = store.len(), "api key store loaded");

    Arc::new(store)
}
