pub mod api_key;
pub mod factory;
pub mod store;

pub use api_key::{ApiKeyError, Credential, extract_api_key};
pub use factory::build_api_key_store;
pub use store::{ApiKeyStore, InMemoryApiKeyStore, StoreError};
