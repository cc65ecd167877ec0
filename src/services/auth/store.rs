use std::{future::Future, pin::Pin};

use sha2::{Digest, Sha256};

use super::Credential;

/// Lookup result:
/// - `Ok(Some(principal))`: known key
/// - `Ok(None)`: unknown key
/// - `Err(_)`: store failure (treat as fail-closed)
pub trait ApiKeyStore: Send + Sync {
    fn lookup<'a>(
        &'a self,
        key: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StoreError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("api key store unavailable: {0}")]
    Unavailable(String),
}

struct Entry {
    principal: String,
    digest: [u8; 32],
}

/// Keys configured at startup (`API_KEYS`). Only SHA-256 digests are kept in memory.
pub struct InMemoryApiKeyStore {
    entries: Vec<Entry>,
}

impl InMemoryApiKeyStore {
    pub fn from_entries<I, P, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, K)>,
        P: Into<String>,
        K: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(principal, key)| Entry {
                principal: principal.into(),
                digest: digest(key.as_ref()),
            })
            .collect();

        Self { entries }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn find(&self, key: &str) -> Option<&str> {
        let presented = digest(key);
        // 全エントリを走査する (早期 return しない)
        let mut found = None;
        for entry in &self.entries {
            if constant_time_eq(&entry.digest, &presented) && found.is_none() {
                found = Some(entry.principal.as_str());
            }
        }
        found
    }
}

impl ApiKeyStore for InMemoryApiKeyStore {
    fn lookup<'a>(
        &'a self,
        key: &'a Credential,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StoreError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.find(key.as_str()).map(str::to_owned)) })
    }
}

fn digest(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}

/// Compares two digests without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryApiKeyStore {
        InMemoryApiKeyStore::from_entries([("alice", "key-alice"), ("bob", "key-bob")])
    }

    #[tokio::test]
    async fn known_key_resolves_to_principal() {
        let store = store();
        let principal = store.lookup(&Credential::from("key-bob")).await.unwrap();
        assert_eq!(principal.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn unknown_key_resolves_to_none() {
        let store = store();
        let principal = store.lookup(&Credential::from("key-carol")).await.unwrap();
        assert_eq!(principal, None);
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let store = store();
        assert_eq!(store.lookup(&Credential::from("key-alic")).await.unwrap(), None);
        assert_eq!(store.lookup(&Credential::from("KEY-ALICE")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_store_knows_nothing() {
        let store = InMemoryApiKeyStore::from_entries(Vec::<(String, String)>::new());
        assert_eq!(store.len(), 0);
        assert_eq!(store.lookup(&Credential::from("anything")).await.unwrap(), None);
    }

    #[test]
    fn digest_comparison() {
        assert!(constant_time_eq(&digest("a"), &digest("a")));
        assert!(!constant_time_eq(&digest("a"), &digest("b")));
    }
}
