/*
 * Responsibility
 * - Authorization ヘッダから `ApiKey <token>` 形式の credential を取り出す
 * - 形式チェックのみ (キーの照合は store 側、HTTP への変換は middleware 側)
 *
 * Wire contract:
 *   Authorization: ApiKey<one-or-more whitespace><token>
 * それ以外 (Bearer, Basic, token なし, 余分なフィールド) は malformed。
 */
use std::fmt;

use axum::http::{HeaderMap, header};

pub const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyError {
    #[error("no authorization header included")]
    NoAuthHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
}

/// API key as presented by the client. Opaque to this module.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Debug for Credential {
    // ログに生のキーを出さない
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Extracts the API key from `Authorization: ApiKey <token>`.
///
/// - header missing or `""` → [`ApiKeyError::NoAuthHeader`]
/// - anything that is not exactly the scheme followed by one token → [`ApiKeyError::MalformedHeader`]
///
/// Runs of whitespace between the scheme and the token are collapsed.
pub fn extract_api_key(headers: &HeaderMap) -> Result<Credential, ApiKeyError> {
    let value = match headers.get(header::AUTHORIZATION) {
        None => return Err(ApiKeyError::NoAuthHeader),
        Some(v) if v.is_empty() => return Err(ApiKeyError::NoAuthHeader),
        Some(v) => v.to_str().map_err(|_| ApiKeyError::MalformedHeader)?,
    };

    let mut fields = value.split_whitespace();

    let (Some(scheme), Some(token)) = (fields.next(), fields.next()) else {
        return Err(ApiKeyError::MalformedHeader);
    };
    if scheme != API_KEY_SCHEME || fields.next().is_some() {
        return Err(ApiKeyError::MalformedHeader);
    }

    Ok(Credential(token.to_owned()))
}
