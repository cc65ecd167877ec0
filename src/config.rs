/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, CORS 許可, API_KEYS)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One `principal:key` pair from `API_KEYS`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyEntry {
    pub principal: String,
    pub key: String,
}

impl fmt::Debug for ApiKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyEntry")
            .field("principal", &self.principal)
            .field("key", &"<redacted>")
            .finish()
    }
}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub api_keys: Vec<ApiKeyEntry>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any `name → value` source (`from_env` passes `std::env::var`).
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = var("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(&var("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
        let cors_allowed_origins = split_list(&cors_allowed_origins)
            .map(str::to_string)
            .collect::<Vec<_>>();

        let api_keys = parse_api_keys(&var("API_KEYS").ok_or(ConfigError::Missing("API_KEYS"))?)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            api_keys,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parses `API_KEYS=alice:key1,bob:key2`.
///
/// Keys are sent as a single whitespace-free token after `ApiKey`, so a key
/// containing whitespace could never match and is rejected here. A key must
/// map to exactly one principal.
pub fn parse_api_keys(raw: &str) -> Result<Vec<ApiKeyEntry>, ConfigError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for pair in split_list(raw) {
        let (principal, key) = pair
            .split_once(':')
            .ok_or(ConfigError::Invalid("API_KEYS"))?;
        let (principal, key) = (principal.trim(), key.trim());

        if principal.is_empty() || key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid("API_KEYS"));
        }
        if !seen.insert(key) {
            return Err(ConfigError::Invalid("API_KEYS"));
        }

        entries.push(ApiKeyEntry {
            principal: principal.to_string(),
            key: key.to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_principal_key_pairs() {
        let entries = parse_api_keys("alice:key-1, bob:key-2 ,").unwrap();
        assert_eq!(
            entries,
            vec![
                ApiKeyEntry {
                    principal: "alice".into(),
                    key: "key-1".into()
                },
                ApiKeyEntry {
                    principal: "bob".into(),
                    key: "key-2".into()
                },
            ]
        );
    }

    #[test]
    fn key_may_contain_colons() {
        let entries = parse_api_keys("svc:a:b:c").unwrap();
        assert_eq!(entries[0].principal, "svc");
        assert_eq!(entries[0].key, "a:b:c");
    }

    #[test]
    fn empty_list_is_allowed() {
        assert!(parse_api_keys("").unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_entries() {
        for raw in [
            "alice",
            ":key",
            "alice:",
            "alice:has space",
            "alice:shared,bob:shared",
            "alice:same,alice:same",
        ] {
            assert_eq!(
                parse_api_keys(raw),
                Err(ConfigError::Invalid("API_KEYS")),
                "{raw}"
            );
        }
    }

    #[test]
    fn debug_hides_key() {
        let entries = parse_api_keys("alice:top-secret").unwrap();
        assert!(!format!("{entries:?}").contains("top-secret"));
    }

    #[test]
    fn same_principal_may_hold_several_keys() {
        let entries = parse_api_keys("alice:key-1,alice:key-2").unwrap();
        assert_eq!(entries.len(), 2);
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn missing_api_keys_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "8080")])).err();
        assert_eq!(err, Some(ConfigError::Missing("API_KEYS")));
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "abc"), ("API_KEYS", "alice:k")])).unwrap();
        assert_eq!(config.addr.port(), 3000);
    }

    #[test]
    fn reads_every_setting_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("API_KEYS", "alice:k"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Production);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.api_keys[0].principal, "alice");
    }

    #[test]
    fn app_env_parsing() {
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
    }
}
