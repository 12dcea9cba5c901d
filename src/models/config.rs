//! Resolver configuration
//!
//! Defaults come from utils/constants.rs. Environment variables override them:
//! - `SUI_RPC_URL`
//! - `SUI_RPC_TIMEOUT_MS`
//! - `SUI_CACHE_TTL_SECS`
//! - `SUI_BREAKER_COOLDOWN_SECS`
//! - `SUI_BATCH_CONCURRENCY`

use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_BREAKER_COOLDOWN_SECS, DEFAULT_CACHE_TTL_SECS,
    DEFAULT_RPC_TIMEOUT_MS, DEFAULT_RPC_URL,
};

pub const ENV_RPC_URL: &str = "SUI_RPC_URL";
pub const ENV_RPC_TIMEOUT_MS: &str = "SUI_RPC_TIMEOUT_MS";
pub const ENV_CACHE_TTL_SECS: &str = "SUI_CACHE_TTL_SECS";
pub const ENV_BREAKER_COOLDOWN_SECS: &str = "SUI_BREAKER_COOLDOWN_SECS";
pub const ENV_BATCH_CONCURRENCY: &str = "SUI_BATCH_CONCURRENCY";

/// Runtime knobs for the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    pub cache_ttl: Duration,
    pub breaker_cooldown: Duration,
    /// Maximum in-flight RPC calls during batch resolution
    pub batch_concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            breaker_cooldown: Duration::from_secs(DEFAULT_BREAKER_COOLDOWN_SECS),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl ResolverConfig {
    /// Load from process environment
    pub fn from_env() -> AppResult<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        info!(
            timeout_ms = config.rpc_timeout.as_millis() as u64,
            cache_ttl_secs = config.cache_ttl.as_secs(),
            cooldown_secs = config.breaker_cooldown.as_secs(),
            concurrency = config.batch_concurrency,
            "⚙️ Resolver config loaded"
        );
        Ok(config)
    }

    /// Load from an arbitrary key lookup (empty values count as unset)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let rpc_url = match get(ENV_RPC_URL) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) => return Err(AppError::invalid_config(ENV_RPC_URL, &url)),
            None => defaults.rpc_url,
        };

        Ok(Self {
            rpc_url,
            rpc_timeout: parse_positive::<u64>(ENV_RPC_TIMEOUT_MS, get(ENV_RPC_TIMEOUT_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.rpc_timeout),
            cache_ttl: parse_positive::<u64>(ENV_CACHE_TTL_SECS, get(ENV_CACHE_TTL_SECS))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            breaker_cooldown: parse_positive::<u64>(
                ENV_BREAKER_COOLDOWN_SECS,
                get(ENV_BREAKER_COOLDOWN_SECS),
            )?
            .map(Duration::from_secs)
            .unwrap_or(defaults.breaker_cooldown),
            batch_concurrency: parse_positive::<usize>(
                ENV_BATCH_CONCURRENCY,
                get(ENV_BATCH_CONCURRENCY),
            )?
            .unwrap_or(defaults.batch_concurrency),
        })
    }
}

/// Parse an optional numeric value that must be greater than zero
fn parse_positive<T>(key: &str, raw: Option<String>) -> AppResult<Option<T>>
where
    T: FromStr + Default + PartialEq,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) if value != T::default() => Ok(Some(value)),
        _ => Err(AppError::invalid_config(key, &raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.rpc_url, "https://fullnode.mainnet.sui.io:443");
        assert_eq!(config.rpc_timeout, Duration::from_millis(3000));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.breaker_cooldown, Duration::from_secs(60));
        assert_eq!(config.batch_concurrency, 5);

        assert_eq!(ResolverConfig::from_lookup(lookup(&[])).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let config = ResolverConfig::from_lookup(lookup(&[
            ("SUI_RPC_URL", "https://fullnode.testnet.sui.io:443"),
            ("SUI_RPC_TIMEOUT_MS", "1500"),
            ("SUI_CACHE_TTL_SECS", "30"),
            ("SUI_BREAKER_COOLDOWN_SECS", " 10 "),
            ("SUI_BATCH_CONCURRENCY", "2"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "https://fullnode.testnet.sui.io:443");
        assert_eq!(config.rpc_timeout, Duration::from_millis(1500));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.breaker_cooldown, Duration::from_secs(10));
        assert_eq!(config.batch_concurrency, 2);
    }

    #[test]
    fn test_empty_value_falls_back_to_default() {
        let config = ResolverConfig::from_lookup(lookup(&[("SUI_RPC_TIMEOUT_MS", "")])).unwrap();
        assert_eq!(config.rpc_timeout, Duration::from_millis(3000));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (key, value) in [
            ("SUI_RPC_TIMEOUT_MS", "soon"),
            ("SUI_CACHE_TTL_SECS", "0"),
            ("SUI_BATCH_CONCURRENCY", "-1"),
            ("SUI_RPC_URL", "fullnode.mainnet.sui.io"),
        ] {
            let err = ResolverConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert_eq!(err.code, ErrorCode::ConfigInvalidValue, "{}={}", key, value);
            assert!(err.message.contains(key));
        }
    }
}
