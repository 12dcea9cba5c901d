//! Resolution Orchestrator
//!
//! Public entry points that compose the whole pipeline:
//!
//! ```text
//! normalize -> whitelist -> cache -> breaker gate -> RPC -> inference
//!           -> fake detection (coins only) -> cache write
//! ```
//!
//! Resolution never fails. Every failure path produces a degraded profile
//! (`UNKNOWN`, `NEUTRAL`, `error` set) that is never cached.

use futures_util::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fake_detector::{self, inner_coin_type};
use super::inference::{infer, is_absence, TypeInference};
use super::whitelist;
use crate::models::config::ResolverConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AddressProfile, AddressType, ResolverStats, RiskLevel};
use crate::providers::circuit_breaker::CircuitBreaker;
use crate::providers::rpc::{HttpTransport, RpcClient, RpcTransport};
use crate::utils::address::{is_type_string, normalize_address, normalize_value};
use crate::utils::cache::ProfileCache;
use crate::utils::constants::SUINS_SUFFIX;

/// Address trust resolver. Cheap to share behind an `Arc`.
pub struct Resolver {
    client: RpcClient,
    cache: ProfileCache,
    breaker: Arc<CircuitBreaker>,
    batch_concurrency: usize,
}

impl Resolver {
    /// Resolver talking HTTP to the configured fullnode
    pub fn new(config: &ResolverConfig) -> AppResult<Self> {
        let transport = HttpTransport::new(config.rpc_url.clone())?;
        info!("🌐 RPC endpoint: {}", transport.masked_url());
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Resolver over any transport, with fresh cache and breaker
    pub fn with_transport(transport: Arc<dyn RpcTransport>, config: &ResolverConfig) -> Self {
        let breaker = Arc::new(CircuitBreaker::new(config.breaker_cooldown));
        let client = RpcClient::new(transport, breaker.clone()).with_timeout(config.rpc_timeout);
        Self {
            client,
            cache: ProfileCache::with_ttl(config.cache_ttl),
            breaker,
            batch_concurrency: config.batch_concurrency.max(1),
        }
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    // ============================================
    // SINGLE RESOLUTION
    // ============================================

    /// Resolve one raw address or coin type string
    pub async fn resolve(&self, raw: &str) -> AddressProfile {
        match normalize_address(raw) {
            Some(address) => self.resolve_normalized(address).await,
            None => AddressProfile::degraded(raw.trim(), AppError::invalid_input().message),
        }
    }

    /// Resolve an untyped input; anything but a non-empty string is invalid
    pub async fn resolve_value(&self, raw: &serde_json::Value) -> AddressProfile {
        match normalize_value(raw) {
            Some(address) => self.resolve_normalized(address).await,
            None => AddressProfile::degraded("", AppError::invalid_input().message),
        }
    }

    async fn resolve_normalized(&self, address: String) -> AddressProfile {
        match self.resolve_local(&address) {
            Some(profile) => profile,
            None => self.resolve_remote(address).await,
        }
    }

    /// Answers that need no network: coin type strings, whitelist, cache
    fn resolve_local(&self, address: &str) -> Option<AddressProfile> {
        if is_type_string(address) {
            return Some(classify_type_string(address));
        }
        if let Some(profile) = whitelist::package_profile(address) {
            debug!("✅ Whitelisted: {}", address);
            return Some(profile);
        }
        self.cache.get(address)
    }

    /// Breaker gate, then one RPC call
    async fn resolve_remote(&self, address: String) -> AddressProfile {
        if self.breaker.is_blocked() {
            let err = AppError::circuit_open();
            debug!("⏸️ {} skipping RPC for {}", err, address);
            return AddressProfile::degraded(address, err.message);
        }

        let result = self.client.get_object(&address).await;
        if let Err(failure) = &result {
            if !is_absence(failure) {
                return AddressProfile::degraded(address, failure.message());
            }
        }

        let profile = build_profile(address, &infer(&result));
        if profile.is_cacheable() {
            self.cache.put(&profile.address, profile.clone());
        }
        debug!("🔍 {}", profile.summary());
        profile
    }

    // ============================================
    // BATCH RESOLUTION
    // ============================================

    /// Resolve many inputs. Invalid inputs are skipped, duplicates resolve
    /// once, and at most `batch_concurrency` RPC calls are in flight.
    pub async fn resolve_many<I, S>(&self, raws: I) -> HashMap<String, AddressProfile>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profiles = HashMap::new();
        let mut seen = HashSet::new();
        let mut misses = Vec::new();

        for raw in raws {
            let Some(address) = normalize_address(raw.as_ref()) else {
                continue;
            };
            if !seen.insert(address.clone()) {
                continue;
            }
            match self.resolve_local(&address) {
                Some(profile) => {
                    profiles.insert(address, profile);
                }
                None => misses.push(address),
            }
        }

        if misses.is_empty() {
            return profiles;
        }

        if self.breaker.is_blocked() {
            let err = AppError::circuit_open();
            warn!("⏸️ {} {} addresses degraded without RPC", err, misses.len());
            for address in misses {
                profiles.insert(address.clone(), AddressProfile::degraded(address, err.message.clone()));
            }
            return profiles;
        }

        info!(
            "📦 Batch: {} resolved locally, {} via RPC (concurrency {})",
            profiles.len(),
            misses.len(),
            self.batch_concurrency
        );

        let fetched: Vec<AddressProfile> = stream::iter(misses)
            .map(|address| self.resolve_remote(address))
            .buffer_unordered(self.batch_concurrency)
            .collect()
            .await;

        for profile in fetched {
            profiles.insert(profile.address.clone(), profile);
        }
        profiles
    }

    // ============================================
    // NAME SERVICE
    // ============================================

    /// Resolve a `.sui` name to its address. Never cached.
    pub async fn resolve_name(&self, domain: &str) -> Option<String> {
        let domain = domain.trim().to_lowercase();
        if domain.len() <= SUINS_SUFFIX.len() || !domain.ends_with(SUINS_SUFFIX) {
            return None;
        }
        if self.breaker.is_blocked() {
            debug!("⏸️ Breaker open, skipping name lookup for {}", domain);
            return None;
        }

        match self.client.resolve_name_service_address(&domain).await {
            Ok(address) => address.and_then(|a| normalize_address(&a)),
            Err(failure) => {
                warn!("⚠️ Name lookup failed for {}: {}", domain, failure);
                None
            }
        }
    }

    // ============================================
    // MAINTENANCE
    // ============================================

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn prune_expired_cache(&self) -> usize {
        self.cache.prune_expired()
    }

    pub fn stats(&self) -> ResolverStats {
        let cache = self.cache.stats();
        let breaker = self.breaker.snapshot();
        ResolverStats {
            total: cache.total,
            valid: cache.valid,
            expired: cache.expired,
            hits: cache.hits,
            misses: cache.misses,
            ttl_secs: cache.ttl_secs,
            breaker_open: breaker.is_open,
            breaker_remaining_ms: breaker.remaining.as_millis() as u64,
        }
    }
}

/// Turn an inference into a profile, running fake detection on coins
fn build_profile(address: String, inference: &TypeInference) -> AddressProfile {
    let mut profile = AddressProfile {
        confidence: Some(inference.confidence),
        label: Some(inference.reason.clone()),
        is_contract: inference.address_type == AddressType::Package,
        ..AddressProfile::new(address, inference.address_type)
    };

    if inference.is_coin() {
        if let Some(object_type) = &inference.object_type {
            apply_coin_verdict(&mut profile, object_type, inference.display_symbol.as_deref());
        }
    }
    profile
}

/// DANGER if flagged, SAFE with coin info if official, otherwise unchanged
fn apply_coin_verdict(profile: &mut AddressProfile, coin_type: &str, display_symbol: Option<&str>) {
    let verdict = fake_detector::detect(coin_type, display_symbol);
    if verdict.is_fake {
        profile.risk_level = RiskLevel::Danger;
        profile.is_fake = true;
        profile.label = verdict
            .reason
            .as_ref()
            .map(|reason| format!("⚠️ Fake coin: {}", reason.description()));
        profile.fake_details = verdict.reason;
        return;
    }

    if let Some(coin) = whitelist::coin_info(inner_coin_type(coin_type)) {
        profile.risk_level = RiskLevel::Safe;
        profile.label = Some(format!("Official {}", coin.symbol));
        profile.coin_info = Some(coin.into());
    }
}

/// Coin type strings are classified locally and never cached
fn classify_type_string(type_str: &str) -> AddressProfile {
    whitelist::coin_type_profile(type_str).unwrap_or_else(|| {
        let mut profile = AddressProfile::new(type_str, AddressType::Object);
        apply_coin_verdict(&mut profile, type_str, None);
        profile
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inference::SubType;
    use crate::models::types::Confidence;

    fn coin_inference(object_type: &str) -> TypeInference {
        TypeInference {
            address_type: AddressType::Object,
            confidence: Confidence::High,
            sub_type: Some(SubType::Coin),
            reason: "Object is a Coin".to_string(),
            object_type: Some(object_type.to_string()),
            display_symbol: None,
        }
    }

    #[test]
    fn test_official_coin_object_is_safe() {
        let profile = build_profile("0xabc".to_string(), &coin_inference("0x2::coin::Coin<0x2::sui::SUI>"));
        assert_eq!(profile.risk_level, RiskLevel::Safe);
        assert_eq!(profile.label.as_deref(), Some("Official SUI"));
        assert_eq!(profile.coin_info.unwrap().decimals, 9);
        // An official coin object is not a whitelisted address
        assert!(!profile.is_whitelisted);
    }

    #[test]
    fn test_fake_coin_object_is_danger() {
        let profile = build_profile("0xabc".to_string(), &coin_inference("0x2::coin::Coin<0xbad::usdc::USDC>"));
        assert_eq!(profile.risk_level, RiskLevel::Danger);
        assert!(profile.is_fake);
        assert!(profile.fake_details.is_some());
        assert!(profile.is_cacheable());
    }

    #[test]
    fn test_package_sets_contract_flag() {
        let inference = infer(&Ok(serde_json::json!({"data": {"type": "package"}})));
        let profile = build_profile("0xabc".to_string(), &inference);
        assert_eq!(profile.address_type, AddressType::Package);
        assert!(profile.is_contract);
        assert_eq!(profile.confidence, Some(Confidence::High));
    }

    #[test]
    fn test_type_string_classification() {
        let official = classify_type_string("0x2::sui::sui");
        assert!(official.is_whitelisted);
        assert_eq!(official.risk_level, RiskLevel::Safe);

        let fake = classify_type_string("0xbad::usdc::usdc");
        assert_eq!(fake.risk_level, RiskLevel::Danger);
        assert_eq!(fake.address_type, AddressType::Object);

        let plain = classify_type_string("0xabc::cetus::cetus");
        assert_eq!(plain.risk_level, RiskLevel::Neutral);
        assert!(!plain.is_fake);
    }
}
