//! Type definitions for SuiTruth
//! All core data structures for address trust resolution

use serde::{Deserialize, Serialize};

/// What kind of thing an address points at on chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    /// Plain wallet address (no on-chain object behind it)
    Account,
    /// Published Move package
    Package,
    /// On-chain object (coin, NFT, shared object ...)
    Object,
    /// Could not be classified
    Unknown,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Account => "ACCOUNT",
            AddressType::Package => "PACKAGE",
            AddressType::Object => "OBJECT",
            AddressType::Unknown => "UNKNOWN",
        }
    }
}

/// Risk level shown next to an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Official, whitelisted or verified
    Safe,
    /// Unknown but nothing suspicious found
    Neutral,
    /// Suspicious, not confirmed
    Suspicious,
    /// Confirmed malicious (fake coin, phishing object)
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Neutral => "NEUTRAL",
            RiskLevel::Suspicious => "SUSPICIOUS",
            RiskLevel::Danger => "DANGER",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "✅",
            RiskLevel::Neutral => "🛡️",
            RiskLevel::Suspicious => "⚠️",
            RiskLevel::Danger => "🚫",
        }
    }
}

/// How sure an RPC-derived classification is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Official coin metadata attached to a recognized coin object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub symbol: String,
    pub decimals: u8,
    pub registered_type: String,
}

/// Whitelist record exposed on whitelisted profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistMetadata {
    /// Canonical key the entry is registered under
    pub address: String,
    pub name: String,
    pub description: String,
    pub is_system_package: bool,
}

/// Why the fake-asset detector flagged an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FakeReason {
    /// Claims an official symbol but its type is not the registered one
    #[serde(rename_all = "camelCase")]
    Impersonation {
        claimed_symbol: String,
        actual_type: String,
        official_type: String,
    },
    /// Type string matches a known phishing pattern
    #[serde(rename_all = "camelCase")]
    PhishingPattern { pattern: String, actual_type: String },
}

impl FakeReason {
    pub fn description(&self) -> String {
        match self {
            FakeReason::Impersonation {
                claimed_symbol,
                actual_type,
                official_type,
            } => format!(
                "impersonates {} (actual type {}, official type {})",
                claimed_symbol, actual_type, official_type
            ),
            FakeReason::PhishingPattern { pattern, .. } => {
                format!("type name matches phishing pattern \"{}\"", pattern)
            }
        }
    }
}

/// Trust verdict for a single address or coin type.
///
/// Profiles are plain values: once built they are only cloned, never mutated
/// in place by the cache or the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProfile {
    pub address: String,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub is_contract: bool,
    pub is_whitelisted: bool,
    pub is_fake: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_info: Option<CoinInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WhitelistMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_details: Option<FakeReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddressProfile {
    /// Neutral, unclassified profile for an address
    pub fn new(address: impl Into<String>, address_type: AddressType) -> Self {
        Self {
            address: address.into(),
            address_type,
            risk_level: RiskLevel::Neutral,
            label: None,
            is_contract: false,
            is_whitelisted: false,
            is_fake: false,
            confidence: None,
            coin_info: None,
            metadata: None,
            fake_details: None,
            error: None,
        }
    }

    /// Degraded answer returned on any failure path (never cached)
    pub fn degraded(address: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(address, AddressType::Unknown)
        }
    }

    /// True when this is a degraded/default answer rather than a classification
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the profile may be stored in the profile cache
    pub fn is_cacheable(&self) -> bool {
        !self.is_whitelisted && !self.is_degraded()
    }

    /// One-line summary for logs and the CLI
    pub fn summary(&self) -> String {
        let mut output = format!(
            "{} {} | {} | {}",
            self.risk_level.emoji(),
            self.risk_level.as_str(),
            self.address_type.as_str(),
            self.address
        );
        if let Some(label) = &self.label {
            output.push_str(&format!(" | {}", label));
        }
        if let Some(error) = &self.error {
            output.push_str(&format!(" | error: {}", error));
        }
        output
    }
}

/// Combined cache and breaker statistics reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    pub hits: u64,
    pub misses: u64,
    pub ttl_secs: u64,
    pub breaker_open: bool,
    pub breaker_remaining_ms: u64,
}
