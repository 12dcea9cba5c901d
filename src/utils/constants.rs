//! Constants Module - Single Source of Truth
//!
//! Endpoints, timing defaults and the official whitelist tables used across
//! the crate. Other modules read these values; none of them hardcode their own.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "SuiTruth";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "SuiTruth/0.1.0";

// ============================================
// RPC CONSTANTS
// ============================================

/// Sui mainnet fullnode JSON-RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://fullnode.mainnet.sui.io:443";

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Hard deadline for a single RPC call (milliseconds)
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 3_000;

/// Object lookup method
pub const METHOD_GET_OBJECT: &str = "sui_getObject";

/// SuiNS name lookup method
pub const METHOD_RESOLVE_NAME: &str = "suix_resolveNameServiceAddress";

/// Domain suffix handled by the name service
pub const SUINS_SUFFIX: &str = ".sui";

// ============================================
// CACHE / BREAKER / BATCH CONSTANTS
// ============================================

/// Default profile cache TTL (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// How long the breaker stays open after a rate-limit signal (seconds)
pub const DEFAULT_BREAKER_COOLDOWN_SECS: u64 = 60;

/// Maximum in-flight RPC calls during batch resolution
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Maximum addresses accepted by one API batch request
pub const MAX_API_BATCH_SIZE: usize = 100;

/// Maximum requests the API serves at once
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

// ============================================
// DEGRADED PROFILE MESSAGES
// ============================================

pub const MSG_INVALID_INPUT: &str = "invalid input";
pub const MSG_CIRCUIT_OPEN: &str = "circuit breaker open";

// ============================================
// OFFICIAL PACKAGES - Single Source of Truth
// ============================================

/// Whitelisted package
#[derive(Debug, Clone, Copy)]
pub struct PackageInfo {
    /// Canonical (shortest) address form
    pub address: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub is_system_package: bool,
}

/// Official Sui system packages and well-known protocol packages
pub static OFFICIAL_PACKAGES: [PackageInfo; 6] = [
    PackageInfo {
        address: "0x1",
        name: "Move Stdlib",
        description: "Move language standard library",
        is_system_package: true,
    },
    PackageInfo {
        address: "0x2",
        name: "Sui Framework",
        description: "Core Sui logic (Coin, Object, Transfer ...)",
        is_system_package: true,
    },
    PackageInfo {
        address: "0x3",
        name: "Sui System",
        description: "Staking and validator logic",
        is_system_package: true,
    },
    PackageInfo {
        address: "0xdee9",
        name: "DeepBook",
        description: "Official central limit order book",
        is_system_package: true,
    },
    PackageInfo {
        address: "0xd22b24490e0bae52676651b4f56660a5ff8022a2576e0089f79b3c88d44e08f0",
        name: "SuiNS",
        description: "Sui name service",
        is_system_package: false,
    },
    PackageInfo {
        address: "0x5306f64e312b581766351c07af79c72fcb1cd25147157fdc2f8ad76de9a3fb6a",
        name: "Wormhole Bridge",
        description: "Official cross-chain bridge",
        is_system_package: false,
    },
];

// ============================================
// OFFICIAL COINS - Single Source of Truth
// ============================================

/// Whitelisted coin type
#[derive(Debug, Clone, Copy)]
pub struct OfficialCoin {
    pub symbol: &'static str,
    /// Full registered coin type string
    pub coin_type: &'static str,
    pub decimals: u8,
    pub description: &'static str,
}

/// Official coin types (anti-counterfeit reference data)
pub static OFFICIAL_COINS: [OfficialCoin; 3] = [
    OfficialCoin {
        symbol: "SUI",
        coin_type: "0x2::sui::SUI",
        decimals: 9,
        description: "Native Sui token",
    },
    OfficialCoin {
        symbol: "USDC",
        coin_type: "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC",
        decimals: 6,
        description: "Circle native USDC",
    },
    OfficialCoin {
        symbol: "USDT",
        coin_type: "0xc060006111016b8a020ad5b338349841437adb20874067361659545ed8199e06::coin::COIN",
        decimals: 6,
        description: "Tether USDT (Wormhole bridged)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_addresses_are_canonical() {
        for pkg in OFFICIAL_PACKAGES {
            assert_eq!(pkg.address, pkg.address.to_lowercase());
            assert!(pkg.address.starts_with("0x"));
            assert!(!pkg.address[2..].starts_with('0'), "{} is padded", pkg.address);
        }
    }

    #[test]
    fn test_coin_symbols_unique() {
        let mut symbols: Vec<_> = OFFICIAL_COINS.iter().map(|c| c.symbol).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), OFFICIAL_COINS.len());
    }
}
