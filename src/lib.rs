//! SuiTruth Library
//!
//! Address trust resolution for the Sui network. Turns an address or coin
//! type string into a verdict usable for visual annotation:
//! - Official package and coin whitelist (no network)
//! - Object type inference over `sui_getObject`
//! - Fake coin detection (symbol impersonation, phishing patterns)
//! - TTL profile cache and a rate-limit circuit breaker in front of the RPC

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::resolver::Resolver;
pub use crate::core::fake_detector::{FakeVerdict, PhishingRule};
pub use crate::core::inference::{SubType, TypeInference};
pub use models::config::ResolverConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{
    AddressProfile, AddressType, CoinInfo, Confidence, FakeReason, ResolverStats, RiskLevel,
    WhitelistMetadata,
};
pub use providers::circuit_breaker::{BreakerSnapshot, CircuitBreaker, CircuitState};
pub use providers::rpc::{HttpReply, HttpTransport, RpcClient, RpcError, RpcFailure, RpcResult, RpcTransport};
pub use utils::address::{canonical_type_tag, extract_addresses, is_valid_address_format, short_form};
pub use utils::cache::{CacheStats, ProfileCache};

/// Install the compact fmt subscriber used by both binaries.
/// Level comes from `RUST_LOG`, default `info`.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
