//! Providers Module - Upstream Access
//!
//! Sui JSON-RPC client and the circuit breaker that guards it.

pub mod circuit_breaker;
pub mod rpc;

pub use circuit_breaker::*;
pub use rpc::*;
