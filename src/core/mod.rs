//! Core Module - Trust Resolution Logic
//!
//! Whitelist lookups, type inference, fake-coin heuristics and the
//! orchestrator that ties them to the RPC client and the cache.

pub mod fake_detector;
pub mod inference;
pub mod resolver;
pub mod whitelist;

pub use fake_detector::{detect, FakeVerdict, PhishingRule, PHISHING_RULES};
pub use inference::{infer, SubType, TypeInference};
pub use resolver::Resolver;
