//! Utils Module - Helper Functions & Shared Utilities
//!
//! Address normalization, the profile cache and shared constants.

pub mod address;
pub mod cache;
pub mod constants;

pub use address::*;
pub use cache::*;
pub use constants::*;
