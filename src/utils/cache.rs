//! High-Performance In-Memory Profile Cache
//!
//! Thread-safe TTL cache for resolved address profiles, built on DashMap so
//! concurrent resolutions never contend on a single lock.
//!
//! Features:
//! - TTL-based expiration (5 minutes default)
//! - Lazy eviction on read plus an explicit `prune_expired` sweep
//! - Address normalization (trim + lowercase)
//! - Hit/miss counters
//!
//! The cache never schedules its own sweeps; callers decide when to prune.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::models::types::AddressProfile;
use crate::utils::address::normalize_address;
use crate::utils::constants::DEFAULT_CACHE_TTL_SECS;

/// Cache entry with insertion timestamp for TTL validation
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub profile: AddressProfile,
    pub inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }

    fn remaining_ttl(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.inserted_at.elapsed())
    }
}

/// Profile cache keyed by normalized address
#[derive(Clone)]
pub struct ProfileCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileCache {
    /// Create cache with the default TTL (5 minutes)
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    /// Create cache with custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a live profile. Expired entries are evicted by this read.
    pub fn get(&self, address: &str) -> Option<AddressProfile> {
        let key = normalize_address(address)?;

        let expired = match self.store.get(&key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "✅ CACHE HIT: {} (TTL: {}s remaining)",
                    key,
                    entry.remaining_ttl(self.ttl).as_secs()
                );
                return Some(entry.profile.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            // Only drop it if nobody refreshed it since our read
            self.store.remove_if(&key, |_, entry| entry.is_expired(self.ttl));
            debug!("📭 CACHE MISS (expired): {}", key);
        } else {
            debug!("📭 CACHE MISS: {}", key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a profile, overwriting any existing entry
    pub fn put(&self, address: &str, profile: AddressProfile) {
        let Some(key) = normalize_address(address) else {
            return;
        };
        self.store.insert(
            key.clone(),
            CacheEntry {
                profile,
                inserted_at: Instant::now(),
            },
        );
        debug!("💾 CACHE SET: {} (TTL: {}s)", key, self.ttl.as_secs());
    }

    /// Drop every expired entry, returning how many were removed
    pub fn prune_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired(self.ttl));
        let removed = before.saturating_sub(self.store.len());
        if removed > 0 {
            info!("🧹 CACHE PRUNE: {} expired entries removed", removed);
        }
        removed
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.store.clear();
        info!("🗑️ CACHE CLEARED");
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Snapshot of entry counts and hit statistics
    pub fn stats(&self) -> CacheStats {
        let mut valid = 0;
        let mut expired = 0;
        for entry in self.store.iter() {
            if entry.is_expired(self.ttl) {
                expired += 1;
            } else {
                valid += 1;
            }
        }

        CacheStats {
            total: valid + expired,
            valid,
            expired,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    pub hits: u64,
    pub misses: u64,
    pub ttl_secs: u64,
}
