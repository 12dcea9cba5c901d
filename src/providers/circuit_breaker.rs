//! Circuit breaker for the upstream RPC endpoint.
//!
//! Two states, CLOSED and OPEN. A rate-limit signal opens the breaker for a
//! cooldown window; while open every gate check answers "blocked" without
//! touching the network. There is no timer: the first gate check made after
//! the window has passed closes the breaker as a side effect.
//!
//! All state changes happen under one mutex, so concurrent callers never see
//! a half-open hybrid. Two racing trips simply leave the later `open_until`.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::utils::constants::DEFAULT_BREAKER_COOLDOWN_SECS;

/// State of the breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitState {
    /// Requests flow normally
    Closed,
    /// Requests are suppressed until the cooldown passes
    Open,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
        }
    }
}

#[derive(Debug)]
struct BreakerState {
    is_open: bool,
    open_until: Option<Instant>,
}

/// Point-in-time view for stats reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub is_open: bool,
    pub remaining: Duration,
}

/// Process-wide upstream gate shared by every resolution
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    cooldown: Duration,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_BREAKER_COOLDOWN_SECS))
    }
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            state: Mutex::new(BreakerState {
                is_open: false,
                open_until: None,
            }),
            cooldown,
        }
    }

    /// Gate check. Returns true while calls must be suppressed.
    ///
    /// The first check at or after `open_until` closes the breaker.
    pub fn is_blocked(&self) -> bool {
        let mut state = self.state.lock();
        if !state.is_open {
            return false;
        }

        let now = Instant::now();
        match state.open_until {
            Some(until) if now < until => true,
            _ => {
                state.is_open = false;
                state.open_until = None;
                info!("🔄 Circuit breaker reset, upstream calls resume");
                false
            }
        }
    }

    /// Open the breaker for one cooldown window starting now
    pub fn trip(&self) {
        let until = Instant::now() + self.cooldown;
        let mut state = self.state.lock();
        state.is_open = true;
        state.open_until = Some(until);
        warn!(
            cooldown_secs = self.cooldown.as_secs(),
            "⚠️ Upstream rate limited, circuit breaker open"
        );
    }

    /// Current state without triggering a transition
    pub fn state(&self) -> CircuitState {
        if self.snapshot().is_open {
            CircuitState::Open
        } else {
            CircuitState::Closed
        }
    }

    /// Read-only view. An expired window reports as closed, but the actual
    /// transition is left to the next gate check.
    pub fn snapshot(&self) -> BreakerSnapshot {
        let state = self.state.lock();
        let remaining = match (state.is_open, state.open_until) {
            (true, Some(until)) => until.saturating_duration_since(Instant::now()),
            _ => Duration::ZERO,
        };
        BreakerSnapshot {
            is_open: state.is_open && !remaining.is_zero(),
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_closed() {
        let breaker = CircuitBreaker::default();
        assert!(!breaker.is_blocked());
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.snapshot().remaining, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trip_blocks_until_cooldown_passes() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60));
        breaker.trip();

        assert!(breaker.is_blocked());
        assert_eq!(breaker.state(), CircuitState::Open);
        assert_eq!(breaker.snapshot().remaining, Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(breaker.is_blocked());
        assert_eq!(breaker.snapshot().remaining, Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!breaker.is_blocked());
        assert_eq!(breaker.state(), CircuitState::Closed);
        // Closed for good, not just for one check
        assert!(!breaker.is_blocked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_window_reports_closed_before_gate_check() {
        let breaker = CircuitBreaker::new(Duration::from_secs(5));
        breaker.trip();
        tokio::time::advance(Duration::from_secs(6)).await;

        let snapshot = breaker.snapshot();
        assert!(!snapshot.is_open);
        assert_eq!(snapshot.remaining, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrip_extends_window() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60));
        breaker.trip();
        tokio::time::advance(Duration::from_secs(30)).await;
        breaker.trip();

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(breaker.is_blocked());

        tokio::time::advance(Duration::from_secs(15)).await;
        assert!(!breaker.is_blocked());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_trips_leave_consistent_state() {
        let breaker = Arc::new(CircuitBreaker::new(Duration::from_secs(60)));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let breaker = breaker.clone();
                tokio::spawn(async move {
                    if i % 2 == 0 {
                        breaker.trip();
                    }
                    breaker.is_blocked()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = breaker.snapshot();
        assert!(snapshot.is_open);
        assert!(snapshot.remaining > Duration::from_secs(59));
        assert!(breaker.is_blocked());
    }
}
