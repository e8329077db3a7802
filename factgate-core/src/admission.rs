//! Token-bucket admission control for upstream calls
//!
//! Bounds how often the upstream client may be invoked, independent of
//! cache state. Denial is immediate and non-blocking; the caller decides
//! what a denial looks like to its user.

use std::sync::Mutex;
use tokio::time::Instant;

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// A token bucket: `capacity` permits, refilled at `refill_rate` permits
/// per second, one permit deducted per admitted call.
///
/// Invariant: `0 <= tokens <= capacity` at all times. Refill and deduction
/// happen as one indivisible step under the lock, so the invariant holds
/// under concurrent callers.
pub struct TokenBucket {
    capacity: u32,
    refill_rate: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Create a bucket that starts full.
    pub fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill_rate,
            state: Mutex::new(BucketState {
                tokens: f64::from(capacity),
                last_refill: Instant::now(),
            }),
        }
    }

    /// Refill for elapsed wall-clock time, then try to deduct one token.
    ///
    /// Returns `true` and deducts iff at least one token is available after
    /// the refill; returns `false` with no deduction otherwise. For a fixed
    /// capacity and rate, the admit/deny sequence is fully determined by the
    /// call timestamps.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.refill_rate).min(f64::from(self.capacity));
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            log::debug!(
                "admission denied: {:.2} tokens available (capacity {})",
                state.tokens,
                self.capacity
            );
            false
        }
    }
}
