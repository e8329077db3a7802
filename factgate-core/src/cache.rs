//! Size-1 TTL cache for the most recently fetched fact
//!
//! Holds one fact plus its fetch time and decides whether a cached value is
//! still fresh or a refresh must be attempted. Refreshes are single-flight:
//! the entry lock is never held across the network call; a separate flight
//! lock serializes refresh attempts so concurrent stale hits wait for the
//! one in-flight fetch and then read its committed result.

use crate::error::FetchError;
use crate::model::Fact;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Default)]
struct CacheEntry {
    fact: Option<Fact>,
    fetched_at: Option<Instant>,
}

/// TTL cache in front of the upstream pipeline.
///
/// `fetched_at` only ever advances: it is overwritten exclusively by a
/// later successful refresh, never by a failed one.
pub struct FactCache {
    ttl: Duration,
    entry: Mutex<CacheEntry>,
    flight: tokio::sync::Mutex<()>,
}

impl FactCache {
    /// Create an empty cache with freshness window `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(CacheEntry::default()),
            flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Return the cached fact if fresh, otherwise run `refresh` (at most
    /// once per call) and commit its result.
    ///
    /// On refresh failure the entry is left untouched: the error propagates
    /// unchanged in kind, the old fact stays available for the next call's
    /// freshness check, and `fetched_at` does not move, so the very next
    /// stale call retries immediately (no negative caching).
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Fact, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Fact, FetchError>>,
    {
        if let Some(fact) = self.fresh_fact() {
            log::debug!("cache hit, serving fact fetched within the freshness window");
            return Ok(fact);
        }

        let _flight = self.flight.lock().await;

        // A concurrent refresher may have committed while we waited.
        if let Some(fact) = self.fresh_fact() {
            log::debug!("cache refreshed by a concurrent caller, sharing its result");
            return Ok(fact);
        }

        let fact = refresh().await?;
        self.commit(fact.clone());
        log::info!("cache refreshed with a new fact ({} chars)", fact.length);
        Ok(fact)
    }

    fn fresh_fact(&self) -> Option<Fact> {
        let entry = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        let fetched_at = entry.fetched_at?;
        if fetched_at.elapsed() <= self.ttl {
            entry.fact.clone()
        } else {
            None
        }
    }

    fn commit(&self, fact: Fact) {
        let mut entry = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        entry.fact = Some(fact);
        entry.fetched_at = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fact(text: &str) -> Fact {
        Fact { text: text.to_string(), length: text.len() as u64 }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_hit_skips_refresh() {
        let cache = FactCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        for _ in 0..5 {
            let got = cache
                .get_or_refresh(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(fact("one"))
                })
                .await
                .unwrap();
            assert_eq!(got.text, "one");
        }

        // Five calls within the window, one upstream invocation
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_triggers_refresh() {
        let cache = FactCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let got = cache
            .get_or_refresh(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(fact("old"))
            })
            .await
            .unwrap();
        assert_eq!(got.text, "old");

        tokio::time::advance(Duration::from_secs(61)).await;

        let got = cache
            .get_or_refresh(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(fact("new"))
            })
            .await
            .unwrap();
        assert_eq!(got.text, "new");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_leaves_entry_untouched() {
        let cache = FactCache::new(Duration::from_secs(60));
        cache.get_or_refresh(|| async { Ok(fact("kept")) }).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        // Two back-to-back failures: both must reach the refresh fn
        // (no negative caching), and neither may clear the old fact.
        let failures = AtomicUsize::new(0);
        let failures = &failures;
        for _ in 0..2 {
            let err = cache
                .get_or_refresh(move || async move {
                    failures.fetch_add(1, Ordering::SeqCst);
                    Err(FetchError::Transport("connect refused".to_string()))
                })
                .await
                .unwrap_err();
            assert_eq!(err, FetchError::Transport("connect refused".to_string()));
        }
        assert_eq!(failures.load(Ordering::SeqCst), 2);

        // A later success commits over the preserved entry
        let got = cache.get_or_refresh(|| async { Ok(fact("recovered")) }).await.unwrap();
        assert_eq!(got.text, "recovered");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_error_passes_through() {
        let cache = FactCache::new(Duration::from_secs(60));
        let err = cache
            .get_or_refresh(|| async { Err::<Fact, _>(FetchError::RateLimited) })
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_stale_hits_share_one_flight() {
        let cache = Arc::new(FactCache::new(Duration::from_secs(60)));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let high_water = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let in_flight = in_flight.clone();
            let high_water = high_water.clone();
            let calls = calls.clone();
            tasks.push(tokio::spawn(async move {
                cache
                    .get_or_refresh(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        high_water.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                        Ok(fact("shared"))
                    })
                    .await
                    .unwrap()
            }));
        }

        for task in tasks {
            assert_eq!(task.await.unwrap().text, "shared");
        }

        // Never more than one fetch in flight, and the waiters shared the
        // committed result instead of fetching again.
        assert_eq!(high_water.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
