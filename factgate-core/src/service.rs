//! Access layer over the upstream fact provider
//!
//! Composition root for the protective pipeline: cache first, then
//! admission, then the upstream client. All state is owned here and
//! injected at construction; there are no ambient globals.

use crate::admission::TokenBucket;
use crate::cache::FactCache;
use crate::error::FetchError;
use crate::model::Fact;
use crate::upstream::FactSource;
use std::sync::Arc;

/// The single operation the HTTP boundary calls: `get_fact`.
///
/// A fresh cache hit never consumes a rate-limit token; a miss or stale
/// entry costs at most one token attempt; a denied admission surfaces as
/// [`FetchError::RateLimited`] without any network activity.
pub struct FactService {
    cache: FactCache,
    limiter: TokenBucket,
    source: Arc<dyn FactSource>,
}

impl FactService {
    pub fn new(cache: FactCache, limiter: TokenBucket, source: Arc<dyn FactSource>) -> Self {
        Self { cache, limiter, source }
    }

    /// Return the current fact, refreshing through the admission gate when
    /// the cached one is missing or stale.
    pub async fn get_fact(&self) -> Result<Fact, FetchError> {
        self.cache.get_or_refresh(|| self.admitted_fetch()).await
    }

    /// The refresh pipeline handed to the cache: admission first, then one
    /// upstream attempt. A denial never reaches the network.
    async fn admitted_fetch(&self) -> Result<Fact, FetchError> {
        if !self.limiter.try_acquire() {
            log::warn!("refresh denied by rate limiter");
            return Err(FetchError::RateLimited);
        }
        self.source.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubSource {
        calls: AtomicUsize,
        response: Result<Fact, FetchError>,
    }

    impl StubSource {
        fn new(response: Result<Fact, FetchError>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), response })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FactSource for StubSource {
        async fn fetch(&self) -> Result<Fact, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn fact(text: &str) -> Fact {
        Fact { text: text.to_string(), length: text.len() as u64 }
    }

    fn service(source: Arc<StubSource>, capacity: u32, refill: f64) -> FactService {
        FactService::new(
            FactCache::new(Duration::from_secs(60)),
            TokenBucket::new(capacity, refill),
            source,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_hit_consumes_no_token() {
        let source = StubSource::new(Ok(fact("cached")));
        let svc = service(source.clone(), 1, 0.001);

        // First call spends the only token and populates the cache
        assert_eq!(svc.get_fact().await.unwrap().text, "cached");

        // The bucket is empty, but fresh hits never reach the limiter
        for _ in 0..5 {
            assert_eq!(svc.get_fact().await.unwrap().text, "cached");
        }
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_admission_performs_no_network_call() {
        let source = StubSource::new(Ok(fact("only once")));
        let svc = service(source.clone(), 1, 0.001);

        svc.get_fact().await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        // Stale, and the bucket has barely refilled: denial before fetch
        let err = svc.get_fact().await.unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_surfaces_as_transport() {
        let source = StubSource::new(Err(FetchError::Transport("request timed out".to_string())));
        let svc = service(source.clone(), 2, 0.5);

        let err = svc.get_fact().await.unwrap_err();
        assert_eq!(err, FetchError::Transport("request timed out".to_string()));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_500_surfaces_as_protocol_with_status() {
        let source = StubSource::new(Err(FetchError::Protocol { status: 500 }));
        let svc = service(source.clone(), 2, 0.5);

        match svc.get_fact().await.unwrap_err() {
            FetchError::Protocol { status } => assert_eq!(status, 500),
            other => panic!("expected Protocol, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_body_surfaces_as_decode() {
        let source =
            StubSource::new(Err(FetchError::Decode("missing field `fact`".to_string())));
        let svc = service(source.clone(), 2, 0.5);

        assert!(matches!(svc.get_fact().await.unwrap_err(), FetchError::Decode(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_refresh_spends_one_token_per_attempt() {
        let source = StubSource::new(Ok(fact("fresh again")));
        let svc = service(source.clone(), 2, 0.5);

        svc.get_fact().await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        svc.get_fact().await.unwrap();

        // One fetch per stale refresh, none for the hits in between
        assert_eq!(source.calls(), 2);
    }
}
