//! Factgate - Core
//!
//! A single-endpoint profile service with a protective access layer in
//! front of an unreliable, rate-limited upstream fact provider.
//!
//! # Architecture
//!
//! The interesting part is the pipeline behind [`service::FactService`]:
//!
//! - [`cache`] - size-1 TTL cache with single-flight refresh
//! - [`admission`] - token-bucket bound on upstream call rate
//! - [`upstream`] - one bounded-time HTTP GET, parsed into a typed fact
//! - [`service`] - orchestration: cache, then admission, then upstream
//!
//! Around it, the usual shell:
//!
//! - [`config`] - layered configuration (defaults, TOML file, `FG_*` env)
//! - [`error`] - the closed error taxonomy the boundary branches on
//! - [`http`] - hyper server for `GET /me`, envelope, session cookie
//!
//! # Quick start
//!
//! ```rust,ignore
//! use factgate_core::admission::TokenBucket;
//! use factgate_core::cache::FactCache;
//! use factgate_core::config::FactgateConfig;
//! use factgate_core::http::ProfileServer;
//! use factgate_core::service::FactService;
//! use factgate_core::upstream::HttpFactClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FactgateConfig::load()?;
//!     config.validate()?;
//!
//!     let client = HttpFactClient::new(&config.upstream.url, config.upstream.timeout())?;
//!     let service = FactService::new(
//!         FactCache::new(config.cache.freshness()),
//!         TokenBucket::new(config.rate_limit.capacity, config.rate_limit.refill_per_sec),
//!         Arc::new(client),
//!     );
//!
//!     ProfileServer::new(service, config.profile.clone())
//!         .serve(&config.server.bind_addr())
//!         .await
//! }
//! ```

pub mod admission;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod service;
pub mod upstream;

pub use error::FetchError;
pub use model::{Fact, ProfileEnvelope, User};
pub use service::FactService;
