//! Factgate server binary
//!
//! Thin shell: load configuration, wire the access layer together, serve.
//! All state is constructed here and handed to the server; nothing is
//! process-global.

use factgate_core::admission::TokenBucket;
use factgate_core::cache::FactCache;
use factgate_core::config::FactgateConfig;
use factgate_core::http::ProfileServer;
use factgate_core::service::FactService;
use factgate_core::upstream::HttpFactClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional first argument: path to a config file
    let config = match std::env::args().nth(1) {
        Some(path) => FactgateConfig::load_from(path)?,
        None => FactgateConfig::load()?,
    };
    config.validate()?;

    log::info!(
        "upstream {} (timeout {}s), freshness {}s, rate budget {} burst / {}/s",
        config.upstream.url,
        config.upstream.timeout_secs,
        config.cache.freshness_secs,
        config.rate_limit.capacity,
        config.rate_limit.refill_per_sec
    );

    let client = HttpFactClient::new(&config.upstream.url, config.upstream.timeout())?;
    let service = FactService::new(
        FactCache::new(config.cache.freshness()),
        TokenBucket::new(config.rate_limit.capacity, config.rate_limit.refill_per_sec),
        Arc::new(client),
    );

    ProfileServer::new(service, config.profile.clone())
        .serve(&config.server.bind_addr())
        .await
}
