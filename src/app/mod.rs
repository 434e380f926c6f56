//! Wiring of the concrete collaborators behind a `RankingEngine`.

use crate::adapters::{LocalStorage, NbaStatsClient, StaticCatalog};
use crate::core::cache::TtlCache;
use crate::core::dispatcher::FetchDispatcher;
use crate::core::engine::RankingEngine;
use crate::core::fallback::FallbackLoader;
use crate::core::live::StrategyRegistry;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Build the engine for the built-in catalog: NBA stats live strategies, fallback datasets
/// from `fallback_dir`, and a fresh cache.
pub fn build_engine(config: &impl ConfigProvider) -> Result<RankingEngine> {
    let catalog = StaticCatalog::builtin();
    catalog.validate()?;

    let client = NbaStatsClient::new(
        config.stats_endpoint(),
        config.request_timeout(),
        &config.upstream_headers(),
    )?;
    let registry = StrategyRegistry::nba_defaults(Arc::new(client));

    let dispatcher = FetchDispatcher::new(
        registry,
        FallbackLoader::new(LocalStorage::new(config.fallback_dir())),
    )
    .with_live_timeout(config.live_timeout())
    .with_live_enabled(config.live_enabled());

    tracing::info!(
        "🏀 {} feats, live data {}, fallback dir '{}', cache TTL {:?}",
        catalog.len(),
        if config.live_enabled() { "enabled" } else { "disabled" },
        config.fallback_dir(),
        config.cache_ttl()
    );

    Ok(RankingEngine::new(
        Arc::new(catalog),
        Arc::new(dispatcher),
        Arc::new(TtlCache::with_default_ttl(config.cache_ttl())),
    ))
}
