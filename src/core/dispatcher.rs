use crate::core::fallback::FallbackLoader;
use crate::core::live::StrategyRegistry;
use crate::core::normalize::{assign_ranks, normalize};
use crate::domain::model::{FeatDescriptor, RankingEntry, RankingSource, RawEntry, SourceStrategy};
use crate::domain::ports::{LiveError, LiveStrategy, RankingFetcher, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_LIVE_TIMEOUT: Duration = Duration::from_secs(20);

/// Chooses live or fallback data for a feat. Live failures of any kind degrade to the
/// fallback dataset; only a broken fallback dataset is returned as an error.
pub struct FetchDispatcher<S: Storage> {
    registry: StrategyRegistry,
    loader: FallbackLoader<S>,
    live_timeout: Duration,
    live_enabled: bool,
}

impl<S: Storage> FetchDispatcher<S> {
    pub fn new(registry: StrategyRegistry, loader: FallbackLoader<S>) -> Self {
        Self {
            registry,
            loader,
            live_timeout: DEFAULT_LIVE_TIMEOUT,
            live_enabled: true,
        }
    }

    pub fn with_live_timeout(mut self, live_timeout: Duration) -> Self {
        self.live_timeout = live_timeout;
        self
    }

    pub fn with_live_enabled(mut self, live_enabled: bool) -> Self {
        self.live_enabled = live_enabled;
        self
    }

    fn live_strategy_for(&self, feat: &FeatDescriptor) -> Option<Arc<dyn LiveStrategy>> {
        if !self.live_enabled || feat.source_strategy == SourceStrategy::Fallback {
            return None;
        }
        self.registry.get(&feat.id)
    }

    async fn try_live(
        &self,
        strategy: &dyn LiveStrategy,
        top_n: usize,
    ) -> std::result::Result<Vec<RawEntry>, LiveError> {
        match tokio::time::timeout(self.live_timeout, strategy.fetch_live(top_n)).await {
            Ok(Ok(entries)) if entries.is_empty() => Err(LiveError::NoLiveData),
            Ok(outcome) => outcome,
            Err(_) => Err(LiveError::TimedOut(self.live_timeout)),
        }
    }

    async fn load_fallback(&self, feat: &FeatDescriptor, top_n: usize) -> Result<Vec<RankingEntry>> {
        let raw = self.loader.load_fallback(&feat.fallback_resource).await?;
        Ok(rank(raw.iter().take(top_n)))
    }
}

fn rank<'a>(raw: impl Iterator<Item = &'a RawEntry>) -> Vec<RankingEntry> {
    assign_ranks(raw.map(normalize).collect())
}

#[async_trait]
impl<S: Storage> RankingFetcher for FetchDispatcher<S> {
    async fn fetch_ranking(
        &self,
        feat: &FeatDescriptor,
        top_n: usize,
    ) -> Result<(Vec<RankingEntry>, RankingSource)> {
        if let Some(strategy) = self.live_strategy_for(feat) {
            let start = Instant::now();
            match self.try_live(strategy.as_ref(), top_n).await {
                Ok(raw) => {
                    tracing::info!(
                        "✅ Live OK '{}' in {:.2}s ({} entries)",
                        feat.id,
                        start.elapsed().as_secs_f64(),
                        raw.len()
                    );
                    return Ok((rank(raw.iter().take(top_n)), RankingSource::Live));
                }
                Err(e) => {
                    tracing::warn!("⚠️ Live FAIL '{}': {}, using fallback", feat.id, e);
                }
            }
        }

        let ranking = self.load_fallback(feat, top_n).await?;
        Ok((ranking, RankingSource::Fallback))
    }
}
