use crate::core::cache::TtlCache;
use crate::domain::model::{CacheStats, FeatSummary, RankingResponse};
use crate::domain::ports::{Catalog, RankingFetcher};
use crate::utils::error::Result;
use crate::utils::validation::clamp_top_n;
use std::sync::Arc;

pub type RankingCache = TtlCache<Arc<RankingResponse>>;

const CACHE_NAMESPACE: &str = "ranking";

pub fn cache_key(feat_id: &str, top_n: usize) -> String {
    format!("{}:{}:{}", CACHE_NAMESPACE, feat_id, top_n)
}

/// Serves rankings for catalog feats, memoizing each (feat, size) pair in the cache.
#[derive(Clone)]
pub struct RankingEngine {
    catalog: Arc<dyn Catalog>,
    fetcher: Arc<dyn RankingFetcher>,
    cache: Arc<RankingCache>,
}

impl RankingEngine {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        fetcher: Arc<dyn RankingFetcher>,
        cache: Arc<RankingCache>,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            cache,
        }
    }

    pub fn list_feats(&self) -> Vec<FeatSummary> {
        self.catalog.list_feats()
    }

    pub fn feat_summary(&self, feat_id: &str) -> Option<FeatSummary> {
        self.catalog
            .get_feat(feat_id)
            .map(|feat| FeatSummary::from(&feat))
    }

    /// `Ok(None)` when the feat is unknown. Errors only on a broken fallback dataset.
    pub async fn get_ranking(
        &self,
        feat_id: &str,
        requested_top_n: i64,
    ) -> Result<Option<Arc<RankingResponse>>> {
        let Some(feat) = self.catalog.get_feat(feat_id) else {
            return Ok(None);
        };

        let top_n = clamp_top_n(requested_top_n);
        let key = cache_key(feat_id, top_n);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("🗃️ cache HIT {}", key);
            return Ok(Some(cached));
        }
        tracing::debug!("🗃️ cache MISS {}", key);

        let (ranking, source) = self.fetcher.fetch_ranking(&feat, top_n).await?;
        let response = Arc::new(RankingResponse::build(&feat, ranking, source));

        self.cache.set(&key, response.clone());
        Ok(Some(response))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key("chaos_index", 3), "ranking:chaos_index:3");
        assert_ne!(cache_key("chaos_index", 3), cache_key("chaos_index", 4));
    }
}
