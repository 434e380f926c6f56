use crate::domain::model::{
    FeatDescriptor, FeatSummary, LeaderQuery, LeaderRow, RankingEntry, RankingSource, RawEntry,
};
use crate::utils::error::{FeatsError, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn static_dir(&self) -> Option<&str>;
    fn stats_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn live_timeout(&self) -> Duration;
    fn live_enabled(&self) -> bool;
    fn fallback_dir(&self) -> &str;
    fn cache_ttl(&self) -> Duration;

    fn upstream_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Read-only feat metadata.
pub trait Catalog: Send + Sync {
    fn get_feat(&self, id: &str) -> Option<FeatDescriptor>;
    fn list_feats(&self) -> Vec<FeatSummary>;
}

/// External statistics provider.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn league_leaders(&self, query: &LeaderQuery) -> Result<Vec<LeaderRow>>;
}

/// Why a live strategy produced nothing usable.
#[derive(Error, Debug)]
pub enum LiveError {
    #[error("no usable rows from any upstream query")]
    NoLiveData,

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Upstream(#[from] FeatsError),
}

/// Live fetch routine for a single feat.
#[async_trait]
pub trait LiveStrategy: Send + Sync {
    async fn fetch_live(&self, top_n: usize) -> std::result::Result<Vec<RawEntry>, LiveError>;
}

/// Produces a normalized, ranked list for a feat. Only fallback-dataset defects surface as errors.
#[async_trait]
pub trait RankingFetcher: Send + Sync {
    async fn fetch_ranking(
        &self,
        feat: &FeatDescriptor,
        top_n: usize,
    ) -> Result<(Vec<RankingEntry>, RankingSource)>;
}
