pub mod cache;
pub mod dispatcher;
pub mod engine;
pub mod fallback;
pub mod live;
pub mod normalize;

pub use crate::domain::model::{
    FeatDescriptor, FeatSummary, RankingEntry, RankingResponse, RankingSource, RawEntry,
    SourceStrategy,
};
pub use crate::domain::ports::{
    Catalog, ConfigProvider, LiveError, LiveStrategy, RankingFetcher, StatsProvider, Storage,
};
pub use crate::utils::error::Result;
