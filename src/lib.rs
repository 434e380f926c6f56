pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, NbaStatsClient, StaticCatalog};
pub use app::build_engine;
pub use config::TomlConfig;
pub use core::{cache::TtlCache, dispatcher::FetchDispatcher, engine::RankingEngine};
pub use utils::error::{FeatsError, Result};
