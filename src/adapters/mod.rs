// Adapters layer: concrete implementations of the domain ports (catalog, storage, http).

pub mod catalog;
pub mod http;
pub mod storage;

pub use catalog::StaticCatalog;
pub use http::NbaStatsClient;
pub use storage::LocalStorage;
