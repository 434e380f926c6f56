pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url};

pub use crate::adapters::http::DEFAULT_STATS_ENDPOINT;
pub use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FALLBACK_DIR: &str = "data/fallback";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LIVE_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Upper bounds keep every duration representable as an expiry instant.
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const MAX_CACHE_TTL_SECS: u64 = crate::core::cache::MAX_TTL.as_secs();

/// Checks shared by every configuration source.
pub fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    validate_range("server.port", config.port(), 1, u16::MAX)?;
    validate_url("source.endpoint", config.stats_endpoint())?;
    validate_range(
        "source.request_timeout_seconds",
        config.request_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    validate_range(
        "source.live_timeout_seconds",
        config.live_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    validate_path("fallback.dir", config.fallback_dir())?;
    validate_range(
        "cache.ttl_seconds",
        config.cache_ttl().as_secs(),
        1,
        MAX_CACHE_TTL_SECS,
    )?;
    if let Some(static_dir) = config.static_dir() {
        validate_path("server.static_dir", static_dir)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "rodman-feats")]
    #[command(about = "Rodman Historic Feats API: because The Worm deserves an API")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_HOST)]
        pub host: String,

        #[arg(long, default_value_t = DEFAULT_PORT)]
        pub port: u16,

        #[arg(long, help = "Directory with the static frontend, served for unmatched paths")]
        pub static_dir: Option<String>,

        #[arg(long, default_value = DEFAULT_STATS_ENDPOINT)]
        pub stats_endpoint: String,

        #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
        pub request_timeout_secs: u64,

        #[arg(long, default_value_t = DEFAULT_LIVE_TIMEOUT_SECS)]
        pub live_timeout_secs: u64,

        #[arg(long, help = "Serve every feat from its fallback dataset")]
        pub disable_live: bool,

        #[arg(long, default_value = DEFAULT_FALLBACK_DIR)]
        pub fallback_dir: String,

        #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS)]
        pub cache_ttl_secs: u64,

        #[arg(long, help = "Load settings from a TOML file instead of flags")]
        pub config: Option<String>,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, short, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn host(&self) -> &str {
            &self.host
        }

        fn port(&self) -> u16 {
            self.port
        }

        fn static_dir(&self) -> Option<&str> {
            self.static_dir.as_deref()
        }

        fn stats_endpoint(&self) -> &str {
            &self.stats_endpoint
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.request_timeout_secs)
        }

        fn live_timeout(&self) -> Duration {
            Duration::from_secs(self.live_timeout_secs)
        }

        fn live_enabled(&self) -> bool {
            !self.disable_live
        }

        fn fallback_dir(&self) -> &str {
            &self.fallback_dir
        }

        fn cache_ttl(&self) -> Duration {
            Duration::from_secs(self.cache_ttl_secs)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> crate::utils::error::Result<()> {
            validate_provider(self)
        }
    }

}
