use super::{
    validate_provider, DEFAULT_CACHE_TTL_SECS, DEFAULT_FALLBACK_DIR, DEFAULT_HOST,
    DEFAULT_LIVE_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STATS_ENDPOINT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FeatsError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub source: Option<SourceConfig>,
    pub fallback: Option<FallbackConfig>,
    pub cache: Option<CacheConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub live_timeout_seconds: Option<u64>,
    pub live_enabled: Option<bool>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeatsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FeatsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NBA_STATS_ENDPOINT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FeatsError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn source_ref(&self) -> Option<&SourceConfig> {
        self.source.as_ref()
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    fn static_dir(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.static_dir.as_deref())
    }

    fn stats_endpoint(&self) -> &str {
        self.source_ref()
            .and_then(|s| s.endpoint.as_deref())
            .unwrap_or(DEFAULT_STATS_ENDPOINT)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source_ref()
                .and_then(|s| s.request_timeout_seconds)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    fn live_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source_ref()
                .and_then(|s| s.live_timeout_seconds)
                .unwrap_or(DEFAULT_LIVE_TIMEOUT_SECS),
        )
    }

    fn live_enabled(&self) -> bool {
        self.source_ref().and_then(|s| s.live_enabled).unwrap_or(true)
    }

    fn fallback_dir(&self) -> &str {
        self.fallback
            .as_ref()
            .and_then(|f| f.dir.as_deref())
            .unwrap_or(DEFAULT_FALLBACK_DIR)
    }

    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache
                .as_ref()
                .and_then(|c| c.ttl_seconds)
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
        )
    }

    fn upstream_headers(&self) -> Vec<(String, String)> {
        self.source_ref()
            .and_then(|s| s.headers.as_ref())
            .map(|headers| {
                headers
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
