use crate::utils::error::{FeatsError, Result};
use std::path::{Component, Path};
use url::Url;

/// Smallest and largest ranking size a caller may ask for.
pub const MIN_TOP_N: usize = 1;
pub const MAX_TOP_N: usize = 25;
pub const DEFAULT_TOP_N: i64 = 10;

const DATASET_EXTENSION: &str = "json";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Clamp a requested ranking size into `[MIN_TOP_N, MAX_TOP_N]`.
pub fn clamp_top_n(requested: i64) -> usize {
    requested.clamp(MIN_TOP_N as i64, MAX_TOP_N as i64) as usize
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> FeatsError {
    FeatsError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Only http(s) endpoints are reachable by the stats client.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes"));
    }
    Ok(())
}

/// A fallback resource id must stay inside the dataset directory.
pub fn is_contained_resource(resource_id: &str) -> bool {
    !resource_id.is_empty()
        && Path::new(resource_id)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// A catalog resource must be a contained `.json` file.
pub fn validate_dataset_resource(field: &str, resource_id: &str) -> Result<()> {
    if !is_contained_resource(resource_id) {
        return Err(invalid(
            field,
            resource_id,
            "must be a relative path inside the fallback directory",
        ));
    }
    match Path::new(resource_id).extension().and_then(|ext| ext.to_str()) {
        Some(DATASET_EXTENSION) => Ok(()),
        _ => Err(invalid(field, resource_id, "fallback datasets must be .json files")),
    }
}

pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("Value must be between {} and {}", min, max)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_top_n() {
        assert_eq!(clamp_top_n(0), 1);
        assert_eq!(clamp_top_n(-5), 1);
        assert_eq!(clamp_top_n(999), 25);
        assert_eq!(clamp_top_n(3), 3);
        assert_eq!(clamp_top_n(25), 25);
        assert_eq!(clamp_top_n(i64::MIN), 1);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://stats.nba.com/stats/leagueleaders").is_ok());
        assert!(validate_url("source.endpoint", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "not a url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("fallback.dir", "data/fallback").is_ok());
        assert!(validate_path("fallback.dir", "  ").is_err());
        assert!(validate_path("fallback.dir", "data\0").is_err());
    }

    #[test]
    fn test_contained_resource() {
        assert!(is_contained_resource("season_rpg.json"));
        assert!(is_contained_resource("nested/season_rpg.json"));
        assert!(!is_contained_resource("../secrets.json"));
        assert!(!is_contained_resource("/etc/passwd"));
        assert!(!is_contained_resource(""));
    }

    #[test]
    fn test_dataset_resource() {
        assert!(validate_dataset_resource("feat.fallback_resource", "chaos_index.json").is_ok());
        assert!(validate_dataset_resource("feat.fallback_resource", "chaos_index.csv").is_err());
        assert!(validate_dataset_resource("feat.fallback_resource", "chaos_index").is_err());
        assert!(validate_dataset_resource("feat.fallback_resource", "../chaos_index.json").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.port", 8000u16, 1, u16::MAX).is_ok());
        assert!(validate_range("server.port", 0u16, 1, u16::MAX).is_err());

        let err = validate_range("cache.ttl_seconds", u64::MAX, 1, 600).unwrap_err();
        assert!(err.to_string().contains("cache.ttl_seconds"));
    }
}
