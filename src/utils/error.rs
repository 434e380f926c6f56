use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upstream query '{query}' failed: {message}")]
    UpstreamQueryFailed { query: String, message: String },

    #[error("Fallback resource not found: {resource}")]
    ResourceNotFound { resource: String },

    #[error("Fallback resource '{resource}' is malformed: {reason}")]
    MalformedResource { resource: String, reason: String },
}

impl FeatsError {
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            FeatsError::ResourceNotFound { .. } | FeatsError::MalformedResource { .. }
        )
    }

    /// Short message safe to show outside the process. Upstream detail stays in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FeatsError::ApiError(_) | FeatsError::UpstreamQueryFailed { .. } => {
                "The statistics provider could not be reached".to_string()
            }
            FeatsError::ResourceNotFound { .. } | FeatsError::MalformedResource { .. } => {
                "Ranking data is unavailable due to a server configuration problem".to_string()
            }
            FeatsError::IoError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeatsError>;
