use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// True for failures that came from one of the two source fetches.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ReportError::Http(_) | ReportError::Status { .. } | ReportError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
