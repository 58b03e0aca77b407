use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-OK HTTP response, carries "<code> <reason>"
    #[error("{0}")]
    Upstream(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

// Serialize as the display string so errors can be embedded in JSON payloads
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_is_bare_status_text() {
        let err = AppError::Upstream("502 Bad Gateway".to_string());
        assert_eq!(err.to_string(), "502 Bad Gateway");
        assert_eq!(serde_json::to_string(&err).unwrap(), "\"502 Bad Gateway\"");
    }
}
