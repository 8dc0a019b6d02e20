use reqwest::StatusCode;
use thiserror::Error;

/**
    Errors from fetching or parsing the origin channel document.
*/
#[derive(Debug, Clone, Error)]
pub enum OriginError {
    #[error("origin request failed: {0}")]
    Transport(String),

    #[error("origin returned HTTP {0}")]
    Status(StatusCode),

    #[error("malformed channel document: {0}")]
    Parse(String),
}
