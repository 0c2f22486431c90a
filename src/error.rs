use thiserror::Error;

/// Errors raised at the edges of the classifier: loading rules and decoding
/// provider documents. Classification itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid category rules: {0}")]
    InvalidRules(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
