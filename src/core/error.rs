use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyTesterError {
    #[error("Curl error: {0}")]
    Curl(#[from] curl::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key listing failed: {0}")]
    Listing(String),

    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, KeyTesterError>;
