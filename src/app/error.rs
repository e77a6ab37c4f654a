use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadItError {
    #[error("Markup parsing error: {0}")]
    Parse(String),

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Element missing: {0}")]
    ElementMissing(String),

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Markdown conversion error: {0}")]
    Markdown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReadItError>;
