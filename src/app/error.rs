use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported feed URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Feed(String),

    #[error("Earthquake not found at index {0}")]
    NotFound(usize),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, QuakeError>;
