use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl BundleError {
    pub fn catalog<T: Into<String>>(message: T) -> Self {
        BundleError::Catalog(message.into())
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;
