//! Error types shared by the staffqa crates

use thiserror::Error;

/// Result type alias using the staffqa Error
pub type Result<T> = std::result::Result<T, Error>;

/// staffqa error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Login failed: {status} {body}")]
    Authentication { status: u16, body: String },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error came from an assertion helper rather than the plumbing.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::Assertion(_))
    }
}
