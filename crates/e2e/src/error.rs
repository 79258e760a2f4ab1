//! Error types for browser tests

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found; run npm i -D @playwright/test && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Driver protocol error: {0}")]
    Protocol(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] staffqa_common::Error),
}

impl E2eError {
    /// True for failures raised by an `expect` call rather than by the
    /// browser or the driver process
    pub fn is_assertion(&self) -> bool {
        match self {
            E2eError::AssertionFailed(_) => true,
            E2eError::Common(err) => err.is_assertion(),
            _ => false,
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
