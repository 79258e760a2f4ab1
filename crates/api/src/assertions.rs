//! Assertion helpers for API responses
//!
//! Each helper returns `Error::Assertion` on mismatch so a test can bail out
//! with `?`. None of them retry.

use serde::de::DeserializeOwned;

use crate::client::ApiResponse;
use staffqa_common::{Error, Result};

const BODY_PREVIEW: usize = 300;

fn preview(response: &ApiResponse) -> String {
    let text = response.text();
    match text.char_indices().nth(BODY_PREVIEW) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

/// Status must equal `status`
pub fn expect_status(response: &ApiResponse, status: u16) -> Result<()> {
    if response.status() != status {
        return Err(Error::Assertion(format!(
            "expected status {}, got {} from {}: {}",
            status,
            response.status(),
            response.url(),
            preview(response)
        )));
    }
    Ok(())
}

/// Status must be 2xx
pub fn expect_success(response: &ApiResponse) -> Result<()> {
    if !response.ok() {
        return Err(Error::Assertion(format!(
            "expected a 2xx status, got {} from {}: {}",
            response.status(),
            response.url(),
            preview(response)
        )));
    }
    Ok(())
}

/// Status must equal `status` and the response must not be ok
pub fn expect_error(response: &ApiResponse, status: u16) -> Result<()> {
    expect_status(response, status)?;
    if response.ok() {
        return Err(Error::Assertion(format!(
            "expected a failed response, got {} from {}",
            response.status(),
            response.url()
        )));
    }
    Ok(())
}

/// Content type must be JSON; returns the decoded body
pub fn expect_json_body<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    let content_type = response.content_type().unwrap_or_default();
    if !content_type.contains("application/json") {
        return Err(Error::Assertion(format!(
            "expected content-type to contain application/json, got {:?}",
            content_type
        )));
    }
    response.json()
}
