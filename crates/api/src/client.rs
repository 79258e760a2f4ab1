//! HTTP request context and the versioned base API wrapper

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use staffqa_common::{EnvConfig, Error, Result};

/// Request-capable context bound to a base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiContext {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl ApiContext {
    /// Create a context for `base_url` with no extra headers
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: HeaderMap::new(),
        })
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid header value for {}: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_bearer(self, token: &str) -> Result<Self> {
        self.with_header(AUTHORIZATION.as_str(), &format!("Bearer {}", token))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Issue a request against `path` (relative to the base URL).
    /// A JSON body is sent when `data` is present.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if let Some(extra) = headers {
            request = request.headers(extra.clone());
        }
        if let Some(body) = data {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.bytes().await?;

        debug!("{} {} -> {}", method, url, status);
        Ok(ApiResponse::from_parts(status, headers, url, body))
    }

    /// Release the context. Pending requests keep their own handles.
    pub fn dispose(self) {
        debug!("Disposed API context for {}", self.base_url);
    }
}

/// Fully buffered HTTP response
#[derive(Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: String,
    body: Bytes,
}

impl ApiResponse {
    pub fn from_parts(status: StatusCode, headers: HeaderMap, url: String, body: Bytes) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// True for 2xx statuses
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl fmt::Debug for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status)
            .field("url", &self.url)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Shared request helpers: prefixes every path with `/<api version>`.
/// Feature APIs hold one of these.
#[derive(Debug, Clone)]
pub struct BaseApi {
    request: ApiContext,
    api_version: String,
}

impl BaseApi {
    pub fn new(request: ApiContext, api_version: impl Into<String>) -> Self {
        Self {
            request,
            api_version: api_version.into(),
        }
    }

    /// Use the API version from the suite configuration
    pub fn from_config(request: ApiContext, config: &EnvConfig) -> Self {
        Self::new(request, config.be_api_version.clone())
    }

    pub fn context(&self) -> &ApiContext {
        &self.request
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("/{}{}", self.api_version, path)
    }

    pub async fn get(&self, path: &str, headers: Option<HeaderMap>) -> Result<ApiResponse> {
        self.request
            .fetch(Method::GET, &self.endpoint(path), None, headers.as_ref())
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        data: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse> {
        self.request
            .fetch(Method::POST, &self.endpoint(path), data.as_ref(), headers.as_ref())
            .await
    }

    pub async fn put(
        &self,
        path: &str,
        data: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse> {
        self.request
            .fetch(Method::PUT, &self.endpoint(path), data.as_ref(), headers.as_ref())
            .await
    }

    pub async fn patch(
        &self,
        path: &str,
        data: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse> {
        self.request
            .fetch(Method::PATCH, &self.endpoint(path), data.as_ref(), headers.as_ref())
            .await
    }

    pub async fn delete(&self, path: &str, headers: Option<HeaderMap>) -> Result<ApiResponse> {
        self.request
            .fetch(Method::DELETE, &self.endpoint(path), None, headers.as_ref())
            .await
    }

    pub fn parse_json<T: DeserializeOwned>(&self, response: &ApiResponse) -> Result<T> {
        response.json()
    }
}

/// Header map carrying only `Authorization: Bearer <token>`
pub fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| Error::Config(format!("invalid bearer token: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
