//! Employee CRUD endpoints

use serde_json::Value;

use crate::client::{ApiResponse, BaseApi};
use staffqa_common::constants::endpoints;
use staffqa_common::Result;

/// `/employees` endpoints. Expects an authenticated context.
#[derive(Debug, Clone)]
pub struct EmployeeApi {
    base: BaseApi,
}

impl EmployeeApi {
    pub fn new(base: BaseApi) -> Self {
        Self { base }
    }

    pub async fn list(&self, page: u32, per_page: u32) -> Result<ApiResponse> {
        let path = format!("{}?page={}&perPage={}", endpoints::employees::LIST, page, per_page);
        self.base.get(&path, None).await
    }

    pub async fn create(&self, body: Value) -> Result<ApiResponse> {
        self.base.post(endpoints::employees::CREATE, Some(body), None).await
    }

    pub async fn detail(&self, id: &str) -> Result<ApiResponse> {
        self.base.get(&endpoints::employees::detail(id), None).await
    }

    pub async fn update(&self, id: &str, body: Value) -> Result<ApiResponse> {
        self.base.put(&endpoints::employees::detail(id), Some(body), None).await
    }

    /// Partial update
    pub async fn patch(&self, id: &str, body: Value) -> Result<ApiResponse> {
        self.base.patch(&endpoints::employees::detail(id), Some(body), None).await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse> {
        self.base.delete(&endpoints::employees::detail(id), None).await
    }
}
