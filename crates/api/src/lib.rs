//! staffqa API layer
//!
//! Thin typed wrappers over the backend: a request context, a versioned
//! base API, feature APIs built on top of it, response assertions and the
//! on-disk auth cache shared with the browser suite.

pub mod assertions;
pub mod auth;
pub mod auth_cache;
pub mod client;
pub mod employees;
pub mod fixtures;

pub use assertions::{expect_error, expect_json_body, expect_status, expect_success};
pub use auth::{AuthApi, LoginApi, RegisterApi};
pub use auth_cache::{AuthCache, StorageState};
pub use client::{ApiContext, ApiResponse, BaseApi};
pub use employees::EmployeeApi;
pub use fixtures::BeFixtures;
