//! Auth endpoints and the scenario-specific wrappers around them

use serde_json::json;

use crate::client::{bearer_headers, ApiResponse, BaseApi};
use staffqa_common::constants::endpoints;
use staffqa_common::generators::RegistrationData;
use staffqa_common::{Credentials, Result};

/// `/auth/*` endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    base: BaseApi,
}

impl AuthApi {
    pub fn new(base: BaseApi) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BaseApi {
        &self.base
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse> {
        self.base
            .post(
                endpoints::auth::LOGIN,
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await
    }

    pub async fn register(&self, data: &RegistrationData) -> Result<ApiResponse> {
        self.base
            .post(endpoints::auth::REGISTER, Some(serde_json::to_value(data)?), None)
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<ApiResponse> {
        self.base
            .post(endpoints::auth::LOGOUT, None, Some(bearer_headers(token)?))
            .await
    }

    pub async fn refresh(&self, token: &str) -> Result<ApiResponse> {
        self.base
            .post(endpoints::auth::REFRESH, None, Some(bearer_headers(token)?))
            .await
    }

    pub async fn get_me(&self, token: &str) -> Result<ApiResponse> {
        self.base
            .get(endpoints::auth::ME, Some(bearer_headers(token)?))
            .await
    }
}

/// Login scenarios
#[derive(Debug, Clone)]
pub struct LoginApi {
    auth: AuthApi,
}

impl LoginApi {
    pub fn new(base: BaseApi) -> Self {
        Self {
            auth: AuthApi::new(base),
        }
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub async fn login_with_valid_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse> {
        self.auth.login(email, password).await
    }

    pub async fn login_with_invalid_credentials(&self) -> Result<ApiResponse> {
        let invalid = Credentials::invalid();
        self.auth.login(&invalid.email, &invalid.password).await
    }

    pub async fn login_with_empty_body(&self) -> Result<ApiResponse> {
        self.auth.login("", "").await
    }
}

/// Registration scenarios
#[derive(Debug, Clone)]
pub struct RegisterApi {
    auth: AuthApi,
}

impl RegisterApi {
    pub fn new(base: BaseApi) -> Self {
        Self {
            auth: AuthApi::new(base),
        }
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub async fn register_new_user(&self, data: &RegistrationData) -> Result<ApiResponse> {
        self.auth.register(data).await
    }

    pub async fn register_with_existing_email(&self, email: &str) -> Result<ApiResponse> {
        let data = RegistrationData {
            email: email.to_string(),
            password: "password123".to_string(),
            name: "Duplicate User".to_string(),
        };
        self.auth.register(&data).await
    }

    pub async fn register_with_empty_body(&self) -> Result<ApiResponse> {
        self.auth.register(&RegistrationData::empty()).await
    }
}
