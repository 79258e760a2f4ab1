//! Per-test resources for the API suite
//!
//! `BeFixtures::setup` builds the env config and an anonymous request
//! context; feature APIs are constructed on demand from it.
//! `teardown` releases contexts in reverse order of creation.

use tracing::debug;

use crate::auth::{AuthApi, LoginApi, RegisterApi};
use crate::auth_cache::AuthCache;
use crate::client::{ApiContext, BaseApi};
use crate::employees::EmployeeApi;
use staffqa_common::{init_tracing, EnvConfig, Result};

pub struct BeFixtures {
    pub env: EnvConfig,
    pub api_context: ApiContext,
    authenticated: Option<ApiContext>,
}

impl BeFixtures {
    /// Load the environment and open an anonymous context for the backend
    pub fn setup() -> Result<Self> {
        init_tracing();
        Self::with_config(EnvConfig::load()?)
    }

    pub fn with_config(env: EnvConfig) -> Result<Self> {
        let api_context = ApiContext::new(env.be_base_url.clone())?;
        Ok(Self {
            env,
            api_context,
            authenticated: None,
        })
    }

    /// Context that sends the cached main-account bearer token.
    /// Created on first use and released at teardown.
    pub async fn authenticated_api_context(&mut self) -> Result<ApiContext> {
        if let Some(ctx) = &self.authenticated {
            return Ok(ctx.clone());
        }

        let token = AuthCache::new(&self.env).get_auth_token().await?;
        let ctx = ApiContext::new(self.env.be_base_url.clone())?.with_bearer(&token)?;
        self.authenticated = Some(ctx.clone());
        Ok(ctx)
    }

    pub fn base_api(&self) -> BaseApi {
        BaseApi::from_config(self.api_context.clone(), &self.env)
    }

    pub fn auth_api(&self) -> AuthApi {
        AuthApi::new(self.base_api())
    }

    pub fn login_api(&self) -> LoginApi {
        LoginApi::new(self.base_api())
    }

    pub fn register_api(&self) -> RegisterApi {
        RegisterApi::new(self.base_api())
    }

    pub async fn employee_api(&mut self) -> Result<EmployeeApi> {
        let ctx = self.authenticated_api_context().await?;
        Ok(EmployeeApi::new(BaseApi::from_config(ctx, &self.env)))
    }

    pub fn teardown(self) {
        if let Some(ctx) = self.authenticated {
            ctx.dispose();
        }
        self.api_context.dispose();
        debug!("API fixtures released");
    }
}
