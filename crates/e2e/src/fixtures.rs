//! Per-test browser resources
//!
//! `FeFixtures::setup` loads the env config and launches a session against
//! the frontend. `authenticated` does the same with the cached auth cookie
//! attached to every request, `from_storage_state` with the cached
//! storage-state file loaded into the context. Page objects are built on demand and share the
//! session's page. `teardown` closes the session; dropping the fixtures
//! without it still kills the driver process.

use tracing::debug;

use crate::driver::{BrowserConfig, BrowserSession};
use crate::error::E2eResult;
use crate::page::Page;
use crate::pages::{
    AuthPage, DynamicFormPage, FormCreationStep1Page, FormListPage, ForgotPasswordPage, LoginPage,
};
use staffqa_api::AuthCache;
use staffqa_common::{init_tracing, EnvConfig};

pub struct FeFixtures {
    pub env: EnvConfig,
    session: BrowserSession,
}

impl FeFixtures {
    pub async fn setup() -> E2eResult<Self> {
        init_tracing();
        let env = EnvConfig::load()?;
        let config = BrowserConfig::from_env(&env);
        Self::with_config(env, config).await
    }

    /// Session whose requests carry the main account's `token` cookie
    pub async fn authenticated() -> E2eResult<Self> {
        init_tracing();
        let env = EnvConfig::load()?;
        let cookie = AuthCache::new(&env).get_auth_cookie().await?;
        let config = BrowserConfig::from_env(&env).with_cookie(cookie);
        Self::with_config(env, config).await
    }

    /// Session whose context is seeded from the cached storage state
    pub async fn from_storage_state() -> E2eResult<Self> {
        init_tracing();
        let env = EnvConfig::load()?;
        let state = AuthCache::new(&env).get_storage_state(&env.fe_base_url).await?;
        let config = BrowserConfig::from_env(&env).with_storage_state(state);
        Self::with_config(env, config).await
    }

    pub async fn with_config(env: EnvConfig, config: BrowserConfig) -> E2eResult<Self> {
        let session = BrowserSession::launch(config).await?;
        Ok(Self { env, session })
    }

    pub fn page(&self) -> &Page {
        self.session.page()
    }

    pub fn auth_page(&self) -> AuthPage {
        AuthPage::new(self.page().clone())
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.page().clone())
    }

    pub fn forgot_password_page(&self) -> ForgotPasswordPage {
        ForgotPasswordPage::new(self.page().clone())
    }

    pub fn form_creation_step1_page(&self) -> FormCreationStep1Page {
        FormCreationStep1Page::new(self.page().clone())
    }

    pub fn form_list_page(&self) -> FormListPage {
        FormListPage::new(self.page().clone())
    }

    pub fn dynamic_form_page(&self) -> DynamicFormPage {
        DynamicFormPage::new(self.page().clone())
    }

    pub async fn teardown(self) -> E2eResult<()> {
        self.session.close().await?;
        debug!("Browser fixtures released");
        Ok(())
    }
}
