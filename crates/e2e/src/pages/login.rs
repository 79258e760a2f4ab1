//! Login screen

use staffqa_common::constants::routes;
use tracing::info;

use crate::driver::LoadState;
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;
use crate::pages::auth::AuthPage;

#[derive(Debug, Clone)]
pub struct LoginPage {
    auth: AuthPage,
}

impl LoginPage {
    pub fn new(page: Page) -> Self {
        Self {
            auth: AuthPage::new(page),
        }
    }

    pub fn auth(&self) -> &AuthPage {
        &self.auth
    }

    pub fn email_input(&self) -> Locator {
        Locator::test_id("login-email")
    }

    pub fn password_input(&self) -> Locator {
        Locator::test_id("login-password")
    }

    pub fn submit_button(&self) -> Locator {
        Locator::test_id("login-submit")
    }

    /// Open the login route and wait for the network to settle
    pub async fn goto(&self) -> E2eResult<()> {
        let base = self.auth.base();
        base.navigate(routes::LOGIN).await?;
        base.wait_for_page_load().await
    }

    /// Open the login route, waiting only for the `load` event
    pub async fn visit(&self) -> E2eResult<()> {
        let base = self.auth.base();
        base.navigate(routes::LOGIN).await?;
        base.page().wait_for_load_state(LoadState::Load).await
    }

    pub async fn login(&self, email: &str, password: &str) -> E2eResult<()> {
        let base = self.auth.base();
        info!(email, "logging in through the UI");
        base.fill_input(&self.email_input(), email).await?;
        base.fill_input(&self.password_input(), password).await?;
        base.page().click(&self.submit_button()).await
    }

    pub async fn expect_on_login_page(&self) -> E2eResult<()> {
        self.auth.base().expect_url(routes::LOGIN).await
    }

    /// A successful login lands on the employee list
    pub async fn expect_on_dashboard(&self) -> E2eResult<()> {
        self.auth.base().expect_url(routes::EMPLOYEE).await
    }

    /// Wait until the app has navigated away from the login route
    pub async fn wait_for_change_route(&self) -> E2eResult<()> {
        self.auth.base().page().wait_for_url(routes::LOGIN, true).await
    }
}
