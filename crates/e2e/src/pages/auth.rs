//! Elements shared by the login and forgot-password screens

use crate::base_page::BasePage;
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;

#[derive(Debug, Clone)]
pub struct AuthPage {
    base: BasePage,
}

impl AuthPage {
    pub fn new(page: Page) -> Self {
        Self {
            base: BasePage::new(page),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn error_message(&self) -> Locator {
        Locator::test_id("auth-error-message")
    }

    pub fn loading_spinner(&self) -> Locator {
        Locator::test_id("auth-loading")
    }

    pub async fn expect_auth_error(&self, message: &str) -> E2eResult<()> {
        let error = self.error_message();
        self.base.expect_visible(&error).await?;
        self.base.expect_text(&error, message).await
    }
}
