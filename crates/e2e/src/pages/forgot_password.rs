//! Forgot-password screen

use staffqa_common::constants::routes;

use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;
use crate::pages::auth::AuthPage;

#[derive(Debug, Clone)]
pub struct ForgotPasswordPage {
    auth: AuthPage,
}

impl ForgotPasswordPage {
    pub fn new(page: Page) -> Self {
        Self {
            auth: AuthPage::new(page),
        }
    }

    pub fn auth(&self) -> &AuthPage {
        &self.auth
    }

    pub fn email_input(&self) -> Locator {
        Locator::test_id("forgot-password-email")
    }

    pub fn submit_button(&self) -> Locator {
        Locator::test_id("forgot-password-submit")
    }

    pub fn success_message(&self) -> Locator {
        Locator::test_id("forgot-password-success")
    }

    pub fn back_to_login_link(&self) -> Locator {
        Locator::test_id("back-to-login")
    }

    pub async fn goto(&self) -> E2eResult<()> {
        let base = self.auth.base();
        base.navigate(routes::FORGOT_PASSWORD).await?;
        base.wait_for_page_load().await
    }

    pub async fn submit_forgot_password(&self, email: &str) -> E2eResult<()> {
        let base = self.auth.base();
        base.fill_input(&self.email_input(), email).await?;
        base.page().click(&self.submit_button()).await
    }

    pub async fn expect_success_message(&self) -> E2eResult<()> {
        self.auth.base().expect_visible(&self.success_message()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Command;
    use crate::testing::RecordingDriver;

    #[tokio::test]
    async fn test_submit_targets_forgot_password_form() {
        let (driver, page) = RecordingDriver::page();
        let forgot = ForgotPasswordPage::new(page);
        forgot.goto().await.unwrap();
        forgot.submit_forgot_password("qa@staffinc.co").await.unwrap();

        let commands = driver.commands();
        assert_eq!(
            commands[0],
            Command::Goto {
                url: "/forgot-password".to_string()
            }
        );
        assert_eq!(
            commands.last(),
            Some(&Command::Click {
                locator: Locator::test_id("forgot-password-submit")
            })
        );
    }
}
