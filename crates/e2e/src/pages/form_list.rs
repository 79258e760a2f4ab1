//! Settings menu entries that gate the form list

use staffqa_common::constants::routes;

use crate::base_page::BasePage;
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;

#[derive(Debug, Clone)]
pub struct FormListPage {
    base: BasePage,
    pub digital_form_menu: Locator,
    /// Legacy "Form" entry
    pub form_menu: Locator,
    pub task_operation_setting_menu: Locator,
}

impl FormListPage {
    pub fn new(page: Page) -> Self {
        Self {
            base: BasePage::new(page),
            digital_form_menu: Locator::text("Digital Form"),
            form_menu: Locator::text("Form"),
            task_operation_setting_menu: Locator::test_id("settings-task_operations-button"),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub async fn navigate_to_settings(&self) -> E2eResult<()> {
        self.base.navigate(routes::SETTINGS).await
    }

    pub async fn navigate_to_task_operations(&self) -> E2eResult<()> {
        self.base.page().click(&self.task_operation_setting_menu).await
    }

    pub async fn verify_task_operations_visible(&self) -> E2eResult<()> {
        self.base.expect_visible(&self.task_operation_setting_menu).await
    }

    pub async fn verify_legacy_form_menu_hidden(&self) -> E2eResult<()> {
        self.base.page().expect(&self.form_menu).to_be_hidden().await
    }

    pub async fn verify_legacy_form_menu_visible(&self) -> E2eResult<()> {
        self.base.expect_visible(&self.digital_form_menu).await
    }

    pub async fn verify_form_menu_hidden(&self) -> E2eResult<()> {
        self.base.page().expect(&self.digital_form_menu).to_be_hidden().await
    }
}
