//! Settings-side entry into digital forms, plus the creation stepper

use staffqa_common::constants::routes;

use crate::base_page::BasePage;
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;
use crate::pages::form_creation::CreationStepper;

#[derive(Debug, Clone)]
pub struct DynamicFormPage {
    base: BasePage,
    stepper: CreationStepper,
    pub task_operation_setting_menu: Locator,
    pub digital_form_menu: Locator,
}

impl DynamicFormPage {
    pub fn new(page: Page) -> Self {
        Self {
            stepper: CreationStepper::new(page.clone()),
            base: BasePage::new(page),
            task_operation_setting_menu: Locator::text("Task Operations"),
            digital_form_menu: Locator::text("Digital Form"),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn stepper(&self) -> &CreationStepper {
        &self.stepper
    }

    pub async fn navigate_to_settings(&self) -> E2eResult<()> {
        self.base.navigate(routes::SETTINGS).await
    }

    pub async fn navigate_to_form_creation(&self) -> E2eResult<()> {
        self.base.navigate(routes::digital_forms::CREATE).await
    }

    pub async fn navigate_to_form_list(&self) -> E2eResult<()> {
        self.base.navigate(routes::digital_forms::LIST).await
    }

    pub async fn verify_task_operations_visible(&self) -> E2eResult<()> {
        self.base.expect_visible(&self.task_operation_setting_menu).await
    }

    pub async fn verify_legacy_form_menu_hidden(&self) -> E2eResult<()> {
        self.base.page().expect(&self.digital_form_menu).to_be_hidden().await
    }

    pub async fn verify_legacy_form_menu_visible(&self) -> E2eResult<()> {
        self.base.expect_visible(&self.digital_form_menu).await
    }

    pub async fn verify_step_content_displayed(&self, expected_text: &str) -> E2eResult<()> {
        self.base.expect_visible(&Locator::text(expected_text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDriver;

    #[tokio::test]
    async fn test_leave_flow_goes_through_stepper() {
        let (driver, page) = RecordingDriver::page();
        let forms = DynamicFormPage::new(page);

        forms.navigate_to_form_creation().await.unwrap();
        forms.stepper().click_leave_button().await.unwrap();
        forms.stepper().verify_leave_modal_visible().await.unwrap();
        forms.stepper().click_leave_in_leave_modal().await.unwrap();

        assert_eq!(
            driver.ops(),
            vec!["goto", "scrollIntoView", "click", "expect", "scrollIntoView", "click"]
        );
    }
}
