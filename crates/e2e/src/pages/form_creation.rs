//! Digital form creation, step 1 (basic configuration)

use staffqa_common::constants::routes;
use tracing::debug;

use crate::base_page::BasePage;
use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;
use crate::page::Page;

/// Pause after the temporary toggle while the active-period inputs render
const TEMPORARY_RENDER_MS: u64 = 500;

/// Five-step header and the leave-confirmation modal shown on every step of
/// the creation flow
#[derive(Debug, Clone)]
pub struct CreationStepper {
    page: Page,
    pub stepper: Locator,
    /// Step 1 through 5, in order
    pub steps: [Locator; 5],
    pub leave_button: Locator,
    pub leave_modal_title: Locator,
    pub leave_modal_cancel_button: Locator,
    pub leave_modal_leave_button: Locator,
    pub leave_modal_content_title: Locator,
}

impl CreationStepper {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            stepper: Locator::test_id("form-creation-stepper"),
            steps: [
                Locator::test_id("create_form-stepper_1-basic_configuration-button"),
                Locator::test_id("create_form-stepper_2-form_builder-button"),
                Locator::test_id("create_form-stepper_3-logic_jump-button"),
                Locator::test_id("create_form-stepper_4-preview-button"),
                Locator::test_id("create_form-stepper_5-form_assignment-button"),
            ],
            leave_button: Locator::test_id("create_form-leave-button"),
            leave_modal_title: Locator::test_id("form-creation-leave-confirmation-modal-title"),
            leave_modal_cancel_button: Locator::test_id(
                "form-creation-leave-confirmation-modal-cancel-btn",
            ),
            leave_modal_leave_button: Locator::test_id(
                "form-creation-leave-confirmation-modal-leave-btn",
            ),
            leave_modal_content_title: Locator::test_id(
                "form-creation-leave-confirmation-modal-content-title",
            ),
        }
    }

    /// Button for a 1-based step number
    pub fn step_button(&self, step: usize) -> Option<&Locator> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    async fn scroll_and_click(&self, locator: &Locator) -> E2eResult<()> {
        self.page.scroll_into_view(locator).await?;
        self.page.click(locator).await
    }

    pub async fn verify_stepper_visible(&self) -> E2eResult<()> {
        self.page.expect(&self.stepper).to_be_visible().await
    }

    pub async fn verify_all_steps_visible(&self) -> E2eResult<()> {
        for step in &self.steps {
            self.page.expect(step).to_be_visible().await?;
        }
        Ok(())
    }

    /// Steps 2 to 5 stay locked until step 1 is complete
    pub async fn verify_step_disabled(&self, step: usize) -> E2eResult<()> {
        let button = match step {
            2..=5 => self.step_button(step),
            _ => None,
        }
        .ok_or_else(|| E2eError::AssertionFailed(format!("no lockable step {}", step)))?;
        self.page.expect(button).to_be_disabled().await
    }

    pub async fn click_leave_button(&self) -> E2eResult<()> {
        self.scroll_and_click(&self.leave_button).await
    }

    pub async fn verify_leave_modal_visible(&self) -> E2eResult<()> {
        self.page.expect(&self.leave_modal_title).to_be_visible().await
    }

    pub async fn verify_leave_modal_hidden(&self) -> E2eResult<()> {
        self.page.expect(&self.leave_modal_title).to_be_hidden().await
    }

    pub async fn click_cancel_in_leave_modal(&self) -> E2eResult<()> {
        self.scroll_and_click(&self.leave_modal_cancel_button).await
    }

    pub async fn click_leave_in_leave_modal(&self) -> E2eResult<()> {
        self.scroll_and_click(&self.leave_modal_leave_button).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBasedOn {
    Day,
    Form,
}

impl LimitBasedOn {
    pub fn label(&self) -> &'static str {
        match self {
            LimitBasedOn::Day => "Day",
            LimitBasedOn::Form => "Form",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormCreationStep1Page {
    base: BasePage,
    stepper: CreationStepper,

    // Basic information
    pub form_name_input: Locator,
    pub form_description_textarea: Locator,
    pub next_button: Locator,

    // Training material
    pub training_material_toggle: Locator,
    pub training_title_input: Locator,
    pub training_attachment_picker: Locator,
    pub training_video_url_input: Locator,
    pub training_description_editor: Locator,

    // Modification and approval
    pub editable_submission_toggle: Locator,
    pub needs_approval_toggle: Locator,

    // Availability and target
    pub set_as_temporary_toggle: Locator,
    pub active_period_input_group: Locator,
    pub set_limit_toggle: Locator,
    pub limit_based_on_day_radio: Locator,
    pub limit_based_on_form_radio: Locator,
    pub limit_value_input: Locator,
}

impl FormCreationStep1Page {
    pub fn new(page: Page) -> Self {
        let limit_radio =
            Locator::test_id("create_form-step_1-form_availability-limit_based_on-form-radio");
        Self {
            stepper: CreationStepper::new(page.clone()),
            base: BasePage::new(page),

            form_name_input: Locator::test_id(
                "create_form-step_1-basic_information-form_name-textarea",
            ),
            form_description_textarea: Locator::test_id(
                "create_form-step_1-basic_information-form_description-textarea",
            ),
            next_button: Locator::test_id("create_form-step_1-basic_information-next-button"),

            training_material_toggle: Locator::test_id(
                "create_form-step_1-training_material-training_material-switch",
            ),
            training_title_input: Locator::test_id(
                "create_form-step_1-training_material-training_title-textarea",
            ),
            training_attachment_picker: Locator::test_id(
                "create_form-step_1-training_material-training_attachment-file_picker",
            ),
            training_video_url_input: Locator::test_id(
                "create_form-step_1-training_material-training_video_url-textfield",
            ),
            // Draft.js editor, no test id
            training_description_editor: Locator::role("textbox", Some("rdw-editor")),

            editable_submission_toggle: Locator::test_id("editable-submission-toggle"),
            needs_approval_toggle: Locator::test_id("needs-approval-toggle"),

            set_as_temporary_toggle: Locator::test_id(
                "create_form-step_1-form_availability-set_as_temporary-switch",
            ),
            active_period_input_group: Locator::test_id("active-period-input-wrapper"),
            set_limit_toggle: Locator::test_id(
                "create_form-step_1-form_availability-set_limit-switch",
            ),
            limit_based_on_day_radio: limit_radio.clone().get_by_text(LimitBasedOn::Day.label()),
            limit_based_on_form_radio: limit_radio.get_by_text(LimitBasedOn::Form.label()),
            limit_value_input: Locator::test_id(
                "create_form-step_1-form_availability-value-number",
            ),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub fn stepper(&self) -> &CreationStepper {
        &self.stepper
    }

    fn page(&self) -> &Page {
        self.base.page()
    }

    async fn scroll_and_fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.page().scroll_into_view(locator).await?;
        self.page().fill(locator, value).await
    }

    async fn scroll_and_click(&self, locator: &Locator) -> E2eResult<()> {
        self.page().scroll_into_view(locator).await?;
        self.page().click(locator).await
    }

    /// Click `toggle` only when its state differs from `enable`.
    /// Returns whether it was clicked.
    async fn set_toggle(&self, toggle: &Locator, enable: bool) -> E2eResult<bool> {
        let checked = self.page().is_checked(toggle).await?;
        if checked == enable {
            debug!(%toggle, enable, "toggle already in state");
            return Ok(false);
        }
        self.scroll_and_click(toggle).await?;
        Ok(true)
    }

    async fn expect_all_visible(&self, locators: &[&Locator]) -> E2eResult<()> {
        for locator in locators {
            self.page().expect(locator).to_be_visible().await?;
        }
        Ok(())
    }

    async fn expect_all_hidden(&self, locators: &[&Locator]) -> E2eResult<()> {
        for locator in locators {
            self.page().expect(locator).to_be_hidden().await?;
        }
        Ok(())
    }

    pub async fn navigate_to_form_creation(&self) -> E2eResult<()> {
        self.base.navigate(routes::digital_forms::CREATE).await
    }

    pub async fn verify_step_content_displayed(&self, expected_text: &str) -> E2eResult<()> {
        self.page()
            .expect(&Locator::text(expected_text))
            .to_be_visible()
            .await
    }

    pub async fn fill_form_name(&self, form_name: &str) -> E2eResult<()> {
        self.scroll_and_fill(&self.form_name_input, form_name).await
    }

    pub async fn fill_form_description(&self, description: &str) -> E2eResult<()> {
        self.scroll_and_fill(&self.form_description_textarea, description)
            .await
    }

    pub async fn verify_next_button_disabled(&self) -> E2eResult<()> {
        self.page().expect(&self.next_button).to_be_disabled().await
    }

    pub async fn verify_next_button_enabled(&self) -> E2eResult<()> {
        self.page().expect(&self.next_button).to_be_enabled().await
    }

    pub async fn click_next_button(&self) -> E2eResult<()> {
        self.scroll_and_click(&self.next_button).await
    }

    /// Inline validation message anywhere on the page
    pub async fn verify_field_error(&self, message: &str) -> E2eResult<()> {
        self.page().expect(&Locator::text(message)).to_be_visible().await
    }

    pub async fn toggle_training_material(&self, enable: bool) -> E2eResult<()> {
        self.set_toggle(&self.training_material_toggle, enable).await?;
        Ok(())
    }

    pub async fn verify_training_fields_visible(&self) -> E2eResult<()> {
        self.expect_all_visible(&[
            &self.training_title_input,
            &self.training_attachment_picker,
            &self.training_video_url_input,
            &self.training_description_editor,
        ])
        .await
    }

    pub async fn verify_training_fields_hidden(&self) -> E2eResult<()> {
        self.expect_all_hidden(&[
            &self.training_title_input,
            &self.training_attachment_picker,
            &self.training_video_url_input,
            &self.training_description_editor,
        ])
        .await
    }

    pub async fn fill_training_title(&self, title: &str) -> E2eResult<()> {
        self.scroll_and_fill(&self.training_title_input, title).await
    }

    pub async fn fill_training_video_url(&self, url: &str) -> E2eResult<()> {
        self.scroll_and_fill(&self.training_video_url_input, url).await
    }

    /// The rich-text editor needs focus before it accepts input
    pub async fn fill_training_description(&self, description: &str) -> E2eResult<()> {
        let editor = &self.training_description_editor;
        self.scroll_and_click(editor).await?;
        self.page().fill(editor, description).await
    }

    pub async fn verify_editable_submission_disabled(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.editable_submission_toggle)
            .to_be_disabled()
            .await
    }

    pub async fn verify_needs_approval_disabled(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.needs_approval_toggle)
            .to_be_disabled()
            .await
    }

    pub async fn verify_editable_submission_unchecked(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.editable_submission_toggle)
            .not()
            .to_be_checked()
            .await
    }

    pub async fn verify_needs_approval_unchecked(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.needs_approval_toggle)
            .not()
            .to_be_checked()
            .await
    }

    pub async fn toggle_set_as_temporary(&self, enable: bool) -> E2eResult<()> {
        if self.set_toggle(&self.set_as_temporary_toggle, enable).await? {
            self.page().wait_for_timeout(TEMPORARY_RENDER_MS).await?;
        }
        Ok(())
    }

    pub async fn verify_active_period_fields_visible(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.active_period_input_group)
            .to_be_visible()
            .await
    }

    pub async fn verify_active_period_fields_hidden(&self) -> E2eResult<()> {
        self.page()
            .expect(&self.active_period_input_group)
            .to_be_hidden()
            .await
    }

    pub async fn toggle_set_limit(&self, enable: bool) -> E2eResult<()> {
        self.set_toggle(&self.set_limit_toggle, enable).await?;
        Ok(())
    }

    pub async fn verify_limit_fields_visible(&self) -> E2eResult<()> {
        self.expect_all_visible(&[
            &self.limit_based_on_day_radio,
            &self.limit_based_on_form_radio,
            &self.limit_value_input,
        ])
        .await
    }

    pub async fn verify_limit_fields_hidden(&self) -> E2eResult<()> {
        self.expect_all_hidden(&[
            &self.limit_based_on_day_radio,
            &self.limit_based_on_form_radio,
            &self.limit_value_input,
        ])
        .await
    }

    pub fn limit_radio(&self, based_on: LimitBasedOn) -> &Locator {
        match based_on {
            LimitBasedOn::Day => &self.limit_based_on_day_radio,
            LimitBasedOn::Form => &self.limit_based_on_form_radio,
        }
    }

    pub async fn select_limit_based_on(&self, based_on: LimitBasedOn) -> E2eResult<()> {
        self.scroll_and_click(self.limit_radio(based_on)).await
    }

    pub async fn fill_limit_value(&self, value: u32) -> E2eResult<()> {
        self.scroll_and_fill(&self.limit_value_input, &value.to_string())
            .await
    }

    pub async fn wait_for_timeout(&self, ms: u64) -> E2eResult<()> {
        self.page().wait_for_timeout(ms).await
    }
}
