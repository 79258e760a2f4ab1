//! Digital form creation, step 1. See `login.rs` for requirements; the
//! whitelisted PK136 account and the main account must be set.

use staffqa_common::constants::routes;
use staffqa_common::generators::{create_long_text, BasicInformationData};
use staffqa_common::Credentials;
use staffqa_e2e::pages::{FormCreationStep1Page, LimitBasedOn};
use staffqa_e2e::{E2eError, E2eResult, FeFixtures};

const REQUIRED_FIELD_ERROR: &str = "Please provide data in the required field.";
const LEAVE_CONFIRMATION: &str = "Are you sure you want to leave this page?";

/// Log in and open the creation page
async fn open_creation(
    fx: &FeFixtures,
    credentials: &Credentials,
) -> E2eResult<FormCreationStep1Page> {
    let login = fx.login_page();
    login.visit().await?;
    login.login(&credentials.email, &credentials.password).await?;
    login.wait_for_change_route().await?;

    let form = fx.form_creation_step1_page();
    form.navigate_to_form_creation().await?;
    Ok(form)
}

async fn whitelisted(fx: &FeFixtures) -> E2eResult<FormCreationStep1Page> {
    let credentials = fx.env.credentials.pk136_whitelisted.clone();
    open_creation(fx, &credentials).await
}

mod setup {
    use super::*;

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn ts1_stepper_displays_on_page_load() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.stepper().verify_stepper_visible().await?;
        form.stepper().verify_all_steps_visible().await?;
        form.verify_step_content_displayed("Basic Information").await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn ts2_cancel_in_leave_modal_keeps_user_on_page() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let stepper = form.stepper();

        stepper.click_leave_button().await?;
        stepper.verify_leave_modal_visible().await?;
        fx.page()
            .expect(&stepper.leave_modal_content_title)
            .to_have_text(LEAVE_CONFIRMATION)
            .await?;

        stepper.click_cancel_in_leave_modal().await?;
        stepper.verify_leave_modal_hidden().await?;
        fx.page()
            .expect_page()
            .to_have_url(routes::digital_forms::CREATE)
            .await?;
        stepper.verify_stepper_visible().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn ts3_leave_in_leave_modal_redirects_to_list() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let main = fx.env.credentials.main.clone();
        let form = open_creation(&fx, &main).await?;

        form.stepper().click_leave_button().await?;
        form.stepper().verify_leave_modal_visible().await?;
        form.stepper().click_leave_in_leave_modal().await?;
        fx.page()
            .expect_page()
            .to_have_url(routes::digital_forms::LIST)
            .await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn ts4_fields_start_empty() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let page = fx.page();

        page.expect(&form.form_name_input).to_be_empty().await?;
        page.expect(&form.form_description_textarea).to_be_empty().await?;
        for toggle in [
            &form.training_material_toggle,
            &form.editable_submission_toggle,
            &form.needs_approval_toggle,
            &form.set_as_temporary_toggle,
            &form.set_limit_toggle,
        ] {
            page.expect(toggle).not().to_be_checked().await?;
        }

        form.verify_training_fields_hidden().await?;
        form.verify_active_period_fields_hidden().await?;
        form.verify_limit_fields_hidden().await?;

        fx.teardown().await
    }
}

mod basic_information {
    use super::*;

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc1_name_and_description_accept_valid_input() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.fill_form_description(&data.form_description).await?;

        fx.page().expect(&form.form_name_input).to_have_value(&data.form_name).await?;
        fx.page()
            .expect(&form.form_description_textarea)
            .to_have_value(&data.form_description)
            .await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc2_name_is_required() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();
        let page = fx.page();

        form.fill_form_description(&data.form_description).await?;
        form.verify_next_button_disabled().await?;

        page.fill(&form.form_name_input, "Test").await?;
        page.clear(&form.form_name_input).await?;
        page.blur(&form.form_name_input).await?;
        form.verify_field_error(REQUIRED_FIELD_ERROR).await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc2_1_name_is_capped_at_250_chars() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.fill_form_name(&create_long_text(250)).await?;
        let value = fx.page().input_value(&form.form_name_input).await?;
        if value.chars().count() > 250 {
            return Err(E2eError::AssertionFailed(format!(
                "form name accepted {} chars",
                value.chars().count()
            )));
        }

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc2_2_description_is_capped_at_1000_chars() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.fill_form_description(&create_long_text(1000)).await?;
        let value = fx.page().input_value(&form.form_description_textarea).await?;
        if value.chars().count() > 1000 {
            return Err(E2eError::AssertionFailed(format!(
                "description accepted {} chars",
                value.chars().count()
            )));
        }
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc3_training_toggle_shows_and_hides_fields() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.verify_training_fields_hidden().await?;
        form.toggle_training_material(true).await?;
        form.verify_training_fields_visible().await?;
        form.toggle_training_material(false).await?;
        form.verify_training_fields_hidden().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc4_training_fields_required_when_enabled() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.toggle_training_material(true).await?;
        form.verify_next_button_disabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc5_training_fields_accept_limits() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();
        let long_title = create_long_text(140);

        form.fill_form_name(&data.form_name).await?;
        form.toggle_training_material(true).await?;
        form.fill_training_title(&long_title).await?;
        form.fill_training_description(&create_long_text(250)).await?;
        form.fill_training_video_url(&data.training_video_url).await?;

        fx.page().expect(&form.training_title_input).to_have_value(&long_title).await?;
        fx.page()
            .expect(&form.training_video_url_input)
            .to_have_value(&data.training_video_url)
            .await?;
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc6_tc7_modification_toggles_default_off_and_disabled() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.verify_editable_submission_disabled().await?;
        form.verify_editable_submission_unchecked().await?;
        form.verify_needs_approval_disabled().await?;
        form.verify_needs_approval_unchecked().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc8_temporary_toggle_shows_active_period() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.verify_active_period_fields_hidden().await?;
        form.toggle_set_as_temporary(true).await?;
        form.verify_active_period_fields_visible().await?;
        form.toggle_set_as_temporary(false).await?;
        form.verify_active_period_fields_hidden().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc9_limit_toggle_shows_limit_fields() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;

        form.verify_limit_fields_hidden().await?;
        form.toggle_set_limit(true).await?;
        form.verify_limit_fields_visible().await?;
        form.toggle_set_limit(false).await?;
        form.verify_limit_fields_hidden().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc10_limit_value_accepts_positive_integer() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.toggle_set_limit(true).await?;
        form.select_limit_based_on(LimitBasedOn::Day).await?;
        form.fill_limit_value(10).await?;
        fx.page().expect(&form.limit_value_input).to_have_value("10").await?;
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc11_tc12_next_button_follows_mandatory_fields() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.verify_next_button_disabled().await?;
        form.fill_form_name(&data.form_name).await?;
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc13_complete_form_with_all_sections() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.fill_form_description(&data.form_description).await?;
        form.toggle_training_material(true).await?;
        form.fill_training_title(&data.training_title).await?;
        form.fill_training_description(&data.training_description).await?;
        form.fill_training_video_url(&data.training_video_url).await?;
        form.toggle_set_limit(true).await?;
        form.select_limit_based_on(LimitBasedOn::Form).await?;
        form.fill_limit_value(100).await?;
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc14_training_material_with_optional_fields() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();

        form.fill_form_name(&data.form_name).await?;
        form.toggle_training_material(true).await?;
        form.fill_training_title(&data.training_title).await?;
        form.fill_training_description(&data.training_description).await?;
        form.fill_training_video_url(&data.training_video_url).await?;
        form.verify_next_button_enabled().await?;

        fx.teardown().await
    }

    #[tokio::test]
    #[ignore = "requires the frontend and Playwright"]
    async fn tc15_limit_based_on_switches_between_day_and_form() -> E2eResult<()> {
        let fx = FeFixtures::setup().await?;
        let form = whitelisted(&fx).await?;
        let data = BasicInformationData::generate();
        let page = fx.page();

        form.fill_form_name(&data.form_name).await?;
        form.toggle_set_limit(true).await?;

        form.select_limit_based_on(LimitBasedOn::Day).await?;
        page.expect(form.limit_radio(LimitBasedOn::Day)).to_be_checked().await?;

        form.select_limit_based_on(LimitBasedOn::Form).await?;
        page.expect(form.limit_radio(LimitBasedOn::Form)).to_be_checked().await?;
        page.expect(form.limit_radio(LimitBasedOn::Day)).not().to_be_checked().await?;

        fx.teardown().await
    }
}
