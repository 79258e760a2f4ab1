//! Shared page-object behaviour
//!
//! Feature pages hold a `BasePage` and build on these helpers rather than
//! talking to the driver directly.

use std::path::PathBuf;
use tracing::debug;

use crate::driver::LoadState;
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::page::Page;

/// Where `take_screenshot` writes
pub const SCREENSHOT_DIR: &str = "test-results/screenshots";

#[derive(Debug, Clone)]
pub struct BasePage {
    page: Page,
}

impl BasePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn navigate(&self, path: &str) -> E2eResult<()> {
        debug!(path, "navigate");
        self.page.goto(path).await
    }

    pub async fn wait_for_page_load(&self) -> E2eResult<()> {
        self.page.wait_for_load_state(LoadState::NetworkIdle).await
    }

    /// Clear then fill, so stale input never survives
    pub async fn fill_input(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.page.clear(locator).await?;
        self.page.fill(locator, value).await
    }

    pub async fn expect_url(&self, pattern: &str) -> E2eResult<()> {
        self.page.expect_page().to_have_url(pattern).await
    }

    pub async fn expect_visible(&self, locator: &Locator) -> E2eResult<()> {
        self.page.expect(locator).to_be_visible().await
    }

    pub async fn expect_text(&self, locator: &Locator, text: &str) -> E2eResult<()> {
        self.page.expect(locator).to_have_text(text).await
    }

    pub async fn take_screenshot(&self, name: &str) -> E2eResult<PathBuf> {
        let path = PathBuf::from(SCREENSHOT_DIR).join(format!("{}.png", name));
        self.page.screenshot(&path, false).await
    }
}
