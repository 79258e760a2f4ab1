//! staffqa browser suite
//!
//! Drives Playwright from Rust through a small Node bridge and layers page
//! objects for the staffinc web app on top of it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  FeFixtures                                                   │
//! │    ├── setup() / authenticated() -> BrowserSession            │
//! │    ├── login_page(), form_creation_step1_page(), ...          │
//! │    └── teardown()                                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Page objects: BasePage <- AuthPage <- LoginPage, ...         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Page / Expect  ──  PageDriver trait                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  BrowserSession: node playwright-driver.cjs (JSON lines)      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod base_page;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod locator;
pub mod page;
pub mod pages;

#[cfg(test)]
pub(crate) mod testing;

pub use base_page::BasePage;
pub use driver::{Browser, BrowserConfig, BrowserSession, PageDriver};
pub use error::{E2eError, E2eResult};
pub use fixtures::FeFixtures;
pub use locator::Locator;
pub use page::{Expect, ExpectPage, Page};
