//! Page handle and web-first expectations

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::driver::{Assertion, Command, LoadState, PageDriver};
use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;

/// The single page of a browser context. Cheap to clone; all clones drive
/// the same tab.
#[derive(Clone)]
pub struct Page {
    driver: Arc<dyn PageDriver>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

/// Inline flag groups and `(?P<name>`: Rust-only, a SyntaxError in JavaScript
static RUST_ONLY_SYNTAX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?:^|[^\\])\(\?(?:P<|[imsxuU-]+[:)])"));

/// Lookarounds and backreferences: valid JavaScript the regex crate lacks
static JS_ONLY_SYNTAX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?:^|[^\\])\(\?<?[=!]|\\[1-9]|\\k<"));

/// URL patterns are JavaScript regexes on the driver side. This is a
/// best-effort check over the syntax both engines share: patterns using
/// lookarounds or backreferences go to the browser unchecked.
fn check_pattern(pattern: &str) -> E2eResult<()> {
    let invalid = |reason: String| {
        E2eError::Protocol(format!("invalid URL pattern {:?}: {}", pattern, reason))
    };
    let matcher = |syntax: &'static Lazy<Result<Regex, regex::Error>>| {
        syntax
            .as_ref()
            .map(|re| re.is_match(pattern))
            .map_err(|e| invalid(e.to_string()))
    };

    if matcher(&RUST_ONLY_SYNTAX)? {
        return Err(invalid("inline flags are not JavaScript syntax".to_string()));
    }
    if matcher(&JS_ONLY_SYNTAX)? {
        return Ok(());
    }
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| invalid(e.to_string()))
}

impl Page {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    async fn run(&self, command: Command) -> E2eResult<Value> {
        self.driver.send(command).await
    }

    pub fn locator(&self, selector: &str) -> Locator {
        Locator::css(selector)
    }

    pub fn get_by_test_id(&self, id: &str) -> Locator {
        Locator::test_id(id)
    }

    pub fn get_by_text(&self, text: &str) -> Locator {
        Locator::text(text)
    }

    pub fn get_by_role(&self, role: &str, name: Option<&str>) -> Locator {
        Locator::role(role, name)
    }

    /// Navigate; relative paths resolve against the session base URL
    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        self.run(Command::Goto { url: url.to_string() }).await?;
        Ok(())
    }

    pub async fn wait_for_load_state(&self, state: LoadState) -> E2eResult<()> {
        self.run(Command::WaitForLoadState { state }).await?;
        Ok(())
    }

    /// Wait until the URL matches `pattern`, or with `negate` until it no
    /// longer does
    pub async fn wait_for_url(&self, pattern: &str, negate: bool) -> E2eResult<()> {
        check_pattern(pattern)?;
        self.run(Command::WaitForUrl {
            pattern: pattern.to_string(),
            negate,
        })
        .await?;
        Ok(())
    }

    pub async fn wait_for_timeout(&self, ms: u64) -> E2eResult<()> {
        self.run(Command::WaitForTimeout { ms }).await?;
        Ok(())
    }

    pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
        self.run(Command::Click {
            locator: locator.clone(),
        })
        .await?;
        Ok(())
    }

    pub async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.run(Command::Fill {
            locator: locator.clone(),
            value: value.to_string(),
        })
        .await?;
        Ok(())
    }

    pub async fn clear(&self, locator: &Locator) -> E2eResult<()> {
        self.run(Command::Clear {
            locator: locator.clone(),
        })
        .await?;
        Ok(())
    }

    pub async fn blur(&self, locator: &Locator) -> E2eResult<()> {
        self.run(Command::Blur {
            locator: locator.clone(),
        })
        .await?;
        Ok(())
    }

    /// Scroll only if the element is outside the viewport
    pub async fn scroll_into_view(&self, locator: &Locator) -> E2eResult<()> {
        self.run(Command::ScrollIntoView {
            locator: locator.clone(),
        })
        .await?;
        Ok(())
    }

    pub async fn is_checked(&self, locator: &Locator) -> E2eResult<bool> {
        let value = self
            .run(Command::IsChecked {
                locator: locator.clone(),
            })
            .await?;
        value
            .as_bool()
            .ok_or_else(|| E2eError::Protocol(format!("isChecked returned {}", value)))
    }

    pub async fn input_value(&self, locator: &Locator) -> E2eResult<String> {
        let value = self
            .run(Command::InputValue {
                locator: locator.clone(),
            })
            .await?;
        match value {
            Value::String(s) => Ok(s),
            other => Err(E2eError::Protocol(format!("inputValue returned {}", other))),
        }
    }

    pub async fn url(&self) -> E2eResult<String> {
        match self.run(Command::Url).await? {
            Value::String(s) => Ok(s),
            other => Err(E2eError::Protocol(format!("url returned {}", other))),
        }
    }

    pub async fn screenshot(&self, path: &Path, full_page: bool) -> E2eResult<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.run(Command::Screenshot {
            path: path.to_path_buf(),
            full_page,
        })
        .await?;
        Ok(path.to_path_buf())
    }

    pub fn expect(&self, locator: &Locator) -> Expect {
        Expect {
            page: self.clone(),
            locator: locator.clone(),
            negate: false,
        }
    }

    pub fn expect_page(&self) -> ExpectPage {
        ExpectPage {
            page: self.clone(),
            negate: false,
        }
    }
}

/// `expect(locator)`
#[must_use = "expectations do nothing until an assertion is awaited"]
pub struct Expect {
    page: Page,
    locator: Locator,
    negate: bool,
}

impl Expect {
    /// Invert the next assertion
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    async fn assert(self, assertion: Assertion) -> E2eResult<()> {
        self.page
            .run(Command::Expect {
                locator: self.locator,
                assertion,
                negate: self.negate,
            })
            .await?;
        Ok(())
    }

    pub async fn to_be_visible(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeVisible).await
    }

    pub async fn to_be_hidden(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeHidden).await
    }

    pub async fn to_be_enabled(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeEnabled).await
    }

    pub async fn to_be_disabled(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeDisabled).await
    }

    pub async fn to_be_checked(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeChecked).await
    }

    pub async fn to_be_empty(self) -> E2eResult<()> {
        self.assert(Assertion::ToBeEmpty).await
    }

    /// Full text match
    pub async fn to_have_text(self, expected: &str) -> E2eResult<()> {
        self.assert(Assertion::ToHaveText {
            expected: expected.to_string(),
        })
        .await
    }

    pub async fn to_have_value(self, expected: &str) -> E2eResult<()> {
        self.assert(Assertion::ToHaveValue {
            expected: expected.to_string(),
        })
        .await
    }
}

/// `expect(page)`
#[must_use = "expectations do nothing until an assertion is awaited"]
pub struct ExpectPage {
    page: Page,
    negate: bool,
}

impl ExpectPage {
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// The current URL matches the regex `pattern`
    pub async fn to_have_url(self, pattern: &str) -> E2eResult<()> {
        check_pattern(pattern)?;
        self.page
            .run(Command::ExpectPage {
                assertion: Assertion::ToHaveUrl {
                    pattern: pattern.to_string(),
                },
                negate: self.negate,
            })
            .await?;
        Ok(())
    }
}
