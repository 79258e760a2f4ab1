//! Playwright browser automation
//!
//! Playwright only ships for Node, so a browser session is a long-lived
//! `node` child process running a small bridge script. The Rust side sends
//! one JSON command per line on stdin and reads one JSON reply per line on
//! stdout:
//!
//! ```text
//! -> {"id":3,"op":"click","locator":[{"by":"testId","id":"login-submit"}]}
//! <- {"id":3,"ok":true,"value":null}
//! -> {"id":4,"op":"expect","locator":[...],"assertion":{"name":"toBeVisible"},"negate":false}
//! <- {"id":4,"ok":false,"error":"...","kind":"assertion"}
//! ```
//!
//! Everything above this module talks to the [`PageDriver`] trait, so page
//! objects can be exercised against a recording fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as TokioCommand};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;
use crate::page::Page;
use staffqa_common::EnvConfig;

const DRIVER_SCRIPT: &str = include_str!("../js/playwright-driver.cjs");
const DRIVER_FILE: &str = "playwright-driver.cjs";

/// Env var naming the node binary
pub const NODE_ENV_VAR: &str = "STAFFQA_NODE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub browser: Browser,
    pub headless: bool,
    /// Delay between browser operations, in milliseconds
    pub slow_mo: u64,
    /// Relative `goto` targets resolve against this
    pub base_url: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Playwright storage-state file loaded into the context
    pub storage_state: Option<PathBuf>,
    pub extra_headers: HashMap<String, String>,
    /// Screenshots and the installed driver script live under here
    pub output_dir: PathBuf,
    pub node: PathBuf,
    pub launch_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            slow_mo: 0,
            base_url: "http://localhost:3000".to_string(),
            viewport_width: 1280,
            viewport_height: 720,
            storage_state: None,
            extra_headers: HashMap::new(),
            output_dir: PathBuf::from("test-results"),
            node: std::env::var_os(NODE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("node")),
            launch_timeout: Duration::from_secs(60),
        }
    }
}

impl BrowserConfig {
    /// Desktop Chrome against the configured frontend
    pub fn from_env(env: &EnvConfig) -> Self {
        Self {
            headless: env.headless,
            slow_mo: env.slow_mo,
            base_url: env.fe_base_url.clone(),
            ..Self::default()
        }
    }

    /// Send `Cookie: <cookie>` with every request of the context
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.extra_headers.insert("Cookie".to_string(), cookie.into());
        self
    }

    /// Seed the context from a storage-state file, e.g. the one written by
    /// `AuthCache::get_storage_state`
    pub fn with_storage_state(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_state = Some(path.into());
        self
    }

    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            browser: self.browser,
            headless: self.headless,
            slow_mo: self.slow_mo,
            base_url: self.base_url.clone(),
            viewport: Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            },
            storage_state: self.storage_state.clone(),
            extra_headers: self.extra_headers.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    pub browser: Browser,
    pub headless: bool,
    pub slow_mo: u64,
    pub base_url: String,
    pub viewport: Viewport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<PathBuf>,
    pub extra_headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Load,
    DomContentLoaded,
    NetworkIdle,
}

/// Web-first assertions, retried by Playwright until its expect timeout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Assertion {
    ToBeVisible,
    ToBeHidden,
    ToBeEnabled,
    ToBeDisabled,
    ToBeChecked,
    ToBeEmpty,
    ToHaveText { expected: String },
    ToHaveValue { expected: String },
    ToHaveUrl { pattern: String },
}

/// One driver operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    Launch(LaunchOptions),
    Goto {
        url: String,
    },
    WaitForLoadState {
        state: LoadState,
    },
    WaitForUrl {
        pattern: String,
        negate: bool,
    },
    WaitForTimeout {
        ms: u64,
    },
    Click {
        locator: Locator,
    },
    Fill {
        locator: Locator,
        value: String,
    },
    Clear {
        locator: Locator,
    },
    Blur {
        locator: Locator,
    },
    ScrollIntoView {
        locator: Locator,
    },
    IsChecked {
        locator: Locator,
    },
    InputValue {
        locator: Locator,
    },
    Url,
    Screenshot {
        path: PathBuf,
        #[serde(rename = "fullPage")]
        full_page: bool,
    },
    Expect {
        locator: Locator,
        assertion: Assertion,
        negate: bool,
    },
    ExpectPage {
        assertion: Assertion,
        negate: bool,
    },
    Close,
}

impl Command {
    /// Wire name of the operation
    pub fn op(&self) -> &'static str {
        match self {
            Command::Launch(_) => "launch",
            Command::Goto { .. } => "goto",
            Command::WaitForLoadState { .. } => "waitForLoadState",
            Command::WaitForUrl { .. } => "waitForUrl",
            Command::WaitForTimeout { .. } => "waitForTimeout",
            Command::Click { .. } => "click",
            Command::Fill { .. } => "fill",
            Command::Clear { .. } => "clear",
            Command::Blur { .. } => "blur",
            Command::ScrollIntoView { .. } => "scrollIntoView",
            Command::IsChecked { .. } => "isChecked",
            Command::InputValue { .. } => "inputValue",
            Command::Url => "url",
            Command::Screenshot { .. } => "screenshot",
            Command::Expect { .. } => "expect",
            Command::ExpectPage { .. } => "expectPage",
            Command::Close => "close",
        }
    }
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    id: u64,
    #[serde(flatten)]
    command: &'a Command,
}

#[derive(Debug, Deserialize)]
struct Response {
    id: u64,
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

impl Response {
    fn into_result(self, command: &Command) -> E2eResult<Value> {
        if self.ok {
            return Ok(self.value);
        }
        let message = self
            .error
            .unwrap_or_else(|| format!("{} failed without a message", command.op()));
        Err(match self.kind.as_deref() {
            Some("assertion") => E2eError::AssertionFailed(message),
            Some("notFound") => E2eError::PlaywrightNotFound,
            _ => E2eError::Playwright(message),
        })
    }
}

/// Executes page commands. Implemented by the node bridge; tests substitute
/// a recording fake.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn send(&self, command: Command) -> E2eResult<Value>;
}

struct DriverIo {
    stdin: Option<ChildStdin>,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

/// The node child process and its pipes
struct DriverProcess {
    io: Mutex<DriverIo>,
    child: Mutex<Child>,
}

impl DriverProcess {
    async fn spawn(config: &BrowserConfig) -> E2eResult<Self> {
        let script = install_script(&config.output_dir)?;
        debug!("Starting Playwright driver: {} {}", config.node.display(), script.display());

        let mut child = TokioCommand::new(&config.node)
            .arg(&script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => E2eError::PlaywrightNotFound,
                _ => E2eError::Io(e),
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Protocol("driver stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| E2eError::Protocol("driver stdout not captured".to_string()))?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "playwright", "{}", line);
                }
            });
        }

        Ok(Self {
            io: Mutex::new(DriverIo {
                stdin: Some(stdin),
                stdout: BufReader::new(stdout).lines(),
                next_id: 1,
            }),
            child: Mutex::new(child),
        })
    }

    /// Stop accepting commands and reap the process. Escalates to SIGTERM
    /// and then SIGKILL if the driver does not exit on its own.
    async fn shutdown(&self) -> E2eResult<()> {
        self.io.lock().await.stdin = None;

        let mut child = self.child.lock().await;
        if let Ok(status) = tokio::time::timeout(Duration::from_secs(5), child.wait()).await {
            debug!("Playwright driver exited: {:?}", status?);
            return Ok(());
        }

        warn!("Playwright driver did not exit, terminating");
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id() {
                let terminated = kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_ok()
                    && tokio::time::timeout(Duration::from_millis(500), child.wait())
                        .await
                        .is_ok();
                if terminated {
                    return Ok(());
                }
            }
        }
        child.kill().await?;
        Ok(())
    }
}

#[async_trait]
impl PageDriver for DriverProcess {
    async fn send(&self, command: Command) -> E2eResult<Value> {
        let mut io = self.io.lock().await;
        let id = io.next_id;
        io.next_id += 1;

        let mut line = serde_json::to_string(&Request { id, command: &command })?;
        line.push('\n');
        debug!(id, op = command.op(), "driver request");

        let stdin = io
            .stdin
            .as_mut()
            .ok_or_else(|| E2eError::Protocol("browser session is closed".to_string()))?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;

        loop {
            let Some(raw) = io.stdout.next_line().await? else {
                return Err(E2eError::Protocol(format!(
                    "driver exited while waiting for {}",
                    command.op()
                )));
            };
            match serde_json::from_str::<Response>(&raw) {
                Ok(response) if response.id == id => return response.into_result(&command),
                Ok(response) => warn!(id = response.id, "discarding stale driver reply"),
                // Playwright or the page may print to stdout
                Err(_) => debug!(target: "playwright", "{}", raw),
            }
        }
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        if let Ok(mut child) = self.child.try_lock() {
            let _ = child.start_kill();
        }
    }
}

/// Write the bridge script under `<output_dir>/.driver/`. Parallel tests
/// share the file, so it is replaced atomically.
fn install_script(output_dir: &Path) -> E2eResult<PathBuf> {
    let dir = output_dir.join(".driver");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(DRIVER_FILE);

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    std::io::Write::write_all(&mut tmp, DRIVER_SCRIPT.as_bytes())?;
    tmp.persist(&path).map_err(|e| E2eError::Io(e.error))?;
    Ok(path)
}

/// A launched browser with one context and one page
pub struct BrowserSession {
    process: Arc<DriverProcess>,
    page: Page,
    screenshot_dir: PathBuf,
}

impl BrowserSession {
    pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
        let screenshot_dir = config.output_dir.join("screenshots");
        std::fs::create_dir_all(&screenshot_dir)?;

        let process = Arc::new(DriverProcess::spawn(&config).await?);
        let launch = Command::Launch(config.launch_options());

        match tokio::time::timeout(config.launch_timeout, process.send(launch)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                let _ = process.shutdown().await;
                return Err(e);
            }
            Err(_) => {
                let _ = process.shutdown().await;
                return Err(E2eError::Timeout(format!("{} launch", config.browser.as_str())));
            }
        }

        info!(
            browser = config.browser.as_str(),
            headless = config.headless,
            base_url = %config.base_url,
            "Browser session started"
        );

        let driver: Arc<dyn PageDriver> = process.clone();
        Ok(Self {
            process,
            page: Page::new(driver),
            screenshot_dir,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Close the context and the browser, then wait for the driver to exit
    pub async fn close(self) -> E2eResult<()> {
        let closed = self.process.send(Command::Close).await;
        let shutdown = self.process.shutdown().await;
        info!("Browser session closed");
        closed?;
        shutdown
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn send(&self, command: Command) -> E2eResult<Value> {
        self.process.send(command).await
    }
}
