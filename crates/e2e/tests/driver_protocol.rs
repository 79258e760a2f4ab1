//! Session lifecycle against a scripted stand-in for the node bridge.
//! The fake speaks the same JSON-lines protocol, so no browser is needed.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use staffqa_e2e::{BrowserConfig, BrowserSession, E2eError, Locator};

const FAKE_DRIVER: &str = r#"#!/bin/sh
while IFS= read -r line; do
  id=$(printf '%s\n' "$line" | sed -n 's/^{"id":\([0-9]*\).*/\1/p')
  case "$line" in
    *'"op":"expect"'*)
      printf '{"id":%s,"ok":false,"error":"element is not visible","kind":"assertion"}\n' "$id" ;;
    *'"op":"isChecked"'*)
      printf '{"id":%s,"ok":true,"value":true}\n' "$id" ;;
    *'"op":"url"'*)
      echo "console noise from the page"
      printf '{"id":%s,"ok":true,"value":"http://localhost:3000/agents"}\n' "$id" ;;
    *'"op":"click"'*)
      printf '{"id":%s,"ok":false,"error":"Timeout 30000ms exceeded"}\n' "$id" ;;
    *'"op":"close"'*)
      printf '{"id":%s,"ok":true,"value":null}\n' "$id"
      exit 0 ;;
    *)
      printf '{"id":%s,"ok":true,"value":null}\n' "$id" ;;
  esac
done
"#;

const MISSING_PLAYWRIGHT: &str = r#"#!/bin/sh
read -r line
printf '{"id":1,"ok":false,"error":"@playwright/test is not installed","kind":"notFound"}\n'
"#;

const SILENT: &str = r#"#!/bin/sh
exec sleep 30
"#;

fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config_with(node: PathBuf, output: &Path) -> BrowserConfig {
    BrowserConfig {
        node,
        output_dir: output.to_path_buf(),
        launch_timeout: Duration::from_secs(10),
        ..BrowserConfig::default()
    }
}

#[tokio::test]
async fn session_round_trips_commands() {
    let tmp = TempDir::new().unwrap();
    let node = write_executable(tmp.path(), "fake-node", FAKE_DRIVER);
    let session = BrowserSession::launch(config_with(node, tmp.path())).await.unwrap();
    assert!(tmp.path().join(".driver/playwright-driver.cjs").exists());

    let page = session.page().clone();
    page.goto("/login").await.unwrap();
    assert!(page.is_checked(&Locator::test_id("toggle")).await.unwrap());
    assert_eq!(page.url().await.unwrap(), "http://localhost:3000/agents");

    session.close().await.unwrap();
}

#[tokio::test]
async fn driver_error_kinds_become_typed_errors() {
    let tmp = TempDir::new().unwrap();
    let node = write_executable(tmp.path(), "fake-node", FAKE_DRIVER);
    let session = BrowserSession::launch(config_with(node, tmp.path())).await.unwrap();
    let page = session.page();

    let err = page
        .expect(&Locator::test_id("login-email"))
        .to_be_visible()
        .await
        .unwrap_err();
    assert!(matches!(err, E2eError::AssertionFailed(ref m) if m == "element is not visible"));

    let err = page.click(&Locator::test_id("login-submit")).await.unwrap_err();
    assert!(matches!(err, E2eError::Playwright(_)));

    session.close().await.unwrap();
}

#[tokio::test]
async fn missing_node_binary_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(tmp.path().join("no-such-node"), tmp.path());
    let err = BrowserSession::launch(config).await.err().unwrap();
    assert!(matches!(err, E2eError::PlaywrightNotFound));
}

#[tokio::test]
async fn missing_playwright_package_is_reported() {
    let tmp = TempDir::new().unwrap();
    let node = write_executable(tmp.path(), "fake-node", MISSING_PLAYWRIGHT);
    let err = BrowserSession::launch(config_with(node, tmp.path())).await.err().unwrap();
    assert!(matches!(err, E2eError::PlaywrightNotFound));
}

#[tokio::test]
async fn unresponsive_driver_times_out_on_launch() {
    let tmp = TempDir::new().unwrap();
    let node = write_executable(tmp.path(), "fake-node", SILENT);
    let config = BrowserConfig {
        launch_timeout: Duration::from_millis(200),
        ..config_with(node, tmp.path())
    };
    let err = BrowserSession::launch(config).await.err().unwrap();
    assert!(matches!(err, E2eError::Timeout(_)));
}

#[tokio::test]
async fn commands_after_driver_exit_fail_cleanly() {
    let tmp = TempDir::new().unwrap();
    let node = write_executable(tmp.path(), "fake-node", FAKE_DRIVER);
    let session = BrowserSession::launch(config_with(node, tmp.path())).await.unwrap();
    let page = session.page().clone();

    session.close().await.unwrap();
    let err = page.goto("/login").await.unwrap_err();
    assert!(matches!(err, E2eError::Protocol(_)));
}
