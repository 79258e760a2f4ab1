//! On-disk cache of authentication artifacts
//!
//! Logging in once per day is enough for the whole suite. The bearer token
//! and a browser storage-state document are kept under the auth directory
//! and reused while their modification time is inside the freshness window.
//!
//! Refreshes are serialized per cache file: an in-process async mutex covers
//! parallel tests in one binary and an advisory `flock` on `<file>.lock`
//! covers parallel test binaries. Freshness is checked again once the lock is
//! held. New artifacts are written to a temp file and renamed into place, so
//! readers only ever see a complete document.

use once_cell::sync::Lazy;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::AuthApi;
use crate::client::{ApiContext, BaseApi};
use staffqa_common::{EnvConfig, Error, Result};

/// Artifacts older than this are regenerated
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

pub const TOKEN_FILE: &str = "token.json";
pub const STATE_FILE: &str = "state.json";

/// Name of the cookie the frontend reads the session from
pub const TOKEN_COOKIE: &str = "token";

static REFRESH_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

/// `token.json` contents
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenDocument {
    token: String,
}

/// Browser storage state as Playwright reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageState {
    pub cookies: Vec<Cookie>,
    pub origins: Vec<OriginState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Unix seconds; `-1` is a session cookie
    pub expires: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
    pub origin: String,
    pub local_storage: Vec<StorageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    pub value: String,
}

impl StorageState {
    /// Single session cookie carrying the token, scoped to `url`'s host
    pub fn with_token(url: &str, token: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::Config(format!("URL has no host: {}", url)))?;

        Ok(Self {
            cookies: vec![Cookie {
                name: TOKEN_COOKIE.to_string(),
                value: token.to_string(),
                domain: host.to_string(),
                path: "/".to_string(),
                expires: -1,
                http_only: false,
                secure: false,
                same_site: "Lax".to_string(),
            }],
            origins: Vec::new(),
        })
    }
}

/// Cache of the main account's auth artifacts
#[derive(Debug, Clone)]
pub struct AuthCache {
    config: EnvConfig,
    dir: PathBuf,
    max_age: Duration,
}

impl AuthCache {
    /// Cache rooted at the configured auth directory
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            config: config.clone(),
            dir: config.auth_dir.clone(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Bearer token for the main account, logging in only when the cached
    /// token is missing or stale.
    pub async fn get_auth_token(&self) -> Result<String> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.token_path();

        if let Some(token) = self.read_fresh_token(&path).await? {
            debug!("Using cached token from {}", path.display());
            return Ok(token);
        }

        let _guard = RefreshGuard::acquire(&path).await?;
        if let Some(token) = self.read_fresh_token(&path).await? {
            debug!("Token refreshed by another worker");
            return Ok(token);
        }

        let token = self.login().await?;
        let document = TokenDocument { token: token.clone() };
        write_atomic(&path, &serde_json::to_vec(&document)?).await?;

        info!("Cached new auth token at {}", path.display());
        Ok(token)
    }

    /// Path of a storage-state file whose `token` cookie is scoped to `url`
    pub async fn get_storage_state(&self, url: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.state_path();

        if is_fresh(&path, self.max_age).await? {
            debug!("Using cached storage state from {}", path.display());
            return Ok(path);
        }

        let _guard = RefreshGuard::acquire(&path).await?;
        if is_fresh(&path, self.max_age).await? {
            return Ok(path);
        }

        let token = self.get_auth_token().await?;
        let state = StorageState::with_token(url, &token)?;
        write_atomic(&path, &serde_json::to_vec_pretty(&state)?).await?;

        info!("Cached new storage state at {}", path.display());
        Ok(path)
    }

    /// `token=<token>` cookie header for browser contexts
    pub async fn get_auth_cookie(&self) -> Result<String> {
        let token = self.get_auth_token().await?;
        Ok(format!("{}={}", TOKEN_COOKIE, token))
    }

    /// Remove cached artifacts
    pub async fn clear(&self) -> Result<()> {
        for path in [self.token_path(), self.state_path()] {
            match fs::remove_file(&path).await {
                Ok(()) => info!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn read_fresh_token(&self, path: &Path) -> Result<Option<String>> {
        if !is_fresh(path, self.max_age).await? {
            return Ok(None);
        }
        let content = fs::read(path).await?;
        let document: TokenDocument = serde_json::from_slice(&content)?;
        Ok(Some(document.token))
    }

    async fn login(&self) -> Result<String> {
        let credentials = &self.config.credentials.main;
        if credentials.is_empty() {
            warn!("CRED_MAIN_EMAIL/CRED_MAIN_PASSWORD are not set");
        }

        let context = ApiContext::new(self.config.be_base_url.clone())?;
        let api = AuthApi::new(BaseApi::from_config(context.clone(), &self.config));
        let response = api.login(&credentials.email, &credentials.password).await?;
        context.dispose();

        if !response.ok() {
            return Err(Error::Authentication {
                status: response.status(),
                body: response.text(),
            });
        }

        let body: serde_json::Value = response.json()?;
        body.pointer("/data/token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Authentication {
                status: response.status(),
                body: response.text(),
            })
    }
}

/// True when `path` exists and was modified less than `max_age` ago
async fn is_fresh(path: &Path, max_age: Duration) -> Result<bool> {
    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let modified = metadata.modified()?;
    // An mtime in the future counts as brand new
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    Ok(age < max_age)
}

/// Write `data` to a sibling temp file, then rename over `path`
async fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Internal(format!("not a file path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name,
        uuid::Uuid::new_v4().simple()
    ));

    fs::write(&tmp_path, data).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

/// Held while one cache file is being refreshed
struct RefreshGuard {
    _local: OwnedMutexGuard<()>,
    #[cfg(unix)]
    _file: nix::fcntl::Flock<std::fs::File>,
}

impl RefreshGuard {
    async fn acquire(path: &Path) -> Result<Self> {
        let mutex = REFRESH_LOCKS
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let local = mutex.lock_owned().await;

        #[cfg(unix)]
        let file = {
            let lock_path = path.with_extension("lock");
            tokio::task::spawn_blocking(move || lock_file(&lock_path))
                .await
                .map_err(|e| Error::Internal(format!("lock task failed: {}", e)))??
        };

        Ok(Self {
            _local: local,
            #[cfg(unix)]
            _file: file,
        })
    }
}

#[cfg(unix)]
fn lock_file(path: &Path) -> Result<nix::fcntl::Flock<std::fs::File>> {
    use nix::fcntl::{Flock, FlockArg};

    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;
    Flock::lock(file, FlockArg::LockExclusive).map_err(|(_, errno)| Error::Io(errno.into()))
}
