//! Environment-driven suite configuration
//!
//! Configuration is resolved from two explicit sources: the process
//! environment and an optional `.env.<TEST_ENV>` file. The process
//! environment always wins, then the file, then the built-in defaults.
//! Loading never writes back into the process environment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{Error, Result};

pub const DEFAULT_TEST_ENV: &str = "dev";
pub const DEFAULT_FE_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_BE_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_BE_API_VERSION: &str = "v1";
pub const DEFAULT_SLOW_MO: &str = "300";
pub const DEFAULT_HEADLESS: &str = "false";
pub const DEFAULT_AUTH_DIR: &str = ".auth";

/// An email/password pair read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// True when neither field was provided
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }
}

/// Named credential sets used across the suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSets {
    /// Primary account (`CRED_MAIN_*`), also used to seed the auth cache
    pub main: Credentials,

    /// Administrator account (`ADMIN_*`)
    pub admin: Credentials,

    /// Account whitelisted for the digital form feature
    pub pk136_whitelisted: Credentials,

    /// Account blacklisted from the legacy form pages
    pub pk136_blacklisted: Credentials,

    /// Account that keeps access to the legacy form pages
    pub pk136_non_blacklisted: Credentials,
}

/// Immutable configuration for one test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Environment name the configuration was resolved for
    pub test_env: String,

    /// Frontend base URL
    pub fe_base_url: String,

    /// Backend base URL
    pub be_base_url: String,

    /// Backend API version segment, e.g. `v1`
    pub be_api_version: String,

    pub credentials: CredentialSets,

    /// Browser slow-motion delay in milliseconds
    pub slow_mo: u64,

    /// Run the browser headless
    pub headless: bool,

    /// Directory holding cached auth artifacts
    pub auth_dir: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::from_sources(&HashMap::new(), &HashMap::new())
    }
}

impl EnvConfig {
    /// Load configuration from the process environment and the
    /// `.env.<TEST_ENV>` file in the current directory.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(&cwd)
    }

    /// Load configuration, looking for the env file in `dir`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let process: HashMap<String, String> = std::env::vars().collect();
        let test_env = non_empty(&process, "TEST_ENV").unwrap_or(DEFAULT_TEST_ENV);
        let file = read_env_file(&dir.join(format!(".env.{}", test_env)))?;
        Ok(Self::from_sources(&process, &file))
    }

    /// Resolve configuration from explicit sources.
    ///
    /// `process` takes precedence over `file`; missing values fall back to
    /// defaults. Empty strings count as missing, matching how the suite has
    /// always treated blank variables. `TEST_ENV` picks the file, so it is
    /// only read from `process`.
    pub fn from_sources(process: &HashMap<String, String>, file: &HashMap<String, String>) -> Self {
        let lookup = |key: &str| -> Option<String> {
            non_empty(process, key)
                .or_else(|| non_empty(file, key))
                .map(str::to_string)
        };
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let creds = |prefix: &str| Credentials {
            email: value(&format!("{}_EMAIL", prefix), ""),
            password: value(&format!("{}_PASSWORD", prefix), ""),
        };

        Self {
            test_env: non_empty(process, "TEST_ENV")
                .unwrap_or(DEFAULT_TEST_ENV)
                .to_string(),
            fe_base_url: value("FE_BASE_URL", DEFAULT_FE_BASE_URL),
            be_base_url: value("BE_BASE_URL", DEFAULT_BE_BASE_URL),
            be_api_version: value("BE_API_VERSION", DEFAULT_BE_API_VERSION),
            credentials: CredentialSets {
                main: creds("CRED_MAIN"),
                admin: creds("ADMIN"),
                pk136_whitelisted: creds("PK136_WHITELISTED"),
                pk136_blacklisted: creds("PK136_BLACKLISTED"),
                pk136_non_blacklisted: creds("PK136_NON_BLACKLISTED"),
            },
            slow_mo: value("SLOW_MO", DEFAULT_SLOW_MO).trim().parse().unwrap_or(0),
            headless: value("HEADLESS", DEFAULT_HEADLESS) == "true",
            auth_dir: PathBuf::from(value("AUTH_DIR", DEFAULT_AUTH_DIR)),
        }
    }

    /// Backend URL including the version segment
    pub fn api_base(&self) -> String {
        format!(
            "{}/{}",
            self.be_base_url.trim_end_matches('/'),
            self.be_api_version
        )
    }

    /// Copy of the configuration safe to print
    pub fn redacted(&self) -> Self {
        let mask = |c: &Credentials| Credentials {
            email: c.email.clone(),
            password: if c.password.is_empty() {
                String::new()
            } else {
                "********".to_string()
            },
        };
        let mut copy = self.clone();
        copy.credentials = CredentialSets {
            main: mask(&self.credentials.main),
            admin: mask(&self.credentials.admin),
            pk136_whitelisted: mask(&self.credentials.pk136_whitelisted),
            pk136_blacklisted: mask(&self.credentials.pk136_blacklisted),
            pk136_non_blacklisted: mask(&self.credentials.pk136_non_blacklisted),
        };
        copy
    }
}

fn non_empty<'a>(map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parse a dotenv-style file without touching the process environment.
/// A missing file yields an empty map.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        debug!("No env file at {}", path.display());
        return Ok(HashMap::new());
    }

    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        vars.insert(key, value);
    }

    info!("Loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvConfig::from_sources(&HashMap::new(), &HashMap::new());

        assert_eq!(config.test_env, "dev");
        assert_eq!(config.fe_base_url, "http://localhost:3000");
        assert_eq!(config.be_base_url, "http://localhost:8080");
        assert_eq!(config.be_api_version, "v1");
        assert_eq!(config.slow_mo, 300);
        assert!(!config.headless);
        assert!(config.credentials.main.is_empty());
        assert_eq!(config.auth_dir, PathBuf::from(".auth"));
    }

    #[test]
    fn test_process_env_beats_file() {
        let process = map(&[("BE_BASE_URL", "http://api.process")]);
        let file = map(&[
            ("BE_BASE_URL", "http://api.file"),
            ("FE_BASE_URL", "http://fe.file"),
        ]);

        let config = EnvConfig::from_sources(&process, &file);
        assert_eq!(config.be_base_url, "http://api.process");
        assert_eq!(config.fe_base_url, "http://fe.file");
    }

    #[test]
    fn test_role_scoped_credentials() {
        let process = map(&[
            ("CRED_MAIN_EMAIL", "main@staffinc.co"),
            ("CRED_MAIN_PASSWORD", "secret"),
            ("PK136_BLACKLISTED_EMAIL", "black@staffinc.co"),
        ]);

        let config = EnvConfig::from_sources(&process, &HashMap::new());
        assert_eq!(config.credentials.main, Credentials::new("main@staffinc.co", "secret"));
        assert_eq!(config.credentials.pk136_blacklisted.email, "black@staffinc.co");
        assert_eq!(config.credentials.pk136_blacklisted.password, "");
    }

    #[test]
    fn test_timing_knobs() {
        let config = EnvConfig::from_sources(
            &map(&[("SLOW_MO", "not-a-number"), ("HEADLESS", "true")]),
            &HashMap::new(),
        );
        assert_eq!(config.slow_mo, 0);
        assert!(config.headless);

        let config = EnvConfig::from_sources(&map(&[("HEADLESS", "TRUE")]), &HashMap::new());
        assert!(!config.headless);
    }

    #[test]
    fn test_env_name_ignores_file_value() {
        let file = map(&[("TEST_ENV", "staging"), ("FE_BASE_URL", "http://fe.dev")]);

        let config = EnvConfig::from_sources(&HashMap::new(), &file);
        assert_eq!(config.test_env, "dev");
        assert_eq!(config.fe_base_url, "http://fe.dev");

        let config = EnvConfig::from_sources(&map(&[("TEST_ENV", "qa")]), &file);
        assert_eq!(config.test_env, "qa");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let process = map(&[("TEST_ENV", "staging"), ("SLOW_MO", "50")]);
        let file = map(&[("ADMIN_EMAIL", "admin@staffinc.co")]);

        let first = EnvConfig::from_sources(&process, &file);
        let second = EnvConfig::from_sources(&process, &file);
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_env_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env.dev");
        std::fs::write(&path, "FE_BASE_URL=http://fe.local\n# comment\nSLOW_MO=0\n").unwrap();

        let vars = read_env_file(&path).unwrap();
        assert_eq!(vars.get("FE_BASE_URL").map(String::as_str), Some("http://fe.local"));
        assert_eq!(vars.get("SLOW_MO").map(String::as_str), Some("0"));
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let vars = read_env_file(&tmp.path().join(".env.nope")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_api_base_and_redaction() {
        let config = EnvConfig::from_sources(
            &map(&[
                ("BE_BASE_URL", "http://api.local/"),
                ("CRED_MAIN_EMAIL", "main@staffinc.co"),
                ("CRED_MAIN_PASSWORD", "hunter2"),
            ]),
            &HashMap::new(),
        );
        assert_eq!(config.api_base(), "http://api.local/v1");

        let redacted = config.redacted();
        assert_eq!(redacted.credentials.main.email, "main@staffinc.co");
        assert_eq!(redacted.credentials.main.password, "********");
        assert_eq!(redacted.credentials.admin.password, "");
    }
}
