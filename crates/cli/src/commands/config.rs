//! Config Commands
//!
//! Print the configuration the suite would resolve, with passwords masked.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::output::{print_list, OutputFormat, TableDisplay};
use staffqa_common::{Credentials, EnvConfig};

#[derive(Args)]
pub struct ConfigArgs {
    /// Directory holding the `.env.<TEST_ENV>` files
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    fn new(key: &str, value: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl TableDisplay for ConfigEntry {
    fn headers() -> Vec<&'static str> {
        vec!["KEY", "VALUE"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.key.clone(), self.value.clone()]
    }
}

fn credential_entries(prefix: &str, credentials: &Credentials) -> [ConfigEntry; 2] {
    [
        ConfigEntry::new(&format!("{}_EMAIL", prefix), &credentials.email),
        ConfigEntry::new(&format!("{}_PASSWORD", prefix), &credentials.password),
    ]
}

/// Flatten a (redacted) config into env-var-named rows
pub fn entries(config: &EnvConfig) -> Vec<ConfigEntry> {
    let mut rows = vec![
        ConfigEntry::new("TEST_ENV", &config.test_env),
        ConfigEntry::new("FE_BASE_URL", &config.fe_base_url),
        ConfigEntry::new("BE_BASE_URL", &config.be_base_url),
        ConfigEntry::new("BE_API_VERSION", &config.be_api_version),
        ConfigEntry::new("SLOW_MO", config.slow_mo),
        ConfigEntry::new("HEADLESS", config.headless),
        ConfigEntry::new("AUTH_DIR", config.auth_dir.display()),
    ];
    let creds = &config.credentials;
    rows.extend(credential_entries("CRED_MAIN", &creds.main));
    rows.extend(credential_entries("ADMIN", &creds.admin));
    rows.extend(credential_entries("PK136_WHITELISTED", &creds.pk136_whitelisted));
    rows.extend(credential_entries("PK136_BLACKLISTED", &creds.pk136_blacklisted));
    rows.extend(credential_entries("PK136_NON_BLACKLISTED", &creds.pk136_non_blacklisted));
    rows
}

pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = match &args.dir {
        Some(dir) => EnvConfig::load_from(dir),
        None => EnvConfig::load(),
    }
    .context("Failed to load configuration")?
    .redacted();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        _ => print_list(&entries(&config), format)?,
    }
    Ok(())
}
