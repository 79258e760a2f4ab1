//! Auth Commands
//!
//! Inspect and manage the on-disk auth cache shared by the suites.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use crate::output::{print_success, print_value, OutputFormat};
use staffqa_api::AuthCache;
use staffqa_common::EnvConfig;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Print a valid bearer token, logging in if the cache is stale
    Token(TokenArgs),

    /// Write the browser storage state and print its path
    State(StateArgs),

    /// Print the `Cookie` header value used by authenticated browser sessions
    Cookie,

    /// Delete the cached token and storage state
    Clear,
}

#[derive(Args)]
pub struct TokenArgs {
    /// Discard the cached token and the storage state built from it first
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct StateArgs {
    /// Frontend URL the cookie is scoped to (defaults to FE_BASE_URL)
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn execute(cmd: AuthCommands, format: OutputFormat) -> Result<()> {
    let config = EnvConfig::load().context("Failed to load configuration")?;
    let cache = AuthCache::new(&config);

    match cmd {
        AuthCommands::Token(args) => {
            if args.force {
                cache.clear().await?;
            }
            let token = cache
                .get_auth_token()
                .await
                .context("Failed to obtain an auth token")?;
            print_value("token", &token, format);
        }
        AuthCommands::State(args) => {
            let url = args.url.unwrap_or_else(|| config.fe_base_url.clone());
            let path = cache
                .get_storage_state(&url)
                .await
                .context("Failed to write storage state")?;
            print_value("path", &path.display().to_string(), format);
        }
        AuthCommands::Cookie => {
            let cookie = cache.get_auth_cookie().await?;
            print_value("cookie", &cookie, format);
        }
        AuthCommands::Clear => {
            cache.clear().await?;
            info!(dir = %cache.dir().display(), "auth cache cleared");
            print_success(&format!("Cleared auth cache in {}", cache.dir().display()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::Cli;
    use clap::CommandFactory;

    #[test]
    fn test_force_help_names_both_cache_files() {
        let cli = Cli::command();
        let token = cli
            .find_subcommand("auth")
            .and_then(|auth| auth.find_subcommand("token"))
            .unwrap();
        let force = token
            .get_arguments()
            .find(|arg| arg.get_id() == "force")
            .unwrap();
        let help = force.get_help().unwrap().to_string();
        assert!(help.contains("token"));
        assert!(help.contains("storage state"));
    }
}
