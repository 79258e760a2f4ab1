//! staffqa CLI - Main Entry Point
//!
//! Helpers around the test suites: show the resolved configuration, manage
//! the shared auth cache and print generated test data.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, config, generate};

/// staffqa - staffinc QA suite helper
#[derive(Parser)]
#[command(name = "staffqa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration with passwords masked
    Config(config::ConfigArgs),

    /// Manage the cached auth token and storage state
    #[command(subcommand)]
    Auth(auth::AuthCommands),

    /// Print generated test data
    #[command(subcommand)]
    Generate(generate::GenerateCommands),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Config(args) => config::execute(args, cli.format)?,
        Commands::Auth(cmd) => auth::execute(cmd, cli.format).await?,
        Commands::Generate(cmd) => generate::execute(cmd, cli.format)?,
        Commands::Version => {
            println!("staffqa v{}", staffqa_common::VERSION);
        }
    }

    Ok(())
}
