//! CLI subcommands

pub mod auth;
pub mod config;
pub mod generate;
