//! shopdesk CLI library — subcommand implementations and configuration.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

/// CLI subcommand implementations.
pub mod commands;
/// CLI configuration — read/write `~/.shopdesk/config.toml`.
pub mod config;
