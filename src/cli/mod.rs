//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Kurs using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Kurs - currency and price batch loader
#[derive(Parser, Debug)]
#[command(name = "kurs")]
#[command(version, about, long_about = None)]
#[command(author = "Kurs Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "kurs.toml", env = "KURS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KURS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the batch load into the configured database
    Run(commands::run::RunArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
