//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration: {config_path}");
        println!();

        // load_config validates after applying environment overrides
        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Database: {}", config.database.safe_display());
        println!("  Rates API: {}", config.rates.base_url);
        println!("  Base Currency: {}", config.rates.base_currency);
        println!("  Batch Directory: {}", config.batches.dir);
        println!("  Reinit: {}", config.load.reinit);
        println!("  On Invalid Records: {:?}", config.load.on_invalid);
        println!();
        Ok(0)
    }
}
