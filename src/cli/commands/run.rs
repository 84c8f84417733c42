//! Run command implementation
//!
//! Executes one batch load and maps the outcome to a process exit code.

use crate::config::load_config;
use crate::core::pipeline::Pipeline;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Drop and recreate all schema objects before loading
    #[arg(long)]
    pub reinit: bool,

    /// Simulate the load without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Override the batch file directory
    #[arg(long)]
    pub batch_dir: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting batch load");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Error: {e}");
                return Ok(e.exit_code());
            }
        };

        // CLI flags override file and environment values
        if self.reinit {
            tracing::info!("Enabling reinit from CLI");
            config.load.reinit = true;
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.load.dry_run = true;
        }
        if let Some(dir) = &self.batch_dir {
            tracing::info!(dir = %dir, "Overriding batch directory from CLI");
            config.batches.dir = dir.clone();
        }

        if config.load.dry_run {
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        let pipeline = Pipeline::new(config);
        match pipeline.run().await {
            Ok(summary) => {
                println!("✅ Load completed");
                println!("  Reinitialized: {}", summary.reinitialized);
                println!("  Currencies: {}", summary.currencies_loaded);
                println!(
                    "  Item prices: {} ({} skipped by checkpoint)",
                    summary.price_rows_loaded, summary.checkpoint_skipped
                );
                println!(
                    "  Conversion rates: {} across {} date(s)",
                    summary.rates_loaded, summary.rate_dates
                );
                if summary.invalid_skipped > 0 {
                    println!("  ⚠️  Invalid records skipped: {}", summary.invalid_skipped);
                }
                println!("  Duration: {}s", summary.duration.as_secs());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Batch load failed");
                eprintln!("Error: {e}");
                Ok(e.exit_code())
            }
        }
    }
}
