//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "kurs.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TEMPLATE: &str = r#"# Kurs configuration
# Environment variables DB_HOST, DB_PORT, DB_USER, DB_PASSWORD and DB_NAME
# override the [database] values below; REINIT_DB=TRUE overrides [load] reinit.

[application]
log_level = "info"

[database]
host = "localhost"
port = 5432
user = "kurs"
password = "${DB_PASSWORD}"
dbname = "kurs_db"

[rates]
base_url = "https://api.vatcomply.com"
base_currency = "NOK"

[batches]
dir = "batch_data"

[load]
reinit = false
# "skip" counts invalid source records and continues; "abort" fails the run
on_invalid = "skip"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Kurs configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, CONFIG_TEMPLATE) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set DB_PASSWORD (and any DB_* overrides) in your environment or .env");
                println!("  3. Validate configuration: kurs validate-config");
                println!("  4. Run the load: kurs run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(1)
            }
        }
    }
}
