//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Resolution order, lowest to highest precedence:
//!
//! 1. built-in defaults,
//! 2. the TOML file (with `${VAR}` substitution), when it exists — a
//!    missing file is fine for containerized runs where the environment
//!    supplies everything,
//! 3. environment variables (`DB_HOST`, `DB_PORT`, `DB_USER`,
//!    `DB_PASSWORD`, `DB_NAME`, `REINIT_DB`/`DB_INIT`, `KURS_*`).
//!
//! Validation runs once, after all overrides are applied.

use super::schema::{InvalidRecordPolicy, KursConfig};
use crate::config::secret::secret_string;
use crate::domain::errors::KursError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file and the environment
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file; skipped when absent
///
/// # Errors
///
/// Returns `KursError::Configuration` if the file cannot be read or
/// parsed, a `${VAR}` placeholder references an unset variable, an
/// override has an unparseable value, or the final configuration fails
/// validation.
///
/// # Examples
///
/// ```no_run
/// use kurs::config::loader::load_config;
///
/// let config = load_config("kurs.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KursConfig> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            KursError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let contents = substitute_env_vars(&contents)?;

        toml::from_str(&contents)
            .map_err(|e| KursError::Configuration(format!("Failed to parse TOML: {}", e)))?
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults and environment"
        );
        KursConfig::default()
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        KursError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(KursError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// Connection parameters use the plain `DB_*` names shared with the
/// container workflow; the reinit flag reads `REINIT_DB` (alias
/// `DB_INIT`); the rest use a `KURS_*` prefix.
fn apply_env_overrides(config: &mut KursConfig) -> Result<()> {
    // Connection parameters
    if let Ok(val) = std::env::var("DB_HOST") {
        config.database.host = val;
    }
    if let Ok(val) = std::env::var("DB_PORT") {
        config.database.port = val.parse().map_err(|_| {
            KursError::Configuration(format!("DB_PORT must be a port number, got '{val}'"))
        })?;
    }
    if let Ok(val) = std::env::var("DB_USER") {
        config.database.user = val;
    }
    if let Ok(val) = std::env::var("DB_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("DB_NAME") {
        config.database.dbname = val;
    }

    // Reinit flag, read exactly once here and fixed for the run
    for name in ["REINIT_DB", "DB_INIT"] {
        if let Ok(val) = std::env::var(name) {
            config.load.reinit = parse_bool_flag(&val).ok_or_else(|| {
                KursError::Configuration(format!(
                    "{name} must be TRUE or FALSE (or 1/0), got '{val}'"
                ))
            })?;
        }
    }

    // Application overrides
    if let Ok(val) = std::env::var("KURS_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("KURS_BATCH_DIR") {
        config.batches.dir = val;
    }
    if let Ok(val) = std::env::var("KURS_RATES_BASE_URL") {
        config.rates.base_url = val;
    }
    if let Ok(val) = std::env::var("KURS_ON_INVALID") {
        config.load.on_invalid = match val.to_lowercase().as_str() {
            "skip" => InvalidRecordPolicy::Skip,
            "abort" => InvalidRecordPolicy::Abort,
            _ => {
                return Err(KursError::Configuration(format!(
                    "KURS_ON_INVALID must be 'skip' or 'abort', got '{val}'"
                )))
            }
        };
    }

    Ok(())
}

/// Parses boolean-like flag values: TRUE/FALSE, true/false, 1/0
fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
