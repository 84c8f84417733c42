//! Integration tests for configuration loading and precedence
//!
//! Note: Tests that modify environment variables are serialized through a
//! mutex to avoid interference between tests.

use kurs::config::load_config;
use kurs::domain::KursError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "DB_HOST",
        "DB_PORT",
        "DB_USER",
        "DB_PASSWORD",
        "DB_NAME",
        "REINIT_DB",
        "DB_INIT",
        "KURS_LOG_LEVEL",
        "KURS_BATCH_DIR",
        "KURS_RATES_BASE_URL",
        "KURS_ON_INVALID",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const COMPLETE_CONFIG: &str = r#"
[application]
log_level = "info"

[database]
host = "file-host"
port = 5432
user = "file-user"
password = "file-password"
dbname = "file-db"

[load]
reinit = false
"#;

#[test]
fn test_file_values_load_without_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.database.host, "file-host");
    assert_eq!(config.database.user, "file-user");
    assert_eq!(config.database.password.expose_secret(), "file-password");
    assert!(!config.load.reinit);

    cleanup_env_vars();
}

#[test]
fn test_environment_overrides_file_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_HOST", "env-host");
    std::env::set_var("DB_PORT", "6543");
    std::env::set_var("DB_PASSWORD", "env-password");
    std::env::set_var("REINIT_DB", "TRUE");

    let file = write_config(COMPLETE_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.database.host, "env-host");
    assert_eq!(config.database.port, 6543);
    assert_eq!(config.database.password.expose_secret(), "env-password");
    // Untouched fields keep their file values
    assert_eq!(config.database.user, "file-user");
    assert_eq!(config.database.dbname, "file-db");
    assert!(config.load.reinit);

    cleanup_env_vars();
}

#[test]
fn test_environment_alone_is_sufficient() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_HOST", "env-host");
    std::env::set_var("DB_USER", "env-user");
    std::env::set_var("DB_PASSWORD", "env-password");
    std::env::set_var("DB_NAME", "env-db");

    // The containerized workflow carries no config file at all
    let config = load_config("does-not-exist.toml").unwrap();

    assert_eq!(config.database.host, "env-host");
    assert_eq!(config.database.dbname, "env-db");
    assert_eq!(config.database.port, 5432);

    cleanup_env_vars();
}

#[test]
fn test_missing_password_is_a_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_HOST", "env-host");
    std::env::set_var("DB_USER", "env-user");
    std::env::set_var("DB_NAME", "env-db");

    let err = load_config("does-not-exist.toml").unwrap_err();
    assert!(matches!(err, KursError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("password"));

    cleanup_env_vars();
}

#[test]
fn test_reinit_flag_accepts_boolean_like_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);

    for (value, expected) in [("TRUE", true), ("false", false), ("1", true), ("0", false)] {
        std::env::set_var("REINIT_DB", value);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.load.reinit, expected, "REINIT_DB={value}");
    }

    // DB_INIT is an accepted alias
    std::env::remove_var("REINIT_DB");
    std::env::set_var("DB_INIT", "TRUE");
    let config = load_config(file.path()).unwrap();
    assert!(config.load.reinit);

    cleanup_env_vars();
}

#[test]
fn test_unparseable_reinit_flag_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);
    std::env::set_var("REINIT_DB", "maybe");

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, KursError::Configuration(_)));

    cleanup_env_vars();
}

#[test]
fn test_var_substitution_pulls_from_environment() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("KURS_TEST_SUBST_PASSWORD", "subst-password");

    let file = write_config(
        r#"
[database]
host = "file-host"
user = "file-user"
password = "${KURS_TEST_SUBST_PASSWORD}"
dbname = "file-db"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.database.password.expose_secret(), "subst-password");

    std::env::remove_var("KURS_TEST_SUBST_PASSWORD");
    cleanup_env_vars();
}

#[test]
fn test_invalid_policy_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);
    std::env::set_var("KURS_ON_INVALID", "ignore");

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("KURS_ON_INVALID"));

    cleanup_env_vars();
}
