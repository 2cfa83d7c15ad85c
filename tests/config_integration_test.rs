//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use confzip::config::{load_config, load_config_or_default};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: &[&str] = &[
    "CONFZIP_APPLICATION_LOG_LEVEL",
    "CONFZIP_EXPORT_OUTPUT_DIR",
    "CONFZIP_EXPORT_FILE_NAME",
    "CONFZIP_EXPORT_SOURCE_DIR",
    "CONFZIP_EXPORT_COMPRESSION",
    "CONFZIP_VERIFICATION_ENABLE_VERIFICATION",
    "CONFZIP_LOGGING_LOCAL_ENABLED",
    "CONFZIP_LOGGING_LOCAL_PATH",
    "CONFZIP_LOGGING_LOCAL_ROTATION",
    "TEST_TUNNEL_DIR",
];

fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
output_dir = "/srv/exports"
file_name = "tunnels.zip"
source_dir = "/etc/wireguard"
compression = "stored"

[[sources]]
name = "office"
path = "/opt/tunnels/office.conf"

[[sources]]
name = "home"
path = "/opt/tunnels/home.conf"

[verification]
enable_verification = true

[logging]
local_enabled = true
local_path = "/var/log/confzip"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.output_dir, "/srv/exports");
    assert_eq!(config.export.file_name, "tunnels.zip");
    assert_eq!(config.export.source_dir.as_deref(), Some("/etc/wireguard"));
    assert_eq!(config.export.compression, "stored");
    let names: Vec<&str> = config.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["office", "home"]);
    assert!(config.verification.enable_verification);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_TUNNEL_DIR", "/home/user/tunnels");

    let file = write_config(
        r#"
# source_dir = "${NOT_SET_ANYWHERE}"
[export]
source_dir = "${TEST_TUNNEL_DIR}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.export.source_dir.as_deref(),
        Some("/home/user/tunnels")
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[export]\nsource_dir = \"${TEST_TUNNEL_DIR}\"\n");

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_TUNNEL_DIR"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CONFZIP_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("CONFZIP_EXPORT_FILE_NAME", "override.zip");
    std::env::set_var("CONFZIP_EXPORT_COMPRESSION", "stored");
    std::env::set_var("CONFZIP_VERIFICATION_ENABLE_VERIFICATION", "true");

    let file = write_config(
        r#"
[application]
log_level = "debug"

[export]
file_name = "tunnels.zip"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.export.file_name, "override.zip");
    assert_eq!(config.export.compression, "stored");
    assert!(config.verification.enable_verification);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CONFZIP_EXPORT_FILE_NAME", "override.tar");

    let err = load_config_or_default("/definitely/missing/confzip.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_source_name_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[[sources]]
name = "../escape"
path = "/tmp/escape.conf"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("sources[0]"));
}

#[test]
fn test_defaults_without_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_or_default("/definitely/missing/confzip.toml").unwrap();
    assert_eq!(config.export.file_name, "wireguard-export.zip");
    assert_eq!(config.export.output_dir, ".");
    assert!(config.export.source_dir.is_none());
}
