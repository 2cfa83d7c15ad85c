//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ConfzipConfig;
use crate::domain::errors::ConfzipError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ConfzipConfig
/// 4. Applies environment variable overrides (CONFZIP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use confzip::config::loader::load_config;
///
/// let config = load_config("confzip.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfzipConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfzipError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConfzipError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, or built-in defaults if the file does not exist
///
/// Environment overrides and validation still apply to the defaults.
///
/// # Errors
///
/// Returns an error if an existing file cannot be loaded or the result is invalid.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ConfzipConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        parse_config("")
    }
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as [`load_config`].
///
/// # Errors
///
/// Returns an error if parsing, substitution or validation fails.
pub fn parse_config(contents: &str) -> Result<ConfzipConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ConfzipConfig = toml::from_str(&contents)
        .map_err(|e| ConfzipError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ConfzipError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ConfzipError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
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
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ConfzipError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CONFZIP_* prefix
///
/// Environment variables follow the pattern: CONFZIP_<SECTION>_<KEY>
/// For example: CONFZIP_EXPORT_OUTPUT_DIR, CONFZIP_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut ConfzipConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CONFZIP_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("CONFZIP_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("CONFZIP_EXPORT_FILE_NAME") {
        config.export.file_name = val;
    }
    if let Ok(val) = std::env::var("CONFZIP_EXPORT_SOURCE_DIR") {
        config.export.source_dir = Some(val);
    }
    if let Ok(val) = std::env::var("CONFZIP_EXPORT_COMPRESSION") {
        config.export.compression = val;
    }

    // Verification overrides
    if let Ok(val) = std::env::var("CONFZIP_VERIFICATION_ENABLE_VERIFICATION") {
        config.verification.enable_verification = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CONFZIP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CONFZIP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CONFZIP_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CONFZIP_LOADER_TEST_DIR", "/srv/exports");
        let input = "output_dir = \"${CONFZIP_LOADER_TEST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "output_dir = \"/srv/exports\"\n");
        std::env::remove_var("CONFZIP_LOADER_TEST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let input = "output_dir = \"${CONFZIP_LOADER_TEST_UNSET_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err
            .to_string()
            .contains("CONFZIP_LOADER_TEST_UNSET_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# output_dir = \"${CONFZIP_LOADER_TEST_IN_COMMENT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${CONFZIP_LOADER_TEST_IN_COMMENT}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/definitely/missing/confzip.toml").unwrap_err();
        assert!(matches!(err, ConfzipError::Configuration(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[export]
file_name = "tunnels.zip"

[[sources]]
name = "home"
path = "/etc/wireguard/home.conf"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.export.file_name, "tunnels.zip");
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].name, "home");
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("/definitely/missing/confzip.toml").unwrap();
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let err = parse_config("export = = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_parse_config_validation_failure() {
        let err = parse_config("[export]\nfile_name = \"out.tar\"\n").unwrap_err();
        assert!(err.to_string().contains("must end with .zip"));
    }
}
