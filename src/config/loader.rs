//! Configuration loader
//!
//! TOML parsing with `${VAR}` environment substitution and a small set of
//! `CARELOG_*` environment overrides.

use super::schema::{CarelogConfig, StorageBackend};
use crate::domain::errors::CarelogError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// The file is read, `${VAR}` placeholders outside comments are replaced
/// with environment values, `CARELOG_*` overrides are applied, and the
/// resulting configuration is validated.
///
/// # Errors
///
/// Returns `Configuration` if the file is missing or unreadable, a
/// referenced environment variable is unset, parsing fails, or
/// validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<CarelogConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CarelogError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CarelogError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CarelogConfig = toml::from_str(&contents)
        .map_err(|e| CarelogError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| CarelogError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes `${VAR_NAME}` placeholders, skipping comment lines
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

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
                    let placeholder = format!("${{{var_name}}}");
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
        return Err(CarelogError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies `CARELOG_*` environment overrides on top of the parsed file
fn apply_env_overrides(config: &mut CarelogConfig) -> Result<()> {
    if let Ok(level) = std::env::var("CARELOG_APPLICATION_LOG_LEVEL") {
        config.application.log_level = level;
    }

    if let Ok(backend) = std::env::var("CARELOG_STORAGE_BACKEND") {
        config.storage.backend = match backend.to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "postgresql" => StorageBackend::Postgresql,
            other => {
                return Err(CarelogError::Configuration(format!(
                    "Invalid CARELOG_STORAGE_BACKEND '{other}'. \
                     Must be 'memory' or 'postgresql'"
                )))
            }
        };
    }

    if let Ok(size) = std::env::var("CARELOG_PAGINATION_DEFAULT_PAGE_SIZE") {
        config.pagination.default_page_size = size.parse().map_err(|_| {
            CarelogError::Configuration(format!(
                "Invalid CARELOG_PAGINATION_DEFAULT_PAGE_SIZE '{size}'"
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_replaces_known_vars() {
        std::env::set_var("CARELOG_TEST_SUBST_VAR", "postgresql://db/carelog");
        let input = "connection_string = \"${CARELOG_TEST_SUBST_VAR}\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("postgresql://db/carelog"));
        std::env::remove_var("CARELOG_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitution_reports_missing_vars() {
        let input = "connection_string = \"${CARELOG_TEST_DEFINITELY_UNSET}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CARELOG_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_substitution_skips_comments() {
        let input = "# uses ${CARELOG_TEST_DEFINITELY_UNSET}\nname = \"carelog\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CarelogError::Configuration(_)));
    }
}
