//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RegistrarConfig;
use crate::policy::PolicyError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid default policy: {0}")]
    DefaultPolicy(#[from] PolicyError),
}

/// Load and validate a registrar configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RegistrarConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RegistrarConfig = toml::from_str(&content)?;

    // Semantic validation: serde only guarantees the shape.
    config.default_policy.resolve()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_policy_block() {
        let config: RegistrarConfig = toml::from_str(
            r#"
            [default_policy]
            pool_core_size = 40
            execution_timeout_ms = 2000

            [logging]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_policy.pool_core_size, 40);
        assert_eq!(
            config.default_policy.overrides.execution_timeout_ms,
            Some(2000)
        );
        assert_eq!(config.default_policy.overrides.sleep_window_ms, None);
        assert_eq!(config.logging.log_level, "debug");

        let spec = config.default_policy.resolve().unwrap();
        assert_eq!(spec.execution_timeout_ms, 2000);
        assert_eq!(spec.sleep_window_ms, 5000);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: RegistrarConfig = toml::from_str("").unwrap();
        assert!(config.default_policy.resolve().is_ok());
    }
}
