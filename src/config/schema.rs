//! Configuration schema definitions.
//!
//! This module defines the operator-facing configuration for the boot-time
//! registration pass. All types derive Serde traits for deserialization
//! from config files; every field has a default so a minimal (or absent)
//! config is valid.

use serde::Deserialize;

use crate::policy::{PolicyError, PolicyOverrides, PolicySpec};
use crate::registry::DEFAULT_POOL_CORE_SIZE;

/// Root configuration for the registrar.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Fallback policy applied to every key without an explicit entry.
    pub default_policy: DefaultPolicyConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Default-policy block: sparse overrides of the documented defaults, plus
/// the isolation pool core size carried only on the default action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultPolicyConfig {
    /// Core size of the isolation pool configured with the default policy.
    pub pool_core_size: u32,

    /// Overrides of the documented policy defaults.
    #[serde(flatten)]
    pub overrides: PolicyOverrides,
}

impl Default for DefaultPolicyConfig {
    fn default() -> Self {
        Self {
            pool_core_size: DEFAULT_POOL_CORE_SIZE,
            overrides: PolicyOverrides::default(),
        }
    }
}

impl DefaultPolicyConfig {
    /// Resolve the block into a full, validated [`PolicySpec`].
    pub fn resolve(&self) -> Result<PolicySpec, PolicyError> {
        if self.pool_core_size == 0 {
            return Err(PolicyError::InvalidPolicyValue {
                field: "pool_core_size",
                value: 0,
                constraint: "must be greater than zero",
            });
        }
        PolicySpec::resolve(&self.overrides)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_to_the_documented_policy() {
        let config = RegistrarConfig::default();
        let spec = config.default_policy.resolve().unwrap();
        assert_eq!(spec, PolicySpec::default());
        assert_eq!(config.default_policy.pool_core_size, 30);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_zero_pool_core_size_is_rejected() {
        let config = DefaultPolicyConfig {
            pool_core_size: 0,
            overrides: PolicyOverrides::default(),
        };
        assert!(matches!(
            config.resolve(),
            Err(PolicyError::InvalidPolicyValue {
                field: "pool_core_size",
                ..
            })
        ));
    }
}
