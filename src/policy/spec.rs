//! Policy parameter schema.
//!
//! This module defines the tunable resilience parameters attached to one
//! call site. All types derive Serde traits so the same shape serves marker
//! declarations, config files, and audit output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default hard timeout for the isolated execution unit.
pub const DEFAULT_ISOLATION_TIMEOUT_MS: u64 = 3000;

/// Default timeout for the call itself.
pub const DEFAULT_EXECUTION_TIMEOUT_MS: u64 = 3000;

/// Execution timeout enforcement is on unless a site opts out.
pub const DEFAULT_EXECUTION_TIMEOUT_ENABLED: bool = true;

/// Default width of the rolling statistics window.
pub const DEFAULT_ROLLING_WINDOW_MS: u64 = 10_000;

/// Default minimum requests in the window before the breaker can trip.
pub const DEFAULT_VOLUME_THRESHOLD: u32 = 10;

/// Default error rate (percent) above which the breaker opens.
pub const DEFAULT_ERROR_THRESHOLD_PERCENT: u32 = 50;

/// Default time the breaker stays open before probing again.
pub const DEFAULT_SLEEP_WINDOW_MS: u64 = 5000;

/// Error raised when a declared policy value violates its constraint.
///
/// Surfaced at discovery time so a bad declaration stops the boot pass
/// instead of misconfiguring a breaker at request time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A field value is outside its documented range.
    #[error("invalid policy value: {field} = {value} ({constraint})")]
    InvalidPolicyValue {
        field: &'static str,
        value: u64,
        constraint: &'static str,
    },
}

/// Resilience parameters for one call site's circuit breaker.
///
/// Immutable once constructed; build one through [`PolicySpec::resolve`] so
/// every field is defaulted and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicySpec {
    /// Hard timeout for the isolated execution unit, in milliseconds.
    pub isolation_timeout_ms: u64,

    /// Timeout for the call itself, in milliseconds.
    pub execution_timeout_ms: u64,

    /// Whether the execution timeout is enforced.
    pub execution_timeout_enabled: bool,

    /// Width of the statistics window used for error-rate calculation.
    pub rolling_window_ms: u64,

    /// Minimum requests in the window before the breaker can trip.
    pub volume_threshold: u32,

    /// Error rate (percent, 0-100) above which the breaker opens.
    pub error_threshold_percent: u32,

    /// Time the breaker stays open before allowing a trial request.
    pub sleep_window_ms: u64,
}

impl Default for PolicySpec {
    fn default() -> Self {
        Self {
            isolation_timeout_ms: DEFAULT_ISOLATION_TIMEOUT_MS,
            execution_timeout_ms: DEFAULT_EXECUTION_TIMEOUT_MS,
            execution_timeout_enabled: DEFAULT_EXECUTION_TIMEOUT_ENABLED,
            rolling_window_ms: DEFAULT_ROLLING_WINDOW_MS,
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            error_threshold_percent: DEFAULT_ERROR_THRESHOLD_PERCENT,
            sleep_window_ms: DEFAULT_SLEEP_WINDOW_MS,
        }
    }
}

impl PolicySpec {
    /// Fill every unset field of `overrides` with its documented default and
    /// validate the resolved value.
    pub fn resolve(overrides: &PolicyOverrides) -> Result<Self, PolicyError> {
        let spec = Self {
            isolation_timeout_ms: overrides
                .isolation_timeout_ms
                .unwrap_or(DEFAULT_ISOLATION_TIMEOUT_MS),
            execution_timeout_ms: overrides
                .execution_timeout_ms
                .unwrap_or(DEFAULT_EXECUTION_TIMEOUT_MS),
            execution_timeout_enabled: overrides
                .execution_timeout_enabled
                .unwrap_or(DEFAULT_EXECUTION_TIMEOUT_ENABLED),
            rolling_window_ms: overrides
                .rolling_window_ms
                .unwrap_or(DEFAULT_ROLLING_WINDOW_MS),
            volume_threshold: overrides
                .volume_threshold
                .unwrap_or(DEFAULT_VOLUME_THRESHOLD),
            error_threshold_percent: overrides
                .error_threshold_percent
                .unwrap_or(DEFAULT_ERROR_THRESHOLD_PERCENT),
            sleep_window_ms: overrides.sleep_window_ms.unwrap_or(DEFAULT_SLEEP_WINDOW_MS),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check every field against its documented constraint.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_duration("isolation_timeout_ms", self.isolation_timeout_ms)?;
        check_duration("execution_timeout_ms", self.execution_timeout_ms)?;
        check_duration("rolling_window_ms", self.rolling_window_ms)?;
        check_duration("sleep_window_ms", self.sleep_window_ms)?;

        if self.volume_threshold == 0 {
            return Err(PolicyError::InvalidPolicyValue {
                field: "volume_threshold",
                value: 0,
                constraint: "must be greater than zero",
            });
        }
        if self.error_threshold_percent > 100 {
            return Err(PolicyError::InvalidPolicyValue {
                field: "error_threshold_percent",
                value: u64::from(self.error_threshold_percent),
                constraint: "must be between 0 and 100",
            });
        }
        Ok(())
    }
}

fn check_duration(field: &'static str, value: u64) -> Result<(), PolicyError> {
    if value == 0 {
        return Err(PolicyError::InvalidPolicyValue {
            field,
            value,
            constraint: "must be greater than zero",
        });
    }
    Ok(())
}

/// Sparse counterpart of [`PolicySpec`]: only explicitly declared fields are
/// set, everything else falls back to the documented default at resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyOverrides {
    pub isolation_timeout_ms: Option<u64>,
    pub execution_timeout_ms: Option<u64>,
    pub execution_timeout_enabled: Option<bool>,
    pub rolling_window_ms: Option<u64>,
    pub volume_threshold: Option<u32>,
    pub error_threshold_percent: Option<u32>,
    pub sleep_window_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_yields_documented_defaults() {
        let spec = PolicySpec::resolve(&PolicyOverrides::default()).unwrap();
        assert_eq!(spec.isolation_timeout_ms, 3000);
        assert_eq!(spec.execution_timeout_ms, 3000);
        assert!(spec.execution_timeout_enabled);
        assert_eq!(spec.rolling_window_ms, 10_000);
        assert_eq!(spec.volume_threshold, 10);
        assert_eq!(spec.error_threshold_percent, 50);
        assert_eq!(spec.sleep_window_ms, 5000);
        assert_eq!(spec, PolicySpec::default());
    }

    #[test]
    fn test_resolve_keeps_explicit_overrides() {
        let overrides = PolicyOverrides {
            execution_timeout_ms: Some(1000),
            ..Default::default()
        };
        let spec = PolicySpec::resolve(&overrides).unwrap();
        assert_eq!(spec.execution_timeout_ms, 1000);
        assert_eq!(spec.isolation_timeout_ms, 3000);
    }

    #[test]
    fn test_error_threshold_out_of_range_is_rejected() {
        let overrides = PolicyOverrides {
            error_threshold_percent: Some(150),
            ..Default::default()
        };
        let err = PolicySpec::resolve(&overrides).unwrap_err();
        assert_eq!(
            err,
            PolicyError::InvalidPolicyValue {
                field: "error_threshold_percent",
                value: 150,
                constraint: "must be between 0 and 100",
            }
        );
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let overrides = PolicyOverrides {
            sleep_window_ms: Some(0),
            ..Default::default()
        };
        let err = PolicySpec::resolve(&overrides).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::InvalidPolicyValue {
                field: "sleep_window_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_error_threshold_is_allowed() {
        let overrides = PolicyOverrides {
            error_threshold_percent: Some(0),
            ..Default::default()
        };
        assert!(PolicySpec::resolve(&overrides).is_ok());
    }
}
