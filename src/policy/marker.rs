//! Declarative marker attached to a call site.
//!
//! A marker is the declaration surface a client author writes next to a
//! member to opt it into per-site breaker tuning: a sparse set of policy
//! overrides plus an optional label used only in provenance output. Absent
//! fields take the documented defaults at resolution time.

use crate::policy::spec::{PolicyError, PolicyOverrides, PolicySpec};

/// Per-call-site policy declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMarker {
    /// Optional label carried through to logs; never part of the key.
    pub label: Option<String>,

    /// Explicitly declared parameters; unset fields default at resolution.
    pub overrides: PolicyOverrides,
}

impl PolicyMarker {
    /// Marker with no explicit parameters; resolves to the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn isolation_timeout_ms(mut self, value: u64) -> Self {
        self.overrides.isolation_timeout_ms = Some(value);
        self
    }

    pub fn execution_timeout_ms(mut self, value: u64) -> Self {
        self.overrides.execution_timeout_ms = Some(value);
        self
    }

    pub fn execution_timeout_enabled(mut self, value: bool) -> Self {
        self.overrides.execution_timeout_enabled = Some(value);
        self
    }

    pub fn rolling_window_ms(mut self, value: u64) -> Self {
        self.overrides.rolling_window_ms = Some(value);
        self
    }

    pub fn volume_threshold(mut self, value: u32) -> Self {
        self.overrides.volume_threshold = Some(value);
        self
    }

    pub fn error_threshold_percent(mut self, value: u32) -> Self {
        self.overrides.error_threshold_percent = Some(value);
        self
    }

    pub fn sleep_window_ms(mut self, value: u64) -> Self {
        self.overrides.sleep_window_ms = Some(value);
        self
    }

    /// Resolve the declaration into a full, validated [`PolicySpec`].
    pub fn resolve(&self) -> Result<PolicySpec, PolicyError> {
        PolicySpec::resolve(&self.overrides)
    }
}
