//! Shared test doubles for the boot-pass integration tests.

use breaker_registry::{BreakerFactory, PolicyKey, PolicySpec};

/// Breaker runtime double that records every configuration call in order.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    /// The default policy and pool core size, if applied.
    pub default_config: Option<(PolicySpec, u32)>,

    /// Per-key configuration calls in application order.
    pub configured: Vec<(String, PolicySpec)>,
}

impl RecordingFactory {
    pub fn spec_for(&self, key: &str) -> Option<&PolicySpec> {
        self.configured
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, spec)| spec)
    }
}

impl BreakerFactory for RecordingFactory {
    fn configure_default(&mut self, spec: &PolicySpec, pool_core_size: u32) {
        assert!(
            self.configured.is_empty(),
            "default policy must be applied before any per-key entry"
        );
        self.default_config = Some((*spec, pool_core_size));
    }

    fn configure(&mut self, key: &PolicyKey, spec: &PolicySpec) {
        assert!(
            self.default_config.is_some(),
            "per-key entry applied before the default policy"
        );
        self.configured.push((key.as_str().to_string(), *spec));
    }
}
