//! Boundary to the external breaker runtime.
//!
//! The runtime that owns breaker state (open/half-open/closed tracking,
//! failure counting, pool isolation) lives outside this crate and is only
//! ever configured through [`BreakerFactory`]. The adapter hands it the
//! action list once, default first, during initialization; after that the
//! runtime is on its own.

use crate::discovery::PolicyKey;
use crate::policy::PolicySpec;
use crate::registry::entries::ConfigAction;

/// Configuration interface of the external breaker runtime.
pub trait BreakerFactory {
    /// Apply the fallback policy used by every key without an explicit
    /// entry. Called before any [`BreakerFactory::configure`] call.
    fn configure_default(&mut self, spec: &PolicySpec, pool_core_size: u32);

    /// Apply a per-key policy override.
    fn configure(&mut self, key: &PolicyKey, spec: &PolicySpec);
}

impl<F: BreakerFactory + ?Sized> BreakerFactory for &mut F {
    fn configure_default(&mut self, spec: &PolicySpec, pool_core_size: u32) {
        (**self).configure_default(spec, pool_core_size);
    }

    fn configure(&mut self, key: &PolicyKey, spec: &PolicySpec) {
        (**self).configure(key, spec);
    }
}

/// Applies a configuration action list to a breaker runtime, exactly once.
#[derive(Debug)]
pub struct BreakerFactoryAdapter<F: BreakerFactory> {
    factory: F,
}

impl<F: BreakerFactory> BreakerFactoryAdapter<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Apply every action synchronously and hand the runtime back.
    ///
    /// Default actions are applied before per-key actions regardless of
    /// their position in `actions`. Consumes the adapter: a runtime is
    /// configured once per initialization pass.
    pub fn apply(mut self, actions: &[ConfigAction]) -> F {
        for action in actions {
            if let ConfigAction::SetDefault {
                spec,
                pool_core_size,
            } = action
            {
                self.factory.configure_default(spec, *pool_core_size);
            }
        }
        for action in actions {
            if let ConfigAction::Configure { key, spec } = action {
                self.factory.configure(key, spec);
            }
        }
        self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::derive_key;
    use crate::discovery::SiteDescriptor;

    #[derive(Default)]
    struct Recorder {
        default_seen: Option<u32>,
        keys: Vec<String>,
    }

    impl BreakerFactory for Recorder {
        fn configure_default(&mut self, _spec: &PolicySpec, pool_core_size: u32) {
            assert!(
                self.keys.is_empty(),
                "default must be applied before per-key entries"
            );
            self.default_seen = Some(pool_core_size);
        }

        fn configure(&mut self, key: &PolicyKey, _spec: &PolicySpec) {
            self.keys.push(key.as_str().to_string());
        }
    }

    #[test]
    fn test_default_is_applied_first_even_when_listed_last() {
        let key = derive_key(&SiteDescriptor::new("Client", "call", ["int"]));
        let actions = vec![
            ConfigAction::Configure {
                key: key.clone(),
                spec: PolicySpec::default(),
            },
            ConfigAction::SetDefault {
                spec: PolicySpec::default(),
                pool_core_size: 30,
            },
        ];

        let recorder = BreakerFactoryAdapter::new(Recorder::default()).apply(&actions);
        assert_eq!(recorder.default_seen, Some(30));
        assert_eq!(recorder.keys, vec!["Client#call(int)".to_string()]);
    }
}
