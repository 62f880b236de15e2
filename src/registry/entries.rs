//! Policy registry.
//!
//! # Responsibilities
//! - Hold one explicit default policy plus per-key overrides
//! - Detect key collisions between distinct call sites
//! - Emit the configuration action list applied to the breaker runtime
//!
//! # Design Decisions
//! - Default-then-override is an explicit two-phase shape: the default
//!   action always precedes per-key actions, so the effective configuration
//!   never depends on registration order for distinct keys
//! - Entries are keyed in a sorted map, making the action list
//!   deterministic for a given input set
//! - A key collision is a configuration defect, never a silent overwrite

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::discovery::key::{derive_key, PolicyKey};
use crate::discovery::SiteDescriptor;
use crate::policy::PolicySpec;

/// Isolation pool core size carried on the default configuration action.
pub const DEFAULT_POOL_CORE_SIZE: u32 = 30;

/// Registry-level configuration defects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two call sites resolved to the same lookup key.
    #[error("duplicate policy key '{key}': already registered by {existing}, rejected for {incoming}")]
    DuplicatePolicyKey {
        key: PolicyKey,
        existing: SiteDescriptor,
        incoming: SiteDescriptor,
    },
}

/// One registered policy plus the site that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub key: PolicyKey,
    pub spec: PolicySpec,
    pub site: SiteDescriptor,
}

/// A single configuration call handed to the breaker runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConfigAction {
    /// Fallback policy for every key without an explicit entry; applied
    /// before any per-key action.
    SetDefault {
        spec: PolicySpec,
        pool_core_size: u32,
    },

    /// Per-key policy override.
    Configure { key: PolicyKey, spec: PolicySpec },
}

/// Mapping from policy key to resolved policy, built once at boot.
#[derive(Debug)]
pub struct PolicyRegistry {
    default_spec: PolicySpec,
    default_pool_core_size: u32,
    entries: BTreeMap<PolicyKey, RegistryEntry>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRegistry {
    /// Empty registry with the documented default policy.
    pub fn new() -> Self {
        Self {
            default_spec: PolicySpec::default(),
            default_pool_core_size: DEFAULT_POOL_CORE_SIZE,
            entries: BTreeMap::new(),
        }
    }

    /// Establish the fallback policy applied to any key with no entry.
    pub fn set_default(&mut self, spec: PolicySpec) {
        self.default_spec = spec;
    }

    /// Isolation pool core size carried on the default action.
    pub fn set_default_pool_core_size(&mut self, size: u32) {
        self.default_pool_core_size = size;
    }

    pub fn default_spec(&self) -> &PolicySpec {
        &self.default_spec
    }

    /// Derive the key for `site` and insert its policy.
    ///
    /// A second registration landing on an existing key is a configuration
    /// defect; the registry keeps the first entry and reports the incoming
    /// site.
    pub fn register(&mut self, site: SiteDescriptor, spec: PolicySpec) -> Result<(), RegistryError> {
        let key = derive_key(&site);

        if let Some(existing) = self.entries.get(&key) {
            return Err(RegistryError::DuplicatePolicyKey {
                key,
                existing: existing.site.clone(),
                incoming: site,
            });
        }

        self.entries.insert(
            key.clone(),
            RegistryEntry { key, spec, site },
        );
        Ok(())
    }

    pub fn get(&self, key: &PolicyKey) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the configuration action list: the default action first, then
    /// one action per registered key in key order.
    pub fn build_actions(&self) -> Vec<ConfigAction> {
        let mut actions = Vec::with_capacity(self.entries.len() + 1);
        actions.push(ConfigAction::SetDefault {
            spec: self.default_spec,
            pool_core_size: self.default_pool_core_size,
        });
        for entry in self.entries.values() {
            actions.push(ConfigAction::Configure {
                key: entry.key.clone(),
                spec: entry.spec,
            });
        }
        actions
    }
}
