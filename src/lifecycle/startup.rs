//! Boot-time registration pass.
//!
//! # Data Flow
//! ```text
//! initialize(roots, config, factory):
//!     scan roots            → marked sites (per-root failures logged, skipped)
//!     resolve markers       → PolicySpec per site (invalid values aggregated, fatal)
//!     key-contract check    → derived key == dispatch runtime key (divergence fatal)
//!     register sites        → registry (duplicate keys logged, site excluded)
//!     build + apply actions → breaker runtime (default first, then per-key)
//! ```
//!
//! # Design Decisions
//! - Fail fast: a bad declared value or a key-contract divergence stops the
//!   process before it serves traffic
//! - Isolated defects degrade instead: a failed root or a duplicate key
//!   leaves those sites on the default policy and the process starts
//! - The pass is synchronous and run-to-completion; callers must not accept
//!   traffic until it returns

use thiserror::Error;

use crate::config::RegistrarConfig;
use crate::discovery::key::derive_key;
use crate::discovery::scanner::{scan, ScanFailure, SiteRoot};
use crate::discovery::{MarkedSite, PolicyKey, SiteDescriptor};
use crate::policy::{PolicyError, PolicySpec};
use crate::registry::{BreakerFactory, BreakerFactoryAdapter, PolicyRegistry, RegistryError};

/// A call site whose marker declared an invalid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSitePolicy {
    pub site: SiteDescriptor,
    pub error: PolicyError,
}

impl std::fmt::Display for InvalidSitePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.site, self.error)
    }
}

/// A call site excluded from the registry; it runs under the default policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedSite {
    pub site: SiteDescriptor,
    pub error: RegistryError,
}

/// Fatal boot failures. The process must not start serving traffic.
#[derive(Debug, Error)]
pub enum BootError {
    /// One or more markers declared invalid values; all offenders are
    /// reported together.
    #[error("invalid policy declarations: {}", format_list(.0))]
    InvalidPolicies(Vec<InvalidSitePolicy>),

    /// The configured default policy is itself invalid.
    #[error("invalid default policy: {0}")]
    InvalidDefaultPolicy(#[from] PolicyError),

    /// A derived key diverged from the key the dispatch runtime computes
    /// for the same site. Left undetected this would not raise any error at
    /// request time; the site's policy would silently never apply.
    #[error("key contract violation for {site}: derived '{derived}' but dispatch expects '{dispatch}'")]
    KeyContractViolation {
        site: SiteDescriptor,
        derived: PolicyKey,
        dispatch: String,
    },
}

fn format_list(items: &[InvalidSitePolicy]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Report of a completed boot pass.
#[derive(Debug)]
pub struct BootOutcome {
    /// Sites registered with their own policy.
    pub registered: usize,

    /// Sites excluded by a configuration defect; they run under the
    /// default policy.
    pub excluded: Vec<ExcludedSite>,

    /// Roots that could not be scanned.
    pub scan_failures: Vec<ScanFailure>,
}

/// Run the registration pass with the canonical key rule on both sides.
///
/// Discovery and registration complete (or fail) before this returns; the
/// caller must not accept traffic beforehand.
pub fn initialize<F>(
    roots: &[&dyn SiteRoot],
    config: &RegistrarConfig,
    factory: &mut F,
) -> Result<BootOutcome, BootError>
where
    F: BreakerFactory + ?Sized,
{
    initialize_with_key_rule(roots, config, factory, |site| {
        derive_key(site).as_str().to_string()
    })
}

/// Run the registration pass, cross-checking every derived key against the
/// key computation of the dispatch runtime this registry is paired with.
///
/// A divergent rule would otherwise surface only as a silent fallback to
/// the default policy at request time; here it fails the boot instead.
pub fn initialize_with_key_rule<F, K>(
    roots: &[&dyn SiteRoot],
    config: &RegistrarConfig,
    factory: &mut F,
    dispatch_key: K,
) -> Result<BootOutcome, BootError>
where
    F: BreakerFactory + ?Sized,
    K: Fn(&SiteDescriptor) -> String,
{
    let default_spec = config.default_policy.resolve()?;

    let scan_outcome = scan(roots);

    // Resolve every marker before touching the registry so all invalid
    // declarations are reported in one pass.
    let mut invalid = Vec::new();
    let mut resolved: Vec<(MarkedSite, PolicySpec)> = Vec::new();
    for site in scan_outcome.sites {
        match site.marker.resolve() {
            Ok(spec) => resolved.push((site, spec)),
            Err(error) => invalid.push(InvalidSitePolicy {
                site: site.descriptor,
                error,
            }),
        }
    }
    if !invalid.is_empty() {
        return Err(BootError::InvalidPolicies(invalid));
    }

    for (site, _) in &resolved {
        let derived = derive_key(&site.descriptor);
        let dispatch = dispatch_key(&site.descriptor);
        if derived.as_str() != dispatch {
            return Err(BootError::KeyContractViolation {
                site: site.descriptor.clone(),
                derived,
                dispatch,
            });
        }
    }

    let mut registry = PolicyRegistry::new();
    registry.set_default(default_spec);
    registry.set_default_pool_core_size(config.default_policy.pool_core_size);

    let mut excluded = Vec::new();
    for (site, spec) in resolved {
        let key = derive_key(&site.descriptor);
        let label = site.marker.label;
        match registry.register(site.descriptor, spec) {
            Ok(()) => {
                tracing::debug!(key = %key, label = ?label, "registered call-site policy");
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    "configuration defect: site excluded, default policy applies"
                );
                let RegistryError::DuplicatePolicyKey { ref incoming, .. } = error;
                excluded.push(ExcludedSite {
                    site: incoming.clone(),
                    error: error.clone(),
                });
            }
        }
    }

    let actions = registry.build_actions();
    if let Ok(json) = serde_json::to_string(&actions) {
        tracing::debug!(actions = %json, "applying breaker configuration");
    }
    BreakerFactoryAdapter::new(&mut *factory).apply(&actions);

    let outcome = BootOutcome {
        registered: registry.len(),
        excluded,
        scan_failures: scan_outcome.failures,
    };
    tracing::info!(
        registered = outcome.registered,
        excluded = outcome.excluded.len(),
        scan_failures = outcome.scan_failures.len(),
        "breaker policies applied"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::ClientRoot;
    use crate::policy::PolicyMarker;

    #[derive(Default)]
    struct NullFactory {
        defaults: usize,
        configured: usize,
    }

    impl BreakerFactory for NullFactory {
        fn configure_default(&mut self, _spec: &PolicySpec, _pool_core_size: u32) {
            self.defaults += 1;
        }

        fn configure(&mut self, _key: &PolicyKey, _spec: &PolicySpec) {
            self.configured += 1;
        }
    }

    #[test]
    fn test_invalid_marker_values_are_aggregated() {
        let root = ClientRoot::new("Client")
            .marked("a", ["int"], PolicyMarker::new().error_threshold_percent(150))
            .marked("b", ["int"], PolicyMarker::new().sleep_window_ms(0))
            .marked("c", ["int"], PolicyMarker::new());
        let mut factory = NullFactory::default();

        let err = initialize(
            &[&root as &dyn SiteRoot],
            &RegistrarConfig::default(),
            &mut factory,
        )
        .unwrap_err();

        match err {
            BootError::InvalidPolicies(offenders) => assert_eq!(offenders.len(), 2),
            other => panic!("expected InvalidPolicies, got {:?}", other),
        }
        assert_eq!(factory.defaults, 0, "no configuration on a failed boot");
        assert_eq!(factory.configured, 0);
    }

    #[test]
    fn test_divergent_dispatch_rule_fails_the_boot() {
        let root = ClientRoot::new("Client").marked("call", ["int"], PolicyMarker::new());
        let mut factory = NullFactory::default();

        let err = initialize_with_key_rule(
            &[&root as &dyn SiteRoot],
            &RegistrarConfig::default(),
            &mut factory,
            // A dispatch side resolving fully-qualified names would look up
            // keys this registry never produces.
            |site| format!("com.example.{}#{}()", site.owning_type, site.member),
        )
        .unwrap_err();

        assert!(matches!(err, BootError::KeyContractViolation { .. }));
        assert_eq!(factory.defaults, 0);
        assert_eq!(factory.configured, 0);
    }
}
