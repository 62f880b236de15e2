//! Call-site scanning over explicit client roots.
//!
//! # Responsibilities
//! - Enumerate every declared member carrying a policy marker, without
//!   executing any of them
//! - Traverse only the roots handed in; nothing outside them is consulted
//! - Tolerate per-root failures: one unscannable root is reported and the
//!   remaining roots still produce their sites
//!
//! # Design Decisions
//! - Roots are explicit values, so the configured surface is enumerable and
//!   auditable; there is no ambient whole-program discovery
//! - Scanning is restartable: unchanged roots produce identical results
//! - Site order carries no meaning; consumers must not depend on it

use thiserror::Error;

use crate::discovery::descriptor::{MarkedSite, SiteDescriptor};
use crate::policy::PolicyMarker;

/// Failure to enumerate one root's declared members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("site introspection failed: {reason}")]
pub struct SiteIntrospectionError {
    pub reason: String,
}

impl SiteIntrospectionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One client surface whose declared members can be enumerated.
pub trait SiteRoot {
    /// Root name used in scan reports and logs.
    fn name(&self) -> &str;

    /// Every declared member carrying a marker, as (descriptor, marker).
    fn marked_sites(&self) -> Result<Vec<MarkedSite>, SiteIntrospectionError>;
}

/// A failed root recorded during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub root: String,
    pub error: SiteIntrospectionError,
}

/// Result of scanning a set of roots.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub sites: Vec<MarkedSite>,
    pub failures: Vec<ScanFailure>,
}

/// Enumerate the marked call sites of every root.
///
/// A root that fails introspection is recorded in
/// [`ScanOutcome::failures`] and skipped; a program with zero markers is
/// valid and yields an empty site list.
pub fn scan(roots: &[&dyn SiteRoot]) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for root in roots {
        match root.marked_sites() {
            Ok(sites) => {
                tracing::debug!(root = %root.name(), sites = sites.len(), "scanned client root");
                outcome.sites.extend(sites);
            }
            Err(error) => {
                tracing::warn!(
                    root = %root.name(),
                    error = %error,
                    "client root could not be scanned; its sites fall back to the default policy"
                );
                outcome.failures.push(ScanFailure {
                    root: root.name().to_string(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Explicit declaration list for one client type.
///
/// Built adjacent to the client definition; each entry names one member and
/// its parameter types, marked or unmarked. Unmarked members document the
/// surface but never produce a site.
#[derive(Debug, Clone)]
pub struct ClientRoot {
    owning_type: String,
    members: Vec<MemberDecl>,
}

#[derive(Debug, Clone)]
struct MemberDecl {
    member: String,
    param_types: Vec<String>,
    marker: Option<PolicyMarker>,
}

impl ClientRoot {
    /// Start a declaration list for the named client type.
    pub fn new(owning_type: impl Into<String>) -> Self {
        Self {
            owning_type: owning_type.into(),
            members: Vec::new(),
        }
    }

    /// Declare a member carrying a policy marker.
    pub fn marked(
        mut self,
        member: impl Into<String>,
        param_types: impl IntoIterator<Item = impl Into<String>>,
        marker: PolicyMarker,
    ) -> Self {
        self.members.push(MemberDecl {
            member: member.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
            marker: Some(marker),
        });
        self
    }

    /// Declare a member without a marker; it runs under the default policy.
    pub fn unmarked(
        mut self,
        member: impl Into<String>,
        param_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.members.push(MemberDecl {
            member: member.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
            marker: None,
        });
        self
    }
}

impl SiteRoot for ClientRoot {
    fn name(&self) -> &str {
        &self.owning_type
    }

    fn marked_sites(&self) -> Result<Vec<MarkedSite>, SiteIntrospectionError> {
        Ok(self
            .members
            .iter()
            .filter_map(|decl| {
                decl.marker.as_ref().map(|marker| MarkedSite {
                    descriptor: SiteDescriptor::new(
                        self.owning_type.clone(),
                        decl.member.clone(),
                        decl.param_types.clone(),
                    ),
                    marker: marker.clone(),
                })
            })
            .collect())
    }
}
