//! Policy key derivation.
//!
//! # Responsibilities
//! - Map a [`SiteDescriptor`] to the exact lookup key the dispatch runtime
//!   computes independently for every live invocation
//! - Stay stable across process restarts
//!
//! # Key Format
//! ```text
//! {OwningTypeSimpleName}#{MemberName}({ParamType1,ParamType2,...})
//! ```
//! No whitespace, simple (unqualified) names, comma-joined parameters,
//! empty parens for a parameterless member.
//!
//! # Design Decisions
//! - Derivation is a pure function of the descriptor; no ambient state
//! - Any deviation from the dispatch runtime's rule makes the policy
//!   silently never match (the call runs under the default policy with no
//!   diagnostic), so the format above is a wire-level contract, not a
//!   presentation choice. The boot pass cross-checks it against the
//!   dispatch rule before traffic starts.

use std::fmt;

use serde::Serialize;

use crate::discovery::descriptor::SiteDescriptor;

/// Canonical lookup key for one call site's policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PolicyKey(String);

impl PolicyKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PolicyKey> for String {
    fn from(key: PolicyKey) -> Self {
        key.0
    }
}

/// Compute the policy key for `site`.
///
/// Deterministic and injective over descriptors whose components are plain
/// simple names (no `#`, `(`, `)`, or `,` inside a name).
pub fn derive_key(site: &SiteDescriptor) -> PolicyKey {
    let params_len: usize = site
        .param_types
        .iter()
        .map(|p| p.len() + 1)
        .sum::<usize>();
    let mut key =
        String::with_capacity(site.owning_type.len() + site.member.len() + params_len + 3);

    key.push_str(&site.owning_type);
    key.push('#');
    key.push_str(&site.member);
    key.push('(');
    for (i, param) in site.param_types.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(param);
    }
    key.push(')');

    PolicyKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_parameter_key() {
        let site = SiteDescriptor::new("ProviderApiClient", "provide", ["int"]);
        assert_eq!(derive_key(&site).as_str(), "ProviderApiClient#provide(int)");
    }

    #[test]
    fn test_multi_parameter_key_has_no_whitespace() {
        let site = SiteDescriptor::new("OrderClient", "submit", ["String", "int", "boolean"]);
        assert_eq!(
            derive_key(&site).as_str(),
            "OrderClient#submit(String,int,boolean)"
        );
    }

    #[test]
    fn test_parameterless_key_keeps_empty_parens() {
        let site = SiteDescriptor::new("StatusClient", "ping", Vec::<String>::new());
        assert_eq!(derive_key(&site).as_str(), "StatusClient#ping()");
    }

    #[test]
    fn test_derivation_is_pure() {
        let site = SiteDescriptor::new("A", "b", ["c"]);
        assert_eq!(derive_key(&site), derive_key(&site));
    }
}
