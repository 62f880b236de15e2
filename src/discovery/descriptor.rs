//! Structural identity of a call site.

use std::fmt;

use serde::Serialize;

use crate::policy::PolicyMarker;

/// Identifies one call site by its declared shape.
///
/// Built purely from static declarations, never from runtime instances.
/// Two sites are equal iff owning type, member name, and the ordered
/// parameter type list all match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SiteDescriptor {
    /// Simple (unqualified) name of the type declaring the member.
    pub owning_type: String,

    /// Member name as declared.
    pub member: String,

    /// Ordered simple names of the parameter types.
    pub param_types: Vec<String>,
}

impl SiteDescriptor {
    pub fn new(
        owning_type: impl Into<String>,
        member: impl Into<String>,
        param_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            owning_type: owning_type.into(),
            member: member.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({})",
            self.owning_type,
            self.member,
            self.param_types.join(", ")
        )
    }
}

/// One discovered call site paired with its declared marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSite {
    pub descriptor: SiteDescriptor,
    pub marker: PolicyMarker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_structural_and_ordered() {
        let a = SiteDescriptor::new("Client", "call", ["int", "String"]);
        let b = SiteDescriptor::new("Client", "call", ["int", "String"]);
        let reordered = SiteDescriptor::new("Client", "call", ["String", "int"]);
        let fewer = SiteDescriptor::new("Client", "call", ["int"]);

        assert_eq!(a, b);
        assert_ne!(a, reordered);
        assert_ne!(a, fewer);
    }

    #[test]
    fn test_display_names_the_site() {
        let d = SiteDescriptor::new("ProviderApiClient", "provide", ["int"]);
        assert_eq!(d.to_string(), "ProviderApiClient::provide(int)");
    }
}
