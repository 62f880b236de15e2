//! Policy schema subsystem.
//!
//! # Data Flow
//! ```text
//! marker declaration (sparse overrides)
//!     → spec.rs resolve (fill defaults, validate ranges)
//!     → PolicySpec (complete, immutable)
//!     → registry / breaker runtime
//! ```
//!
//! # Design Decisions
//! - Defaulting is total: every unset field has a documented default
//! - Validation is fail-fast at discovery time, never at request time
//! - PolicySpec is a plain value object; no behavior beyond validation

pub mod marker;
pub mod spec;

pub use marker::PolicyMarker;
pub use spec::{PolicyError, PolicyOverrides, PolicySpec};
