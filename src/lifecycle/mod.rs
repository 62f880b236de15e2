//! Lifecycle subsystem.
//!
//! # Design Decisions
//! - Ordered startup: config first, then discovery and registration, and
//!   only then may the caller begin serving traffic
//! - The whole pass is bounded by the size of the declared surface, not by
//!   external I/O; no cancellation or timeout semantics apply
//! - After the pass the registry and derived keys are read-only; a config
//!   change means a fresh pass, not an in-place mutation

pub mod startup;

pub use startup::{
    initialize, initialize_with_key_rule, BootError, BootOutcome, ExcludedSite, InvalidSitePolicy,
};
