//! Call-site discovery subsystem.
//!
//! # Data Flow
//! ```text
//! client roots (explicit declaration lists)
//!     → scanner.rs (enumerate marked members, tolerate per-root failure)
//!     → (SiteDescriptor, PolicyMarker) pairs
//!     → key.rs (derive the dispatch lookup key)
//!     → registry
//! ```

pub mod descriptor;
pub mod key;
pub mod scanner;

pub use descriptor::{MarkedSite, SiteDescriptor};
pub use key::{derive_key, PolicyKey};
pub use scanner::{scan, ClientRoot, ScanFailure, ScanOutcome, SiteIntrospectionError, SiteRoot};
