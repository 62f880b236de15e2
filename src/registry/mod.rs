//! Registry subsystem.
//!
//! # Data Flow
//! ```text
//! (SiteDescriptor, resolved PolicySpec) pairs
//!     → entries.rs (default + per-key table, collision detection)
//!     → build_actions() (default action first, then per-key actions)
//!     → adapter.rs (hand the list to the external breaker runtime, once)
//! ```

pub mod adapter;
pub mod entries;

pub use adapter::{BreakerFactory, BreakerFactoryAdapter};
pub use entries::{
    ConfigAction, PolicyRegistry, RegistryEntry, RegistryError, DEFAULT_POOL_CORE_SIZE,
};
