//! Declarative per-call-site circuit-breaker policy registration.
//!
//! Call sites of a remote-procedure client opt into per-site resilience
//! tuning by declaring a [`PolicyMarker`] next to the member. At startup a
//! single synchronous pass discovers every marked site from an explicit set
//! of client roots, derives the lookup key the dispatch runtime uses at
//! invocation time, and hands one configuration action per site (plus the
//! global default, applied first) to the external breaker runtime — all
//! before any traffic flows.
//!
//! # Architecture Overview
//!
//! ```text
//! client roots ──▶ discovery::scan ──▶ (SiteDescriptor, PolicyMarker)
//!                                            │
//!                                            ▼
//!                                   policy::resolve (defaults + validation)
//!                                            │
//!                                            ▼
//!                       discovery::derive_key ──▶ registry (default, overrides)
//!                                                       │
//!                                                       ▼
//!                                        BreakerFactoryAdapter ──▶ breaker runtime
//! ```
//!
//! The breaker runtime itself (state machine, failure counting, pool
//! isolation) is an external collaborator, reached only through the
//! [`BreakerFactory`] configuration boundary.
//!
//! ```
//! use breaker_registry::{initialize, BreakerFactory, ClientRoot, PolicyKey};
//! use breaker_registry::{PolicyMarker, PolicySpec, RegistrarConfig, SiteRoot};
//!
//! struct Runtime;
//! impl BreakerFactory for Runtime {
//!     fn configure_default(&mut self, _spec: &PolicySpec, _pool_core_size: u32) {}
//!     fn configure(&mut self, _key: &PolicyKey, _spec: &PolicySpec) {}
//! }
//!
//! let provider = ClientRoot::new("ProviderApiClient")
//!     .marked("provide", ["int"], PolicyMarker::new().execution_timeout_ms(1000))
//!     .unmarked("provide_unguarded", ["int"]);
//!
//! let mut runtime = Runtime;
//! let outcome = initialize(
//!     &[&provider as &dyn SiteRoot],
//!     &RegistrarConfig::default(),
//!     &mut runtime,
//! )
//! .expect("boot pass");
//! assert_eq!(outcome.registered, 1);
//! ```

pub mod config;
pub mod discovery;
pub mod lifecycle;
pub mod observability;
pub mod policy;
pub mod registry;

pub use config::{load_config, ConfigError, RegistrarConfig};
pub use discovery::{
    derive_key, ClientRoot, MarkedSite, PolicyKey, SiteDescriptor, SiteIntrospectionError,
    SiteRoot,
};
pub use lifecycle::{initialize, initialize_with_key_rule, BootError, BootOutcome};
pub use policy::{PolicyError, PolicyMarker, PolicyOverrides, PolicySpec};
pub use registry::{BreakerFactory, BreakerFactoryAdapter, ConfigAction, PolicyRegistry, RegistryError};
