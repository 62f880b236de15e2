//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs resolve (semantic checks on the default policy)
//!     → RegistrarConfig (validated, immutable)
//!     → boot pass
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a change means a fresh boot pass
//! - All fields have defaults so a missing or minimal file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{DefaultPolicyConfig, LoggingConfig, RegistrarConfig};
