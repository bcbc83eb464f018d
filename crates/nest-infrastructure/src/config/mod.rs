//! Configuration
//!
//! Loaded with Figment from defaults, an optional `nest.toml` and `NEST_`
//! prefixed environment variables, in that order.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{LoggingConfig, NestConfig, ScopeSettings};
