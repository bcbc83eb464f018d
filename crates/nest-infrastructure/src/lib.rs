//! Infrastructure Layer - Nest
//!
//! The resolution engine and the machinery it is assembled from.
//!
//! ## Modules
//!
//! - `scope`: the `Scope` type and its parent-fallback resolution
//! - `bindings`: binding store, fluent binding syntax, implicit binding resolvers
//! - `components`: standard and layered component registries
//! - `activation`: activation caches, strategies and pipeline
//! - `selection`: constructor scorers, selector and constructor injection
//! - `config`: Figment-based configuration loading
//! - `logging`: tracing subscriber setup
//!
//! ## Example
//!
//! ```ignore
//! use nest_infrastructure::{Scope, ScopeSettings};
//! use nest_domain::ResolutionRootExt;
//!
//! let parent = Scope::root(ScopeSettings::default())?;
//! parent.bind::<dyn Clock>().to_constant(Arc::new(SystemClock))?;
//!
//! let child = Scope::child(&parent);
//! let clock = child.get::<dyn Clock>()?; // falls back to the parent
//! ```

pub mod activation;
pub mod bindings;
pub mod components;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod scope;
pub mod selection;

pub use activation::{ChildActivationCache, Pipeline, StandardActivationCache};
pub use bindings::{BindingBuilder, BindingStore};
pub use components::{ChildComponentRegistry, StandardComponentRegistry};
pub use config::{ConfigLoader, LoggingConfig, NestConfig, ScopeSettings};
pub use scope::Scope;
