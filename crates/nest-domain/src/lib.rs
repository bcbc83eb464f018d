//! Domain Layer - Nest
//!
//! Types and ports of a hierarchical object-activation runtime: scopes that
//! resolve services locally first and fall back to a chain of ancestor
//! scopes.
//!
//! ## Architecture
//!
//! The domain layer:
//! - Defines the error type shared by every crate
//! - Holds immutable value objects (service keys, instances, requests)
//! - Describes how types are constructed (`planning`)
//! - Defines the ports the resolution engine is assembled from
//! - Has no dependency on the infrastructure crate
//!
//! ## Ports
//!
//! - `ResolutionRoot`: the narrow surface a child scope holds for its parent
//! - `ScopeNode`: the full view of a scope, for chain walks
//! - `ComponentRegistry`: per-scope capability providers
//! - `ActivationCache`, `ActivationStrategy`: activation bookkeeping
//! - `ConstructorScorer`, `Selector`, `MissingBindingResolver`: selection

pub mod bindings;
pub mod constants;
pub mod error;
pub mod planning;
pub mod ports;
pub mod value_objects;

pub use bindings::*;
pub use error::{Error, Result};
pub use planning::{
    Argument, Arguments, Caster, Constructor, ConstructorPlan, Injectable, Object, TypePlan,
    caster,
};
pub use ports::*;
pub use value_objects::*;
