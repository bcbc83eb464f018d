//! Domain Port Interfaces
//!
//! Traits the resolution engine is assembled from. Implementations live in
//! the infrastructure crate.

pub mod activation;
pub mod components;
pub mod resolution;
pub mod selection;

pub use activation::{ActivationCache, ActivationFlow, ActivationStrategy, Initializable};
pub use components::{
    Component, ComponentLifetime, ComponentPort, ComponentRegistration, ComponentRegistry,
    ComponentRegistryExt,
};
pub use resolution::{Resolution, ResolutionRoot, ResolutionRootExt, ScopeNode};
pub use selection::{ConstructorScorer, MissingBindingResolver, Selector};
