//! # Nest
//!
//! A hierarchical object-activation runtime. A scope answers "give me an
//! instance of service `S`" from its own bindings first and falls back to a
//! chain of ancestor scopes, while keeping the components that define object
//! identity (activation cache, constructor scorer, selector) consistent
//! across the whole tree.
//!
//! ## Example
//!
//! ```ignore
//! use nest::prelude::*;
//!
//! let parent = Scope::root(ScopeSettings::default())?;
//! parent.bind::<dyn Repository>().to::<SqlRepository>(|repo| repo)?;
//!
//! let request_scope = Scope::child(&parent);
//! request_scope.bind::<dyn Session>().to_constant(session)?;
//!
//! // SqlRepository comes from the parent, the session from the child
//! let handler = request_scope.get_self::<Handler>()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ports, requests, bindings and constructor plans
//! - `infrastructure` - scopes, registries, caches, configuration and logging

/// Domain layer - ports and value types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use nest_domain::*;
}

/// Infrastructure layer - scopes, components, configuration
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use nest_infrastructure::*;
}

pub use domain::{Error, Result};
pub use infrastructure::{ConfigLoader, NestConfig, Scope, ScopeSettings};

/// Everything needed to declare bindings and resolve services
pub mod prelude {
    pub use nest_domain::{
        Arguments, Constructor, ConstructorArgument, Context, Error, Initializable, Injectable,
        Instance, Request, ResolutionRoot, ResolutionRootExt, Result, ScopeNode, Target,
    };
    pub use nest_infrastructure::{Scope, ScopeSettings};
}
