//! Value Objects
//!
//! Immutable values passed between scopes, registries and the construction
//! pipeline.

pub mod component;
pub mod request;
pub mod service;

pub use component::{ComponentKind, IMMUTABLE_IN_CHILD_SCOPES};
pub use request::{ConstructorArgument, DefaultValue, Request, Target, TargetShape};
pub use service::{Instance, InstanceId, InstanceWatch, ServiceKey};
