//! Component registries
//!
//! - `StandardComponentRegistry`: owns every provider, no write restrictions
//! - `ChildComponentRegistry`: local layer over a parent registry

pub mod child;
pub mod defaults;
pub mod standard;

pub use child::ChildComponentRegistry;
pub use defaults::{register_standard_extensions, standard_registry};
pub use standard::StandardComponentRegistry;
