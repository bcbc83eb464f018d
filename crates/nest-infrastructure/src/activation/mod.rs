//! Activation bookkeeping and pipeline

pub mod cache;
pub mod child_cache;
pub mod pipeline;
pub mod strategies;

pub use cache::StandardActivationCache;
pub use child_cache::ChildActivationCache;
pub use pipeline::Pipeline;
pub use strategies::{ActivationCacheStrategy, BindingActionStrategy, InitializableStrategy};
