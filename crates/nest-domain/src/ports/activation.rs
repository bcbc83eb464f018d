//! Activation ports

use std::sync::Arc;

use crate::bindings::Context;
use crate::error::Result;
use crate::value_objects::Instance;

/// Record of objects that went through activation or deactivation
///
/// Exactly one cache per scope tree holds state. Caches of child scopes
/// forward to it, see [`ActivationCache::authority`].
pub trait ActivationCache: Send + Sync {
    /// Forget every record
    fn clear(&self);

    /// Record an activation; `false` if the object was already recorded
    fn add_activated_instance(&self, instance: &Instance) -> bool;

    /// Record a deactivation; `false` if the object was already recorded
    fn add_deactivated_instance(&self, instance: &Instance) -> bool;

    /// Whether the object was activated
    fn is_activated(&self, instance: &Instance) -> bool;

    /// Whether the object was deactivated
    fn is_deactivated(&self, instance: &Instance) -> bool;

    /// The cache that actually holds the records
    fn authority(self: Arc<Self>) -> Arc<dyn ActivationCache>;

    /// Release resources
    fn dispose(&self) {}
}

/// Whether the pipeline continues after a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFlow {
    /// Run the next strategy
    Continue,
    /// Stop; another caller already handled this object
    Halt,
}

/// One step of the activation / deactivation pipeline
pub trait ActivationStrategy: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Run on a newly produced instance
    fn activate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow>;

    /// Run on a released instance
    fn deactivate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow>;

    /// Release resources
    fn dispose(&self) {}
}

/// Objects with an initialization side effect
pub trait Initializable: Send + Sync {
    /// Called once, when the object is first activated
    fn initialize(&self);
}
