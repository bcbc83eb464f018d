//! Activation pipeline
//!
//! Runs the activation strategy components of the context scope in
//! registration order. Objects the activation cache already knows are skipped
//! entirely, which is what keeps an object produced by a parent scope from
//! being initialized again when a child scope hands it out.

use nest_domain::bindings::Context;
use nest_domain::error::Result;
use nest_domain::ports::{
    ActivationCache, ActivationFlow, ActivationStrategy, ComponentRegistryExt,
};
use nest_domain::value_objects::Instance;
use tracing::trace;

/// Activation and deactivation entry points
pub struct Pipeline;

impl Pipeline {
    /// Activate a newly produced instance
    pub fn activate(context: &Context, instance: &Instance) -> Result<()> {
        let components = context.scope().components();
        let cache = components.get::<dyn ActivationCache>()?;
        if cache.is_activated(instance) {
            trace!(
                scope = context.scope().name(),
                instance = ?instance.id(),
                "Skipping activation of known instance"
            );
            return Ok(());
        }

        for strategy in components.get_all::<dyn ActivationStrategy>()? {
            if strategy.activate(context, instance)? == ActivationFlow::Halt {
                trace!(strategy = strategy.name(), "Activation halted");
                break;
            }
        }
        Ok(())
    }

    /// Deactivate a released instance
    pub fn deactivate(context: &Context, instance: &Instance) -> Result<()> {
        let components = context.scope().components();
        let cache = components.get::<dyn ActivationCache>()?;
        if cache.is_deactivated(instance) {
            trace!(
                scope = context.scope().name(),
                instance = ?instance.id(),
                "Skipping deactivation of known instance"
            );
            return Ok(());
        }

        for strategy in components.get_all::<dyn ActivationStrategy>()? {
            if strategy.deactivate(context, instance)? == ActivationFlow::Halt {
                trace!(strategy = strategy.name(), "Deactivation halted");
                break;
            }
        }
        Ok(())
    }
}
