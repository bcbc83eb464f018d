//! Standard activation strategies

use nest_domain::bindings::Context;
use nest_domain::error::Result;
use nest_domain::ports::{
    ActivationCache, ActivationFlow, ActivationStrategy, ComponentRegistryExt,
};
use nest_domain::value_objects::Instance;
use tracing::trace;

use crate::constants::{
    ACTIVATION_CACHE_STRATEGY, BINDING_ACTION_STRATEGY, INITIALIZABLE_STRATEGY,
};

/// Records activations and deactivations in the context scope's cache
///
/// Halts the pipeline when the object was already recorded, which happens
/// when two callers activate the same object concurrently.
#[derive(Debug, Default)]
pub struct ActivationCacheStrategy;

impl ActivationStrategy for ActivationCacheStrategy {
    fn name(&self) -> &'static str {
        ACTIVATION_CACHE_STRATEGY
    }

    fn activate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow> {
        let cache = context.scope().components().get::<dyn ActivationCache>()?;
        if cache.add_activated_instance(instance) {
            Ok(ActivationFlow::Continue)
        } else {
            trace!(instance = ?instance.id(), "Instance activated by another caller");
            Ok(ActivationFlow::Halt)
        }
    }

    fn deactivate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow> {
        let cache = context.scope().components().get::<dyn ActivationCache>()?;
        if cache.add_deactivated_instance(instance) {
            Ok(ActivationFlow::Continue)
        } else {
            Ok(ActivationFlow::Halt)
        }
    }
}

/// Runs the object's initialization hook
#[derive(Debug, Default)]
pub struct InitializableStrategy;

impl ActivationStrategy for InitializableStrategy {
    fn name(&self) -> &'static str {
        INITIALIZABLE_STRATEGY
    }

    fn activate(&self, _context: &Context, instance: &Instance) -> Result<ActivationFlow> {
        if let Some(initializer) = instance.initializer() {
            initializer.initialize();
        }
        Ok(ActivationFlow::Continue)
    }

    fn deactivate(&self, _context: &Context, _instance: &Instance) -> Result<ActivationFlow> {
        Ok(ActivationFlow::Continue)
    }
}

/// Runs the activation and deactivation actions of the binding
#[derive(Debug, Default)]
pub struct BindingActionStrategy;

impl ActivationStrategy for BindingActionStrategy {
    fn name(&self) -> &'static str {
        BINDING_ACTION_STRATEGY
    }

    fn activate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow> {
        for action in context.binding().activation_actions() {
            action(context, instance);
        }
        Ok(ActivationFlow::Continue)
    }

    fn deactivate(&self, context: &Context, instance: &Instance) -> Result<ActivationFlow> {
        for action in context.binding().deactivation_actions() {
            action(context, instance);
        }
        Ok(ActivationFlow::Continue)
    }
}
