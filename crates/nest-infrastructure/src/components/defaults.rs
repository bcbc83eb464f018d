//! Standard component sets

use std::sync::Arc;

use nest_domain::error::Result;
use nest_domain::ports::{
    ActivationCache, ActivationStrategy, ComponentRegistration, ComponentRegistry,
    ConstructorScorer, MissingBindingResolver, Selector,
};

use super::standard::StandardComponentRegistry;
use crate::activation::{
    ActivationCacheStrategy, BindingActionStrategy, InitializableStrategy,
    StandardActivationCache,
};
use crate::bindings::{DefaultValueBindingResolver, SelfBindingResolver};
use crate::config::ScopeSettings;
use crate::constants::{
    ACTIVATION_CACHE_STRATEGY, BINDING_ACTION_STRATEGY, DEFAULT_VALUE_BINDING_RESOLVER,
    INITIALIZABLE_STRATEGY, SELF_BINDING_RESOLVER, STANDARD_ACTIVATION_CACHE,
    STANDARD_CONSTRUCTOR_SCORER, STANDARD_SELECTOR,
};
use crate::selection::{StandardConstructorScorer, StandardSelector};

/// Registry of a root scope: identity components plus the standard extensions
pub fn standard_registry(settings: &ScopeSettings) -> Result<StandardComponentRegistry> {
    let registry = StandardComponentRegistry::new();
    registry.insert(ComponentRegistration::singleton::<dyn ActivationCache, _>(
        STANDARD_ACTIVATION_CACHE,
        || Ok(Arc::new(StandardActivationCache::new()) as Arc<dyn ActivationCache>),
    ));
    registry.insert(ComponentRegistration::singleton::<dyn ConstructorScorer, _>(
        STANDARD_CONSTRUCTOR_SCORER,
        || Ok(Arc::new(StandardConstructorScorer) as Arc<dyn ConstructorScorer>),
    ));
    registry.insert(ComponentRegistration::singleton::<dyn Selector, _>(
        STANDARD_SELECTOR,
        || Ok(Arc::new(StandardSelector) as Arc<dyn Selector>),
    ));
    register_standard_extensions(&registry, settings)?;
    Ok(registry)
}

/// Missing-binding resolvers and activation strategies, in pipeline order
pub fn register_standard_extensions(
    registry: &dyn ComponentRegistry,
    settings: &ScopeSettings,
) -> Result<()> {
    registry.add(ComponentRegistration::singleton::<dyn MissingBindingResolver, _>(
        DEFAULT_VALUE_BINDING_RESOLVER,
        || Ok(Arc::new(DefaultValueBindingResolver) as Arc<dyn MissingBindingResolver>),
    ))?;
    registry.add(ComponentRegistration::singleton::<dyn MissingBindingResolver, _>(
        SELF_BINDING_RESOLVER,
        || Ok(Arc::new(SelfBindingResolver) as Arc<dyn MissingBindingResolver>),
    ))?;

    if !settings.activation_cache_disabled {
        registry.add(ComponentRegistration::singleton::<dyn ActivationStrategy, _>(
            ACTIVATION_CACHE_STRATEGY,
            || Ok(Arc::new(ActivationCacheStrategy) as Arc<dyn ActivationStrategy>),
        ))?;
    }
    registry.add(ComponentRegistration::singleton::<dyn ActivationStrategy, _>(
        INITIALIZABLE_STRATEGY,
        || Ok(Arc::new(InitializableStrategy) as Arc<dyn ActivationStrategy>),
    ))?;
    registry.add(ComponentRegistration::singleton::<dyn ActivationStrategy, _>(
        BINDING_ACTION_STRATEGY,
        || Ok(Arc::new(BindingActionStrategy) as Arc<dyn ActivationStrategy>),
    ))?;
    Ok(())
}
