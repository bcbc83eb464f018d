//! Layered component registry of child scopes
//!
//! Lookups try the local layer first and fall back to the parent registry.
//! Writes only ever touch the local layer, and writes to the capability kinds
//! that define identity for the whole scope tree are rejected.

use std::sync::Arc;

use nest_domain::error::{Error, Result};
use nest_domain::ports::{
    ActivationCache, Component, ComponentRegistration, ComponentRegistry, ConstructorScorer,
    Selector,
};
use nest_domain::value_objects::ComponentKind;
use tracing::debug;

use super::standard::StandardComponentRegistry;
use crate::activation::ChildActivationCache;
use crate::constants::{CHILD_ACTIVATION_CACHE, CHILD_CONSTRUCTOR_SCORER, STANDARD_SELECTOR};
use crate::selection::{ChildConstructorScorer, StandardSelector};

/// Component registry of a child scope
pub struct ChildComponentRegistry {
    scope: String,
    local: StandardComponentRegistry,
    parent: Arc<dyn ComponentRegistry>,
}

impl ChildComponentRegistry {
    /// Layer a registry over `parent`
    ///
    /// The local activation cache forwards to the cache the parent registry
    /// provides; it is resolved on first use.
    pub fn new(scope: impl Into<String>, parent: Arc<dyn ComponentRegistry>) -> Self {
        let cache_source = Arc::clone(&parent);
        Self::layered(
            scope.into(),
            parent,
            ComponentRegistration::singleton::<dyn ActivationCache, _>(
                CHILD_ACTIVATION_CACHE,
                move || {
                    let cache = ChildActivationCache::from_registry(cache_source.as_ref())?;
                    Ok(Arc::new(cache) as Arc<dyn ActivationCache>)
                },
            ),
        )
    }

    /// Layer a registry over `parent`, forwarding activation records to `cache`
    pub fn with_activation_cache(
        scope: impl Into<String>,
        parent: Arc<dyn ComponentRegistry>,
        cache: Arc<dyn ActivationCache>,
    ) -> Self {
        let forwarding: Arc<dyn ActivationCache> =
            Arc::new(ChildActivationCache::forwarding_to(cache));
        Self::layered(
            scope.into(),
            parent,
            ComponentRegistration::existing(CHILD_ACTIVATION_CACHE, forwarding),
        )
    }

    fn layered(
        scope: String,
        parent: Arc<dyn ComponentRegistry>,
        activation_cache: ComponentRegistration,
    ) -> Self {
        let local = StandardComponentRegistry::new();
        local.insert(activation_cache);
        local.insert(ComponentRegistration::singleton::<dyn ConstructorScorer, _>(
            CHILD_CONSTRUCTOR_SCORER,
            || Ok(Arc::new(ChildConstructorScorer) as Arc<dyn ConstructorScorer>),
        ));
        local.insert(ComponentRegistration::singleton::<dyn Selector, _>(
            STANDARD_SELECTOR,
            || Ok(Arc::new(StandardSelector) as Arc<dyn Selector>),
        ));
        Self {
            scope,
            local,
            parent,
        }
    }

    /// Registry that lookups fall back to
    pub fn parent(&self) -> &Arc<dyn ComponentRegistry> {
        &self.parent
    }

    /// Locally owned layer
    pub fn local(&self) -> &StandardComponentRegistry {
        &self.local
    }

    fn check_mutable(&self, kind: ComponentKind) -> Result<()> {
        if kind.is_immutable_in_child() {
            debug!(scope = %self.scope, %kind, "Rejected write to immutable component");
            return Err(Error::immutable_component(kind, self.scope.clone()));
        }
        Ok(())
    }
}

impl ComponentRegistry for ChildComponentRegistry {
    fn get_component(&self, kind: ComponentKind) -> Result<Component> {
        match self.local.get_component(kind) {
            Err(error) if error.is_no_component() => self.parent.get_component(kind),
            found => found,
        }
    }

    fn get_all_components(&self, kind: ComponentKind) -> Result<Vec<Component>> {
        let mut components = self.local.get_all_components(kind)?;
        components.extend(self.parent.get_all_components(kind)?);
        Ok(components)
    }

    fn add(&self, registration: ComponentRegistration) -> Result<()> {
        self.check_mutable(registration.kind())?;
        self.local.add(registration)
    }

    fn add_transient(&self, registration: ComponentRegistration) -> Result<()> {
        self.local.add_transient(registration)
    }

    fn remove(&self, kind: ComponentKind, implementation: &str) -> Result<()> {
        self.check_mutable(kind)?;
        self.local.remove(kind, implementation)
    }

    fn remove_all(&self, kind: ComponentKind) -> Result<()> {
        self.check_mutable(kind)?;
        self.local.remove_all(kind)
    }

    fn dispose(&self) {
        self.local.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.local.is_disposed()
    }
}
