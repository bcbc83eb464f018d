//! Standard component registry

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use nest_domain::error::{Error, Result};
use nest_domain::ports::{Component, ComponentRegistration, ComponentRegistry};
use nest_domain::value_objects::ComponentKind;
use tracing::debug;

/// Registry owning every provider it hands out
///
/// Unrestricted: any kind may be added, removed or replaced. Root scopes use
/// it directly, child scopes use it for their local layer.
#[derive(Default)]
pub struct StandardComponentRegistry {
    registrations: DashMap<ComponentKind, Vec<Arc<ComponentRegistration>>>,
    disposed: AtomicBool,
}

impl StandardComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider
    pub fn insert(&self, registration: ComponentRegistration) {
        debug!(
            kind = %registration.kind(),
            implementation = registration.implementation(),
            lifetime = ?registration.lifetime(),
            "Registering component"
        );
        self.registrations
            .entry(registration.kind())
            .or_default()
            .push(Arc::new(registration));
    }

    /// Registrations of `kind`, in registration order
    ///
    /// Copied out so no map guard is held while providers are built.
    pub fn registrations(&self, kind: ComponentKind) -> Vec<Arc<ComponentRegistration>> {
        self.registrations
            .get(&kind)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Whether any provider of `kind` is registered
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.registrations
            .get(&kind)
            .is_some_and(|entry| !entry.is_empty())
    }
}

impl ComponentRegistry for StandardComponentRegistry {
    fn get_component(&self, kind: ComponentKind) -> Result<Component> {
        self.registrations(kind)
            .first()
            .ok_or_else(|| Error::no_component(kind))?
            .provider()
    }

    fn get_all_components(&self, kind: ComponentKind) -> Result<Vec<Component>> {
        self.registrations(kind)
            .iter()
            .map(|registration| registration.provider())
            .collect()
    }

    fn add(&self, registration: ComponentRegistration) -> Result<()> {
        self.insert(registration);
        Ok(())
    }

    fn add_transient(&self, registration: ComponentRegistration) -> Result<()> {
        self.insert(registration.into_transient());
        Ok(())
    }

    fn remove(&self, kind: ComponentKind, implementation: &str) -> Result<()> {
        let removed: Vec<_> = match self.registrations.get_mut(&kind) {
            Some(mut entry) => {
                let (removed, kept) = entry
                    .drain(..)
                    .partition(|registration| registration.implementation() == implementation);
                *entry = kept;
                removed
            }
            None => Vec::new(),
        };
        debug!(%kind, implementation, removed = removed.len(), "Removed component");
        removed.iter().for_each(|registration| registration.dispose());
        Ok(())
    }

    fn remove_all(&self, kind: ComponentKind) -> Result<()> {
        if let Some((_, removed)) = self.registrations.remove(&kind) {
            debug!(%kind, removed = removed.len(), "Removed all components");
            removed.iter().for_each(|registration| registration.dispose());
        }
        Ok(())
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let kinds: Vec<ComponentKind> = self.registrations.iter().map(|entry| *entry.key()).collect();
        for kind in kinds {
            if let Some((_, registrations)) = self.registrations.remove(&kind) {
                registrations.iter().for_each(|registration| registration.dispose());
            }
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
