//! Forwarding activation cache of child scopes

use std::sync::Arc;

use nest_domain::error::Result;
use nest_domain::ports::{ActivationCache, ComponentRegistry, ComponentRegistryExt};
use nest_domain::value_objects::Instance;
use tracing::trace;

/// Activation cache holding no state of its own
///
/// Every record operation goes to the authoritative cache of the scope tree.
/// `clear` does nothing: a descendant scope must not wipe state its ancestors
/// and siblings depend on.
pub struct ChildActivationCache {
    authority: Arc<dyn ActivationCache>,
}

impl ChildActivationCache {
    /// Forward to the cache resolved from `registry`, usually the parent's
    pub fn from_registry(registry: &dyn ComponentRegistry) -> Result<Self> {
        let cache = registry.get::<dyn ActivationCache>()?;
        Ok(Self::forwarding_to(cache))
    }

    /// Forward to `cache`, or to whatever `cache` itself forwards to
    pub fn forwarding_to(cache: Arc<dyn ActivationCache>) -> Self {
        Self {
            authority: cache.authority(),
        }
    }
}

impl ActivationCache for ChildActivationCache {
    fn clear(&self) {
        trace!("Ignoring clear on a forwarding activation cache");
    }

    fn add_activated_instance(&self, instance: &Instance) -> bool {
        self.authority.add_activated_instance(instance)
    }

    fn add_deactivated_instance(&self, instance: &Instance) -> bool {
        self.authority.add_deactivated_instance(instance)
    }

    fn is_activated(&self, instance: &Instance) -> bool {
        self.authority.is_activated(instance)
    }

    fn is_deactivated(&self, instance: &Instance) -> bool {
        self.authority.is_deactivated(instance)
    }

    fn authority(self: Arc<Self>) -> Arc<dyn ActivationCache> {
        Arc::clone(&self.authority)
    }
}
