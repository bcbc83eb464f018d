//! Per-scope binding table

use std::sync::Arc;

use dashmap::DashMap;
use nest_domain::bindings::Binding;
use nest_domain::ports::MissingBindingResolver;
use nest_domain::value_objects::{Request, ServiceKey};
use tracing::debug;

/// Bindings of one scope, keyed by service
///
/// Lookups copy the bindings out of the map, so no map guard is held while a
/// binding is used.
#[derive(Default)]
pub struct BindingStore {
    bindings: DashMap<ServiceKey, Vec<Arc<Binding>>>,
}

impl BindingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding after the existing ones for its service
    pub fn add(&self, binding: Arc<Binding>) {
        self.bindings
            .entry(*binding.service())
            .or_default()
            .push(binding);
    }

    /// Remove every binding for `service`, returning them
    pub fn remove_all(&self, service: &ServiceKey) -> Vec<Arc<Binding>> {
        self.bindings
            .remove(service)
            .map(|(_, removed)| removed)
            .unwrap_or_default()
    }

    /// Bindings for `service` in declaration order
    pub fn bindings_for(&self, service: &ServiceKey) -> Vec<Arc<Binding>> {
        self.bindings
            .get(service)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Every binding in the store
    pub fn all(&self) -> Vec<Arc<Binding>> {
        self.bindings
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }

    /// Whether a user-declared binding exists for `service`
    pub fn has_explicit_binding(&self, service: &ServiceKey) -> bool {
        self.bindings
            .get(service)
            .is_some_and(|entry| entry.iter().any(|binding| !binding.is_implicit()))
    }

    /// Bindings able to satisfy `request`
    ///
    /// Explicit bindings win over implicit ones. Implicit bindings are only
    /// returned when no explicit binding matches and they are not ignored.
    pub fn satisfying(&self, request: &Request, ignore_implicit: bool) -> Vec<Arc<Binding>> {
        let (explicit, implicit): (Vec<_>, Vec<_>) = self
            .bindings_for(request.service())
            .into_iter()
            .filter(|binding| binding.satisfies(request))
            .partition(|binding| !binding.is_implicit());

        if !explicit.is_empty() || ignore_implicit {
            explicit
        } else {
            implicit
        }
    }

    /// Whether `request` can be resolved from this store
    ///
    /// Missing-binding resolvers are asked, but nothing they produce is
    /// registered.
    pub fn can_resolve_locally(
        &self,
        request: &Request,
        ignore_implicit: bool,
        resolvers: &[Arc<dyn MissingBindingResolver>],
    ) -> bool {
        if !self.satisfying(request, ignore_implicit).is_empty() {
            return true;
        }
        !ignore_implicit
            && resolvers.iter().any(|resolver| {
                resolver
                    .resolve(request)
                    .iter()
                    .any(|binding| binding.satisfies(request))
            })
    }

    /// Register implicit bindings for an unbound request
    ///
    /// The first resolver producing bindings wins. If a concurrent caller
    /// already registered matching bindings, those are returned instead.
    pub fn handle_missing(
        &self,
        request: &Request,
        resolvers: &[Arc<dyn MissingBindingResolver>],
    ) -> Vec<Arc<Binding>> {
        let Some((resolver, produced)) = resolvers.iter().find_map(|resolver| {
            let produced = resolver.resolve(request);
            (!produced.is_empty()).then(|| (resolver.name(), produced))
        }) else {
            return Vec::new();
        };

        let mut entry = self.bindings.entry(*request.service()).or_default();
        if !entry.iter().any(|binding| binding.satisfies(request)) {
            debug!(
                resolver,
                service = %request.service(),
                count = produced.len(),
                "Registering implicit bindings"
            );
            entry.extend(produced);
        }
        entry
            .iter()
            .filter(|binding| binding.satisfies(request))
            .cloned()
            .collect()
    }

    /// Remove every binding, returning them
    pub fn clear(&self) -> Vec<Arc<Binding>> {
        let services: Vec<ServiceKey> = self.bindings.iter().map(|entry| *entry.key()).collect();
        services
            .iter()
            .flat_map(|service| self.remove_all(service))
            .collect()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.iter().map(|entry| entry.len()).sum()
    }

    /// Whether the store holds no binding
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
