//! Parent-fallback resolution

use std::sync::Arc;

use nest_domain::bindings::{Binding, BindingTarget, Context, InstanceLifetime};
use nest_domain::error::{Error, Result};
use nest_domain::ports::{
    ComponentRegistryExt, MissingBindingResolver, Resolution, ResolutionRoot, ScopeNode,
};
use nest_domain::value_objects::{Instance, Request};
use tracing::{debug, warn};

use super::Scope;
use crate::activation::Pipeline;
use crate::selection::construct;

impl Scope {
    fn resolvers(&self) -> Vec<Arc<dyn MissingBindingResolver>> {
        self.components
            .get_all::<dyn MissingBindingResolver>()
            .unwrap_or_default()
    }

    /// Whether the scope alone can resolve `request`; constructs nothing
    pub fn can_resolve_locally(&self, request: &Request, ignore_implicit: bool) -> bool {
        !self.is_disposed()
            && self
                .bindings
                .can_resolve_locally(request, ignore_implicit, &self.resolvers())
    }

    fn check_request(&self, request: &Request) -> Result<()> {
        self.ensure_active()?;
        if request.depth() > self.settings.max_resolution_depth {
            return Err(Error::activation(format!(
                "resolution of {} exceeded the maximum depth of {} in scope '{}', \
                 the dependency graph is probably cyclic",
                request.service(),
                self.settings.max_resolution_depth,
                self.name
            )));
        }
        Ok(())
    }

    /// Resolve `request` with this scope's own bindings and implicit binding machinery
    fn resolve_locally(self: &Arc<Self>, request: &Request) -> Result<Resolution> {
        let mut bindings = self
            .bindings
            .satisfying(request, request.ignore_implicit_bindings());
        if bindings.is_empty() && !request.ignore_implicit_bindings() {
            bindings = self.bindings.handle_missing(request, &self.resolvers());
        }

        if bindings.is_empty() {
            if request.is_optional() {
                return Ok(Resolution::empty());
            }
            return Err(Error::no_viable_binding(
                request.service().type_name(),
                self.name.clone(),
            ));
        }

        let scope = Arc::clone(self);
        let request = request.clone();
        Ok(Resolution::from_iter(
            bindings
                .into_iter()
                .map(move |binding| scope.instantiate(&request, binding)),
        ))
    }

    /// Produce an instance through `binding` and run activation
    ///
    /// A singleton is published to other callers only after its activation
    /// has finished; concurrent callers wait for the pending build.
    fn instantiate(self: &Arc<Self>, request: &Request, binding: Arc<Binding>) -> Result<Instance> {
        if binding.lifetime() == InstanceLifetime::Transient {
            return self.build_and_activate(request.clone(), binding);
        }
        if let Some(instance) = binding.cached_instance() {
            return Ok(instance);
        }
        if request.is_activating(binding.id()) {
            return Err(Error::activation(format!(
                "singleton {} in scope '{}' depends on itself, the dependency graph is cyclic",
                binding.service(),
                self.name
            )));
        }
        let request = request.clone().activating(binding.id());
        binding.singleton_or_try_init(|| self.build_and_activate(request, Arc::clone(&binding)))
    }

    fn build_and_activate(self: &Arc<Self>, request: Request, binding: Arc<Binding>) -> Result<Instance> {
        let context = Context::new(Arc::clone(self) as Arc<dyn ScopeNode>, request, binding);
        let instance = match context.binding().target() {
            BindingTarget::Constant(instance) => instance.clone(),
            BindingTarget::Method(factory) => factory(&context)?,
            BindingTarget::Type { plan, cast } => construct(&context, plan, cast)?,
        };
        Pipeline::activate(&context, &instance)?;
        Ok(instance)
    }
}

impl ResolutionRoot for Scope {
    fn can_resolve_with(&self, request: &Request, ignore_implicit_bindings: bool) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.can_resolve_locally(request, ignore_implicit_bindings)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.can_resolve_with(request, true))
    }

    fn resolve(&self, request: &Request) -> Resolution {
        let scope = match self.check_request(request).and_then(|()| self.strong()) {
            Ok(scope) => scope,
            Err(error) => return Resolution::failed(error),
        };

        let Some(parent) = self.parent.clone() else {
            return Resolution::from_result(scope.resolve_locally(request));
        };

        if self.can_resolve_locally(request, true) {
            debug!(scope = %self.name, service = %request.service(), step = "local-explicit", "Resolving");
            return Resolution::from_result(scope.resolve_locally(request));
        }

        if parent.can_resolve_with(request, true) {
            debug!(scope = %self.name, service = %request.service(), step = "parent-explicit", "Resolving");
            return parent.resolve(request);
        }

        let request = request.clone();
        Resolution::deferred(move || {
            debug!(scope = %scope.name, service = %request.service(), step = "local-implicit", "Resolving");
            let local = match scope.resolve_locally(&request).and_then(Resolution::prime) {
                Err(error) if error.is_no_viable_binding() => error,
                resolved => return resolved,
            };

            debug!(scope = %scope.name, service = %request.service(), step = "parent-implicit", "Resolving");
            let fallback = request.clone().ignoring_implicit_bindings(false);
            match parent.resolve(&fallback).prime() {
                Ok(resolution) => Ok(resolution),
                Err(parent_error) => {
                    warn!(
                        scope = %scope.name,
                        service = %request.service(),
                        parent_error = %parent_error,
                        "Parent fallback failed, reporting the local failure"
                    );
                    Err(local.with_fallback_failure(parent_error))
                }
            }
        })
    }

    fn as_scope_node(self: Arc<Self>) -> Option<Arc<dyn ScopeNode>> {
        Some(self)
    }
}
