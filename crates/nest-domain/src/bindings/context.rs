//! Activation context handed to factories and strategies

use std::fmt;
use std::sync::Arc;

use super::binding::Binding;
use crate::error::Result;
use crate::ports::{ResolutionRootExt, ScopeNode};
use crate::value_objects::{Instance, Request, Target};

/// One resolution in progress: which scope, which request, which binding
#[derive(Clone)]
pub struct Context {
    scope: Arc<dyn ScopeNode>,
    request: Request,
    binding: Arc<Binding>,
}

impl Context {
    /// Context for resolving `request` through `binding` in `scope`
    pub fn new(scope: Arc<dyn ScopeNode>, request: Request, binding: Arc<Binding>) -> Self {
        Self {
            scope,
            request,
            binding,
        }
    }

    /// Scope the resolution runs in
    pub fn scope(&self) -> &Arc<dyn ScopeNode> {
        &self.scope
    }

    /// Request being resolved
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Binding producing the instance
    pub fn binding(&self) -> &Arc<Binding> {
        &self.binding
    }

    /// Explicit value for parameter `name`, request arguments first
    pub fn argument(&self, name: &str) -> Option<&Instance> {
        self.request
            .argument(name)
            .or_else(|| self.binding.argument(name))
            .map(|argument| argument.value())
    }

    /// Request for injecting `target` from within this resolution
    pub fn nested_request(&self, target: &Target) -> Request {
        Request::for_target(&self.request, target)
    }

    /// Resolve an `S` through the context's scope
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>> {
        self.scope
            .get_with(Request::for_service::<S>().nested_in(&self.request))
    }

    /// Resolve an `S` from the binding named `name`
    pub fn get_named<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>> {
        self.scope.get_with(
            Request::for_service::<S>()
                .named(name)
                .nested_in(&self.request),
        )
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("scope", &self.scope.name())
            .field("request", &self.request)
            .field("binding", &self.binding)
            .finish()
    }
}
