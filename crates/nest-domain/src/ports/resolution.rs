//! Resolution ports
//!
//! [`ResolutionRoot`] is the narrow surface a child scope holds for its parent:
//! "can you resolve this" and "resolve this". [`ScopeNode`] is the full view of
//! a scope, reachable from a resolution root only by an explicit
//! [`ResolutionRoot::as_scope_node`] query.

use std::any::type_name;
use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::planning::Injectable;
use crate::ports::components::ComponentRegistry;
use crate::value_objects::{Instance, Request, ServiceKey};

type Thunk = Box<dyn FnOnce() -> Result<Resolution> + Send>;
type Stream = Box<dyn Iterator<Item = Result<Instance>> + Send>;

enum State {
    Deferred(Thunk),
    Streaming(Stream),
    Failed(Error),
    Finished,
}

/// Lazy sequence of resolved instances
///
/// Nothing is constructed until the sequence is pulled. A deferred resolution
/// runs its selection logic on the first pull, so errors surface at the point
/// of iteration.
pub struct Resolution {
    state: State,
}

impl Resolution {
    /// Run `thunk` on first pull and continue with the resolution it returns
    pub fn deferred<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Result<Resolution> + Send + 'static,
    {
        Self {
            state: State::Deferred(Box::new(thunk)),
        }
    }

    /// Stream instances from an iterator
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<Instance>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            state: State::Streaming(Box::new(items.into_iter())),
        }
    }

    /// Resolution yielding a single error
    pub fn failed(error: Error) -> Self {
        Self {
            state: State::Failed(error),
        }
    }

    /// Resolution yielding nothing
    pub fn empty() -> Self {
        Self {
            state: State::Finished,
        }
    }

    /// Lift an eager selection result into a resolution
    pub fn from_result(result: Result<Resolution>) -> Self {
        result.unwrap_or_else(Self::failed)
    }

    /// Pull the first element now
    ///
    /// Returns the error if the first element is one; otherwise a resolution
    /// that yields the pulled element followed by the rest.
    pub fn prime(mut self) -> Result<Resolution> {
        match self.next() {
            None => Ok(Self::empty()),
            Some(Err(error)) => Err(error),
            Some(Ok(first)) => Ok(Self::from_iter(iter::once(Ok(first)).chain(self))),
        }
    }
}

impl Iterator for Resolution {
    type Item = Result<Instance>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::Finished) {
                State::Deferred(thunk) => match thunk() {
                    Ok(resolved) => self.state = resolved.state,
                    Err(error) => return Some(Err(error)),
                },
                State::Streaming(mut stream) => {
                    let item = stream.next();
                    if item.is_some() {
                        self.state = State::Streaming(stream);
                    }
                    return item;
                }
                State::Failed(error) => return Some(Err(error)),
                State::Finished => return None,
            }
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Deferred(_) => "deferred",
            State::Streaming(_) => "streaming",
            State::Failed(_) => "failed",
            State::Finished => "finished",
        };
        f.debug_struct("Resolution").field("state", &state).finish()
    }
}

/// Narrow resolution surface of a scope
pub trait ResolutionRoot: Send + Sync {
    /// Whether `request` can be resolved, using the request's own implicit-binding flag
    fn can_resolve(&self, request: &Request) -> bool {
        self.can_resolve_with(request, request.ignore_implicit_bindings())
    }

    /// Whether `request` can be resolved; never constructs anything
    fn can_resolve_with(&self, request: &Request, ignore_implicit_bindings: bool) -> bool;

    /// Lazily resolve every instance matching `request`
    fn resolve(&self, request: &Request) -> Resolution;

    /// Full scope view, when this root is a scope
    fn as_scope_node(self: Arc<Self>) -> Option<Arc<dyn ScopeNode>> {
        None
    }
}

/// Full view of a scope, used by scorers and caches that walk the chain
pub trait ScopeNode: ResolutionRoot {
    /// Scope name used in diagnostics
    fn name(&self) -> &str;

    /// The scope's component registry
    fn components(&self) -> Arc<dyn ComponentRegistry>;

    /// Whether the scope itself holds an explicit binding for `service`
    fn has_explicit_binding(&self, service: &ServiceKey) -> bool;

    /// Parent resolution root, for child scopes
    fn parent(&self) -> Option<Arc<dyn ResolutionRoot>>;
}

/// Typed conveniences over any resolution root
pub trait ResolutionRootExt: ResolutionRoot {
    /// Resolve one `S`
    fn get<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>> {
        self.get_with(Request::for_service::<S>())
    }

    /// Resolve one `S` from a binding named `name`
    fn get_named<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>> {
        self.get_with(Request::for_service::<S>().named(name))
    }

    /// Resolve one `T`, letting the scope self-bind it when unbound
    fn get_self<T: Injectable>(&self) -> Result<Arc<T>> {
        self.get_with(Request::new(ServiceKey::injectable::<T>()))
    }

    /// Resolve the first instance for `request`, viewed as `S`
    fn get_with<S: ?Sized + Send + Sync + 'static>(&self, request: Request) -> Result<Arc<S>> {
        let instance = self.resolve(&request).next().unwrap_or_else(|| {
            Err(Error::no_viable_binding(
                request.service().type_name(),
                "<resolution root>",
            ))
        })?;
        view(&instance)
    }

    /// Resolve one `S`, or `None` when nothing is bound anywhere
    fn try_get<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<S>>> {
        let request = Request::for_service::<S>().optional();
        match self.resolve(&request).next() {
            None => Ok(None),
            Some(instance) => view(&instance?).map(Some),
        }
    }

    /// Resolve every `S`
    fn get_all<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Vec<Arc<S>>> {
        let request = Request::for_service::<S>().optional();
        self.resolve(&request)
            .map(|instance| view(&instance?))
            .collect()
    }

    /// Whether an `S` can be resolved
    fn can_get<S: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.can_resolve(&Request::for_service::<S>())
    }
}

impl<R: ResolutionRoot + ?Sized> ResolutionRootExt for R {}

fn view<S: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Result<Arc<S>> {
    instance.downcast::<S>().ok_or_else(|| {
        Error::activation(format!(
            "instance of {} cannot be viewed as {}",
            instance.type_name(),
            type_name::<S>()
        ))
    })
}
