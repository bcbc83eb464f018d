//! Resolution requests and injection targets

use std::fmt;
use std::sync::Arc;

use super::service::{Instance, ServiceKey};
use crate::planning::Injectable;

/// Produces the default value of a target
pub type DefaultValue = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Named value supplied for a constructor parameter
#[derive(Clone, Debug)]
pub struct ConstructorArgument {
    name: String,
    value: Instance,
}

impl ConstructorArgument {
    /// Create an argument for the parameter `name`
    pub fn new<S: ?Sized + Send + Sync + 'static>(name: impl Into<String>, value: Arc<S>) -> Self {
        Self {
            name: name.into(),
            value: Instance::new(value),
        }
    }

    /// Create an argument from an already wrapped instance
    pub fn from_instance(name: impl Into<String>, value: Instance) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supplied value
    pub fn value(&self) -> &Instance {
        &self.value
    }
}

/// Shape of an injection target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShape {
    /// One instance of the service
    Single,
    /// Every instance of the element service
    Sequence,
}

/// A constructor parameter that receives an injected value
#[derive(Clone)]
pub struct Target {
    name: &'static str,
    declared: ServiceKey,
    element: Option<ServiceKey>,
    default: Option<DefaultValue>,
}

impl Target {
    /// Parameter receiving one `S`
    pub fn single<S: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            declared: ServiceKey::of::<S>(),
            element: None,
            default: None,
        }
    }

    /// Parameter receiving one `T`, self-bindable when unbound
    pub fn injectable<T: Injectable>(name: &'static str) -> Self {
        Self {
            name,
            declared: ServiceKey::injectable::<T>(),
            element: None,
            default: None,
        }
    }

    /// Parameter receiving every `S`, declared as `Vec<Arc<S>>`
    pub fn sequence<S: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            declared: ServiceKey::of::<Vec<Arc<S>>>(),
            element: Some(ServiceKey::of::<S>()),
            default: None,
        }
    }

    /// Give the parameter a default value
    pub fn with_default<S, F>(mut self, default: F) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<S> + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(move || Instance::new(default())));
        self
    }

    /// Parameter name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter type
    pub fn declared(&self) -> &ServiceKey {
        &self.declared
    }

    /// Shape of the parameter
    pub fn shape(&self) -> TargetShape {
        if self.element.is_some() {
            TargetShape::Sequence
        } else {
            TargetShape::Single
        }
    }

    /// Whether the parameter collects every instance
    pub fn is_sequence(&self) -> bool {
        self.element.is_some()
    }

    /// Service a binding must exist for, sequences unwrapped to their element
    pub fn binding_key(&self) -> ServiceKey {
        self.element.unwrap_or(self.declared)
    }

    /// Whether the parameter carries a usable default
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produce the default value, if any
    pub fn default_instance(&self) -> Option<Instance> {
        self.default.as_ref().map(|default| default())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("shape", &self.shape())
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// A single resolution attempt
///
/// Requests are values: every modifier consumes the request and returns a new
/// one, nothing changes a request once it has been handed to a resolver.
#[derive(Clone, Debug)]
pub struct Request {
    service: ServiceKey,
    name: Option<String>,
    target: Option<Target>,
    arguments: Vec<ConstructorArgument>,
    ignore_implicit_bindings: bool,
    optional: bool,
    depth: usize,
    activating: Vec<u64>,
}

impl Request {
    /// Request for a service
    pub fn new(service: ServiceKey) -> Self {
        Self {
            service,
            name: None,
            target: None,
            arguments: Vec::new(),
            ignore_implicit_bindings: false,
            optional: false,
            depth: 0,
            activating: Vec::new(),
        }
    }

    /// Request for service type `S`
    pub fn for_service<S: ?Sized + 'static>() -> Self {
        Self::new(ServiceKey::of::<S>())
    }

    /// Request issued while injecting `target` during `parent`
    pub fn for_target(parent: &Request, target: &Target) -> Self {
        Self {
            service: target.binding_key(),
            name: None,
            target: Some(target.clone()),
            arguments: Vec::new(),
            ignore_implicit_bindings: false,
            optional: target.is_sequence(),
            depth: parent.depth + 1,
            activating: parent.activating.clone(),
        }
    }

    /// Mark as issued from within the resolution of `parent`
    pub fn nested_in(mut self, parent: &Request) -> Self {
        self.depth = parent.depth + 1;
        self.activating.clone_from(&parent.activating);
        self
    }

    /// Record that the singleton of binding `id` is being built on this chain
    pub fn activating(mut self, id: u64) -> Self {
        self.activating.push(id);
        self
    }

    /// Whether the singleton of binding `id` is already being built on this chain
    pub fn is_activating(&self, id: u64) -> bool {
        self.activating.contains(&id)
    }

    /// Restrict to bindings with this name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supply a constructor argument
    pub fn with_argument(mut self, argument: ConstructorArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Set whether implicit bindings may satisfy the request
    pub fn ignoring_implicit_bindings(mut self, ignore: bool) -> Self {
        self.ignore_implicit_bindings = ignore;
        self
    }

    /// Allow the request to resolve to nothing
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Requested service
    pub fn service(&self) -> &ServiceKey {
        &self.service
    }

    /// Required binding name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Target being injected, for nested requests
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Supplied constructor arguments
    pub fn arguments(&self) -> &[ConstructorArgument] {
        &self.arguments
    }

    /// Argument supplied for parameter `name`
    pub fn argument(&self, name: &str) -> Option<&ConstructorArgument> {
        self.arguments.iter().find(|argument| argument.name() == name)
    }

    /// Whether implicit bindings are suppressed
    pub fn ignore_implicit_bindings(&self) -> bool {
        self.ignore_implicit_bindings
    }

    /// Whether resolving to nothing is acceptable
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Nesting depth, zero for requests issued by callers
    pub fn depth(&self) -> usize {
        self.depth
    }
}
