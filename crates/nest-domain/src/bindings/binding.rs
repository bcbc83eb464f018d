//! Bindings: what a scope knows how to produce

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use super::context::Context;
use crate::error::Result;
use crate::planning::{Caster, TypePlan};
use crate::value_objects::{ConstructorArgument, Instance, Request, ServiceKey};

/// Factory receiving the activation context
pub type Factory = Arc<dyn Fn(&Context) -> Result<Instance> + Send + Sync>;

/// Predicate a request must satisfy for a binding to apply
pub type BindingCondition = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Side effect run when an instance of the binding is (de)activated
pub type BindingAction = Arc<dyn Fn(&Context, &Instance) + Send + Sync>;

/// How a binding produces its instance
#[derive(Clone)]
pub enum BindingTarget {
    /// Always the same, already built instance
    Constant(Instance),
    /// User factory
    Method(Factory),
    /// A planned type built through constructor injection
    Type {
        /// Constructors of the concrete type
        plan: Arc<TypePlan>,
        /// View of the built object as the bound service
        cast: Caster,
    },
}

impl BindingTarget {
    /// Target kind, for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Constant(instance) => format!("constant {}", instance.type_name()),
            Self::Method(_) => "method".to_string(),
            Self::Type { plan, .. } => format!("type {}", plan.type_name()),
        }
    }
}

impl fmt::Debug for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// How long a binding's instances live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstanceLifetime {
    /// A new instance per resolution
    #[default]
    Transient,
    /// One instance per binding, kept until the binding's scope releases it
    Singleton,
}

static NEXT_BINDING_ID: AtomicU64 = AtomicU64::new(1);

type SingletonSlot = Arc<OnceCell<Instance>>;

/// Maps a service to a producer
pub struct Binding {
    id: u64,
    service: ServiceKey,
    target: BindingTarget,
    lifetime: InstanceLifetime,
    implicit: bool,
    name: Option<String>,
    arguments: Vec<ConstructorArgument>,
    condition: Option<BindingCondition>,
    activation_actions: Vec<BindingAction>,
    deactivation_actions: Vec<BindingAction>,
    singleton: Mutex<SingletonSlot>,
}

impl Binding {
    /// Explicit transient binding of `service` to `target`
    pub fn new(service: ServiceKey, target: BindingTarget) -> Self {
        Self {
            id: NEXT_BINDING_ID.fetch_add(1, Ordering::Relaxed),
            service,
            target,
            lifetime: InstanceLifetime::Transient,
            implicit: false,
            name: None,
            arguments: Vec::new(),
            condition: None,
            activation_actions: Vec::new(),
            deactivation_actions: Vec::new(),
            singleton: Mutex::new(SingletonSlot::default()),
        }
    }

    /// Mark as synthesized by the framework rather than declared by a user
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Set the instance lifetime
    pub fn in_lifetime(mut self, lifetime: InstanceLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Only satisfy requests for this name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supply a constructor argument for every resolution through this binding
    pub fn with_argument(mut self, argument: ConstructorArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Only satisfy requests matching `condition`
    pub fn when(mut self, condition: BindingCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Run `action` when an instance is activated
    pub fn on_activation(mut self, action: BindingAction) -> Self {
        self.activation_actions.push(action);
        self
    }

    /// Run `action` when an instance is deactivated
    pub fn on_deactivation(mut self, action: BindingAction) -> Self {
        self.deactivation_actions.push(action);
        self
    }

    /// Process-unique binding identity
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Bound service
    pub fn service(&self) -> &ServiceKey {
        &self.service
    }

    /// Producer
    pub fn target(&self) -> &BindingTarget {
        &self.target
    }

    /// Instance lifetime
    pub fn lifetime(&self) -> InstanceLifetime {
        self.lifetime
    }

    /// Whether the framework synthesized the binding
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Binding name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Constructor arguments supplied by the binding
    pub fn arguments(&self) -> &[ConstructorArgument] {
        &self.arguments
    }

    /// Argument supplied for parameter `name`
    pub fn argument(&self, name: &str) -> Option<&ConstructorArgument> {
        self.arguments.iter().find(|argument| argument.name() == name)
    }

    /// Whether the binding has a request condition
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Activation actions in registration order
    pub fn activation_actions(&self) -> &[BindingAction] {
        &self.activation_actions
    }

    /// Deactivation actions in registration order
    pub fn deactivation_actions(&self) -> &[BindingAction] {
        &self.deactivation_actions
    }

    /// Whether the binding applies to `request`
    pub fn satisfies(&self, request: &Request) -> bool {
        if let Some(name) = request.name() {
            if self.name.as_deref() != Some(name) {
                return false;
            }
        }
        self.condition
            .as_ref()
            .is_none_or(|condition| condition(request))
    }

    /// Cached singleton instance, once fully built and activated
    pub fn cached_instance(&self) -> Option<Instance> {
        self.slot().get().cloned()
    }

    /// The singleton instance, running `build` if none is published yet
    ///
    /// The instance returned by `build` is published only when `build`
    /// succeeds, so it must include activation. Concurrent callers block
    /// until the pending build finishes and then share its result. A failed
    /// build publishes nothing.
    pub fn singleton_or_try_init<F>(&self, build: F) -> Result<Instance>
    where
        F: FnOnce() -> Result<Instance>,
    {
        self.slot().get_or_try_init(build).cloned()
    }

    /// Drop the cached singleton if it is `instance`
    pub fn forget(&self, instance: &Instance) -> bool {
        let mut slot = self.singleton.lock();
        if slot
            .get()
            .is_some_and(|cached| cached.same_object(instance))
        {
            *slot = SingletonSlot::default();
            true
        } else {
            false
        }
    }

    /// Drop the cached singleton, returning it
    pub fn clear_cache(&self) -> Option<Instance> {
        let previous = std::mem::take(&mut *self.singleton.lock());
        previous.get().cloned()
    }

    fn slot(&self) -> SingletonSlot {
        Arc::clone(&*self.singleton.lock())
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("target", &self.target)
            .field("lifetime", &self.lifetime)
            .field("implicit", &self.implicit)
            .field("name", &self.name)
            .field("conditional", &self.is_conditional())
            .finish()
    }
}
