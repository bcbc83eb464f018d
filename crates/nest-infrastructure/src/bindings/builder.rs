//! Fluent binding declaration
//!
//! ```ignore
//! scope
//!     .bind::<dyn Greeter>()
//!     .named("formal")
//!     .in_singleton_scope()
//!     .with_constructor_argument("greeting", Arc::new(String::from("Good day")))
//!     .to::<FormalGreeter>(|greeter| greeter)?;
//! ```
//!
//! Options come first; a `to*` call ends the declaration and registers the
//! binding as explicit.

use std::marker::PhantomData;
use std::sync::Arc;

use nest_domain::bindings::{
    Binding, BindingAction, BindingCondition, BindingTarget, Context, InstanceLifetime,
};
use nest_domain::error::Result;
use nest_domain::planning::{Injectable, TypePlan, caster};
use nest_domain::value_objects::{ConstructorArgument, Instance, Request, ServiceKey};

use crate::scope::Scope;

/// Declares one binding of service `S` in a scope
#[must_use = "a binding is only registered by one of the `to*` methods"]
pub struct BindingBuilder<'a, S: ?Sized> {
    scope: &'a Scope,
    service: ServiceKey,
    lifetime: InstanceLifetime,
    name: Option<String>,
    arguments: Vec<ConstructorArgument>,
    condition: Option<BindingCondition>,
    activation_actions: Vec<BindingAction>,
    deactivation_actions: Vec<BindingAction>,
    _service: PhantomData<fn() -> Box<S>>,
}

impl<'a, S: ?Sized + Send + Sync + 'static> BindingBuilder<'a, S> {
    pub(crate) fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            service: ServiceKey::of::<S>(),
            lifetime: InstanceLifetime::Transient,
            name: None,
            arguments: Vec::new(),
            condition: None,
            activation_actions: Vec::new(),
            deactivation_actions: Vec::new(),
            _service: PhantomData,
        }
    }

    /// Only satisfy requests for this name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build one instance per binding and hand it out on every resolution
    pub fn in_singleton_scope(mut self) -> Self {
        self.lifetime = InstanceLifetime::Singleton;
        self
    }

    /// Build a new instance on every resolution (the default)
    pub fn in_transient_scope(mut self) -> Self {
        self.lifetime = InstanceLifetime::Transient;
        self
    }

    /// Supply a value for constructor parameter `name`
    pub fn with_constructor_argument<V: ?Sized + Send + Sync + 'static>(
        mut self,
        name: impl Into<String>,
        value: Arc<V>,
    ) -> Self {
        self.arguments.push(ConstructorArgument::new(name, value));
        self
    }

    /// Only satisfy requests matching `condition`
    pub fn when(mut self, condition: impl Fn(&Request) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Run `action` on every newly activated instance
    pub fn on_activation(
        mut self,
        action: impl Fn(&Context, &Instance) + Send + Sync + 'static,
    ) -> Self {
        self.activation_actions.push(Arc::new(action));
        self
    }

    /// Run `action` when an instance is released
    pub fn on_deactivation(
        mut self,
        action: impl Fn(&Context, &Instance) + Send + Sync + 'static,
    ) -> Self {
        self.deactivation_actions.push(Arc::new(action));
        self
    }

    /// Bind to concrete type `I`, built by constructor injection
    pub fn to<I: Injectable>(
        self,
        cast: impl Fn(Arc<I>) -> Arc<S> + Send + Sync + 'static,
    ) -> Result<Arc<Binding>> {
        let target = BindingTarget::Type {
            plan: Arc::new(TypePlan::of::<I>()),
            cast: caster::<I, S, _>(cast),
        };
        self.finish(target)
    }

    /// Bind to an already built value
    pub fn to_constant(self, value: Arc<S>) -> Result<Arc<Binding>> {
        self.finish(BindingTarget::Constant(Instance::new(value)))
    }

    /// Bind to a factory
    pub fn to_method(
        self,
        factory: impl Fn(&Context) -> Result<Arc<S>> + Send + Sync + 'static,
    ) -> Result<Arc<Binding>> {
        let factory = Arc::new(move |context: &Context| factory(context).map(Instance::new));
        self.finish(BindingTarget::Method(factory))
    }

    /// Bind to a factory producing the instance wrapper itself
    ///
    /// Lets the factory attach the object's initialization hook, see
    /// [`Instance::with_initializer`].
    pub fn to_instance_method(
        self,
        factory: impl Fn(&Context) -> Result<Instance> + Send + Sync + 'static,
    ) -> Result<Arc<Binding>> {
        self.finish(BindingTarget::Method(Arc::new(factory)))
    }

    fn finish(self, target: BindingTarget) -> Result<Arc<Binding>> {
        let mut binding = Binding::new(self.service, target).in_lifetime(self.lifetime);
        if let Some(name) = self.name {
            binding = binding.named(name);
        }
        if let Some(condition) = self.condition {
            binding = binding.when(condition);
        }
        for argument in self.arguments {
            binding = binding.with_argument(argument);
        }
        for action in self.activation_actions {
            binding = binding.on_activation(action);
        }
        for action in self.deactivation_actions {
            binding = binding.on_deactivation(action);
        }
        self.scope.add_binding(binding)
    }
}

impl<S: Injectable> BindingBuilder<'_, S> {
    /// Bind the type to itself
    pub fn to_self(self) -> Result<Arc<Binding>> {
        let plan = TypePlan::of::<S>();
        let cast = plan.self_caster();
        self.finish(BindingTarget::Type {
            plan: Arc::new(plan),
            cast,
        })
    }
}
