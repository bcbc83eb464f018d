//! Service identity and type-erased instances
//!
//! A [`ServiceKey`] names what a request asks for. An [`Instance`] is what a
//! binding produces: the object viewed as the bound service, plus the object's
//! identity, which survives re-wrapping under other service views.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::planning::{Injectable, TypePlan};
use crate::ports::Initializable;

/// Identifies a service type
///
/// Equality and hashing use the type id only. A key created with
/// [`ServiceKey::injectable`] additionally carries the constructor plan of the
/// type, which lets a self-binding resolver synthesize an implicit binding.
#[derive(Clone, Copy)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    plan: Option<fn() -> TypePlan>,
}

impl ServiceKey {
    /// Key for any service type, including trait objects
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: type_name::<S>(),
            plan: None,
        }
    }

    /// Key for a concrete type that knows its own constructors
    pub fn injectable<T: Injectable>() -> Self {
        Self {
            plan: Some(TypePlan::of::<T> as fn() -> TypePlan),
            ..Self::of::<T>()
        }
    }

    /// Type id of the service
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Type name of the service
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the key carries a constructor plan
    pub fn is_self_bindable(&self) -> bool {
        self.plan.is_some()
    }

    /// Build the constructor plan carried by the key, if any
    pub fn plan(&self) -> Option<TypePlan> {
        self.plan.map(|plan| plan())
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceKey")
            .field("type_name", &self.type_name)
            .field("self_bindable", &self.is_self_bindable())
            .finish()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Identity of the object behind an instance (its address)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl<T: ?Sized + Send + Sync> Liveness for Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Weak handle on an object's identity
///
/// Held by activation caches. A dead watch means the address may have been
/// reused by another object and must not count as a match.
#[derive(Clone)]
pub struct InstanceWatch {
    id: InstanceId,
    liveness: Arc<dyn Liveness>,
}

impl InstanceWatch {
    /// Identity being watched
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Whether the watched object is still alive
    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }
}

impl fmt::Debug for InstanceWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceWatch")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// A produced object, viewed as one service type
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    watch: InstanceWatch,
    type_name: &'static str,
    initializer: Option<Arc<dyn Initializable>>,
}

impl Instance {
    /// Wrap a shared object as an instance of service `S`
    pub fn new<S: ?Sized + Send + Sync + 'static>(value: Arc<S>) -> Self {
        let id = InstanceId(Arc::as_ptr(&value).cast::<()>() as usize);
        let liveness: Arc<dyn Liveness> = Arc::new(Arc::downgrade(&value));
        Self {
            value: Arc::new(value),
            watch: InstanceWatch { id, liveness },
            type_name: type_name::<S>(),
            initializer: None,
        }
    }

    /// Attach the initialization hook of the underlying object
    pub fn with_initializer(mut self, initializer: Arc<dyn Initializable>) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Identity of the underlying object
    pub fn id(&self) -> InstanceId {
        self.watch.id
    }

    /// Weak identity handle for caches
    pub fn watch(&self) -> InstanceWatch {
        self.watch.clone()
    }

    /// Service type this instance is viewed as
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Initialization hook, if the object has one
    pub fn initializer(&self) -> Option<&Arc<dyn Initializable>> {
        self.initializer.as_ref()
    }

    /// Whether the instance is viewed as service `S`
    pub fn is<S: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.value.is::<Arc<S>>()
    }

    /// Typed view of the instance
    pub fn downcast<S: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<S>> {
        self.value.downcast_ref::<Arc<S>>().cloned()
    }

    /// Whether both instances wrap the same object
    pub fn same_object(&self, other: &Instance) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("id", &self.watch.id)
            .field("initializable", &self.initializer.is_some())
            .finish()
    }
}
