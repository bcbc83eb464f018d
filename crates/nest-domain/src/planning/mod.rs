//! Constructor plans
//!
//! Rust has no runtime reflection, so a type opts into constructor injection by
//! implementing [`Injectable`] and listing its constructors. A [`TypePlan`] is
//! the type-erased form the construction pipeline works with.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::Initializable;
use crate::value_objects::{Instance, Target};

/// Type-erased object produced by a constructor
pub type Object = Arc<dyn Any + Send + Sync>;

/// Turns a constructed object into an instance of the bound service
pub type Caster = Arc<dyn Fn(Object) -> Result<Instance> + Send + Sync>;

type ErasedBuild = Arc<dyn Fn(&Arguments) -> Result<Object> + Send + Sync>;

/// A type the construction pipeline can instantiate
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Constructors in declaration order
    fn constructors() -> Vec<Constructor<Self>>;

    /// Initialization hook run once when the object is first activated
    fn initializer(_this: &Arc<Self>) -> Option<Arc<dyn Initializable>> {
        None
    }
}

/// One way of building a `T` from injected arguments
pub struct Constructor<T> {
    targets: Vec<Target>,
    inject: bool,
    build: Arc<dyn Fn(&Arguments) -> Result<T> + Send + Sync>,
}

impl<T: Send + Sync + 'static> Constructor<T> {
    /// Constructor taking `targets` in order
    pub fn new<F>(targets: Vec<Target>, build: F) -> Self
    where
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            targets,
            inject: false,
            build: Arc::new(build),
        }
    }

    /// Mark as an injection constructor; unmarked constructors are then ignored
    pub fn inject(mut self) -> Self {
        self.inject = true;
        self
    }
}

/// Type-erased constructor of a [`TypePlan`]
pub struct ConstructorPlan {
    index: usize,
    targets: Vec<Target>,
    inject: bool,
    build: ErasedBuild,
}

impl ConstructorPlan {
    /// Declaration index within the type
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parameters in order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Whether the constructor is marked for injection
    pub fn is_inject(&self) -> bool {
        self.inject
    }

    /// Build the object from resolved arguments
    pub fn build(&self, arguments: &Arguments) -> Result<Object> {
        (self.build)(arguments)
    }
}

impl fmt::Debug for ConstructorPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorPlan")
            .field("index", &self.index)
            .field("targets", &self.targets)
            .field("inject", &self.inject)
            .finish()
    }
}

/// Constructors of one concrete type
pub struct TypePlan {
    type_id: TypeId,
    type_name: &'static str,
    constructors: Vec<ConstructorPlan>,
    into_self: fn(Object) -> Result<Instance>,
}

impl TypePlan {
    /// Plan for `T`
    pub fn of<T: Injectable>() -> Self {
        let constructors = T::constructors()
            .into_iter()
            .enumerate()
            .map(|(index, constructor)| {
                let build = constructor.build;
                ConstructorPlan {
                    index,
                    targets: constructor.targets,
                    inject: constructor.inject,
                    build: Arc::new(move |arguments: &Arguments| {
                        build(arguments).map(|value| Arc::new(value) as Object)
                    }),
                }
            })
            .collect();
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            constructors,
            into_self: self_instance::<T>,
        }
    }

    /// Concrete type id
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Concrete type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Constructors in declaration order
    pub fn constructors(&self) -> &[ConstructorPlan] {
        &self.constructors
    }

    /// Caster exposing the object as its own type
    pub fn self_caster(&self) -> Caster {
        let into_self = self.into_self;
        Arc::new(move |object| into_self(object))
    }
}

impl fmt::Debug for TypePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePlan")
            .field("type_name", &self.type_name)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

fn self_instance<T: Injectable>(object: Object) -> Result<Instance> {
    cast_object::<T, T, _>(object, &|concrete| concrete)
}

/// Caster exposing a constructed `T` as service `S`
pub fn caster<T, S, F>(cast: F) -> Caster
where
    T: Injectable,
    S: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<T>) -> Arc<S> + Send + Sync + 'static,
{
    Arc::new(move |object| cast_object::<T, S, F>(object, &cast))
}

fn cast_object<T, S, F>(object: Object, cast: &F) -> Result<Instance>
where
    T: Injectable,
    S: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<T>) -> Arc<S>,
{
    let concrete = object.downcast::<T>().map_err(|_| {
        Error::activation(format!(
            "constructed object is not a {}",
            type_name::<T>()
        ))
    })?;
    let initializer = T::initializer(&concrete);
    let instance = Instance::new(cast(concrete));
    Ok(match initializer {
        Some(initializer) => instance.with_initializer(initializer),
        None => instance,
    })
}

/// A resolved constructor argument
#[derive(Clone, Debug)]
pub enum Argument {
    /// Value for a single-shaped parameter
    Single(Instance),
    /// Values for a sequence-shaped parameter
    Sequence(Vec<Instance>),
}

/// Arguments handed to a constructor, by parameter name
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    values: Vec<(&'static str, Argument)>,
}

impl Arguments {
    /// Arguments in parameter order
    pub fn new(values: Vec<(&'static str, Argument)>) -> Self {
        Self { values }
    }

    fn find(&self, name: &str) -> Result<&Argument> {
        self.values
            .iter()
            .find(|(parameter, _)| *parameter == name)
            .map(|(_, argument)| argument)
            .ok_or_else(|| Error::activation(format!("no argument for parameter '{name}'")))
    }

    /// Single value of parameter `name` viewed as `S`
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<S>> {
        match self.find(name)? {
            Argument::Single(instance) => view(instance, name),
            Argument::Sequence(_) => Err(Error::activation(format!(
                "parameter '{name}' is a sequence"
            ))),
        }
    }

    /// Every value of sequence parameter `name` viewed as `S`
    pub fn all<S: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Vec<Arc<S>>> {
        match self.find(name)? {
            Argument::Sequence(instances) => instances
                .iter()
                .map(|instance| view(instance, name))
                .collect(),
            Argument::Single(instance) => Ok(vec![view(instance, name)?]),
        }
    }

    /// Cloned value of parameter `name`
    pub fn value<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Result<T> {
        Ok(self.get::<T>(name)?.as_ref().clone())
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn view<S: ?Sized + Send + Sync + 'static>(instance: &Instance, name: &str) -> Result<Arc<S>> {
    instance.downcast::<S>().ok_or_else(|| {
        Error::activation(format!(
            "argument '{name}' is a {}, not a {}",
            instance.type_name(),
            type_name::<S>()
        ))
    })
}
