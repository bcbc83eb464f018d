//! Component registry ports
//!
//! A component registry maps a [`ComponentKind`] to the provider instances of
//! that capability. Providers are stored as [`Component`] values; the typed
//! view goes through [`ComponentPort`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::ports::activation::{ActivationCache, ActivationStrategy};
use crate::ports::selection::{ConstructorScorer, MissingBindingResolver, Selector};
use crate::value_objects::ComponentKind;

/// A provider of one capability kind
#[derive(Clone)]
pub enum Component {
    /// Activation bookkeeping
    ActivationCache(Arc<dyn ActivationCache>),
    /// Constructor ranking
    ConstructorScorer(Arc<dyn ConstructorScorer>),
    /// Constructor candidate selection
    Selector(Arc<dyn Selector>),
    /// Implicit binding synthesis
    MissingBindingResolver(Arc<dyn MissingBindingResolver>),
    /// Activation pipeline step
    ActivationStrategy(Arc<dyn ActivationStrategy>),
}

impl Component {
    /// Capability kind of the provider
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ActivationCache(_) => ComponentKind::ActivationCache,
            Self::ConstructorScorer(_) => ComponentKind::ConstructorScorer,
            Self::Selector(_) => ComponentKind::Selector,
            Self::MissingBindingResolver(_) => ComponentKind::MissingBindingResolver,
            Self::ActivationStrategy(_) => ComponentKind::ActivationStrategy,
        }
    }

    /// Release resources held by the provider
    pub fn dispose(&self) {
        match self {
            Self::ActivationCache(cache) => cache.dispose(),
            Self::ActivationStrategy(strategy) => strategy.dispose(),
            Self::ConstructorScorer(_) | Self::Selector(_) | Self::MissingBindingResolver(_) => {}
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.kind()).finish()
    }
}

/// Typed access to one capability kind
pub trait ComponentPort: Send + Sync + 'static {
    /// Kind this port is stored under
    const KIND: ComponentKind;

    /// Wrap a provider
    fn into_component(this: Arc<Self>) -> Component;

    /// Typed view of a stored provider
    fn from_component(component: &Component) -> Option<Arc<Self>>;
}

macro_rules! component_port {
    ($port:ident) => {
        impl ComponentPort for dyn $port {
            const KIND: ComponentKind = ComponentKind::$port;

            fn into_component(this: Arc<Self>) -> Component {
                Component::$port(this)
            }

            fn from_component(component: &Component) -> Option<Arc<Self>> {
                match component {
                    Component::$port(provider) => Some(Arc::clone(provider)),
                    _ => None,
                }
            }
        }
    };
}

component_port!(ActivationCache);
component_port!(ConstructorScorer);
component_port!(Selector);
component_port!(MissingBindingResolver);
component_port!(ActivationStrategy);

/// How often a registration builds its provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentLifetime {
    /// Built once, on first use, and shared
    Singleton,
    /// Built on every lookup
    Transient,
}

type ComponentFactory = Arc<dyn Fn() -> Result<Component> + Send + Sync>;

/// A provider factory registered under a capability kind
pub struct ComponentRegistration {
    kind: ComponentKind,
    implementation: &'static str,
    lifetime: ComponentLifetime,
    factory: ComponentFactory,
    instance: OnceCell<Component>,
}

impl ComponentRegistration {
    /// Provider built once and shared by every lookup
    pub fn singleton<C, F>(implementation: &'static str, factory: F) -> Self
    where
        C: ComponentPort + ?Sized,
        F: Fn() -> Result<Arc<C>> + Send + Sync + 'static,
    {
        Self {
            kind: C::KIND,
            implementation,
            lifetime: ComponentLifetime::Singleton,
            factory: Arc::new(move || factory().map(C::into_component)),
            instance: OnceCell::new(),
        }
    }

    /// Provider built fresh on every lookup
    pub fn transient<C, F>(implementation: &'static str, factory: F) -> Self
    where
        C: ComponentPort + ?Sized,
        F: Fn() -> Result<Arc<C>> + Send + Sync + 'static,
    {
        Self {
            lifetime: ComponentLifetime::Transient,
            ..Self::singleton(implementation, factory)
        }
    }

    /// Already built provider
    pub fn existing<C: ComponentPort + ?Sized>(implementation: &'static str, provider: Arc<C>) -> Self {
        let component = C::into_component(provider);
        let shared = component.clone();
        Self {
            kind: C::KIND,
            implementation,
            lifetime: ComponentLifetime::Singleton,
            factory: Arc::new(move || Ok(shared.clone())),
            instance: OnceCell::with_value(component),
        }
    }

    /// Same registration, built on every lookup
    pub fn into_transient(self) -> Self {
        Self {
            lifetime: ComponentLifetime::Transient,
            instance: OnceCell::new(),
            ..self
        }
    }

    /// Capability kind
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Implementation name, used by `remove`
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    /// Registration lifetime
    pub fn lifetime(&self) -> ComponentLifetime {
        self.lifetime
    }

    /// The provider, building it if needed
    ///
    /// The factory runs without any registry lock held. Two racing first
    /// lookups of a singleton may both build; the first stored provider wins.
    pub fn provider(&self) -> Result<Component> {
        match self.lifetime {
            ComponentLifetime::Transient => (self.factory)(),
            ComponentLifetime::Singleton => {
                if let Some(component) = self.instance.get() {
                    return Ok(component.clone());
                }
                let built = (self.factory)()?;
                Ok(self.instance.get_or_init(|| built).clone())
            }
        }
    }

    /// Release the built singleton provider, if any
    pub fn dispose(&self) {
        if let Some(component) = self.instance.get() {
            component.dispose();
        }
    }
}

impl fmt::Debug for ComponentRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistration")
            .field("kind", &self.kind)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("built", &self.instance.get().is_some())
            .finish()
    }
}

/// Per-scope table of capability providers
pub trait ComponentRegistry: Send + Sync {
    /// First provider of `kind`
    fn get_component(&self, kind: ComponentKind) -> Result<Component>;

    /// Every provider of `kind`, first-configured first
    fn get_all_components(&self, kind: ComponentKind) -> Result<Vec<Component>>;

    /// Register a provider
    fn add(&self, registration: ComponentRegistration) -> Result<()>;

    /// Register a scope-local helper provider, exempt from mutability checks
    fn add_transient(&self, registration: ComponentRegistration) -> Result<()>;

    /// Remove the registrations of `kind` with the given implementation name
    fn remove(&self, kind: ComponentKind, implementation: &str) -> Result<()>;

    /// Remove every registration of `kind`
    fn remove_all(&self, kind: ComponentKind) -> Result<()>;

    /// Dispose locally owned providers
    fn dispose(&self);

    /// Whether `dispose` has run
    fn is_disposed(&self) -> bool;
}

/// Typed lookups over any component registry
pub trait ComponentRegistryExt: ComponentRegistry {
    /// First provider of port `C`
    fn get<C: ComponentPort + ?Sized>(&self) -> Result<Arc<C>> {
        let component = self.get_component(C::KIND)?;
        C::from_component(&component).ok_or_else(|| Error::no_component(C::KIND))
    }

    /// Every provider of port `C`
    fn get_all<C: ComponentPort + ?Sized>(&self) -> Result<Vec<Arc<C>>> {
        Ok(self
            .get_all_components(C::KIND)?
            .iter()
            .filter_map(C::from_component)
            .collect())
    }
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistryExt for R {}
