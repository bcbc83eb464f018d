//! Scopes: the resolution engine
//!
//! A scope owns a binding store and a component registry and optionally holds
//! a parent [`ResolutionRoot`]. Resolution consults the scope itself first and
//! falls back to the parent in this order:
//!
//! 1. the scope's own explicit bindings
//! 2. the parent, with implicit bindings suppressed
//! 3. the scope's own implicit binding machinery (self-binding, defaults, ...)
//! 4. if step 3 finds no viable binding, the parent with implicit bindings
//!    allowed
//! 5. if that fails too, the error of step 3, with the parent's failure
//!    attached as its source
//!
//! Steps 3 to 5 run when the returned sequence is first pulled.

mod engine;

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use nest_domain::bindings::{Binding, Context};
use nest_domain::constants::{CHILD_SCOPE_PREFIX, ROOT_SCOPE_NAME};
use nest_domain::error::{Error, Result};
use nest_domain::ports::{
    ActivationCache, ComponentRegistry, ComponentRegistryExt, ResolutionRoot, ScopeNode,
};
use nest_domain::value_objects::{Instance, Request, ServiceKey};
use tracing::debug;

use crate::activation::{Pipeline, StandardActivationCache};
use crate::bindings::{BindingBuilder, BindingStore};
use crate::components::{
    ChildComponentRegistry, StandardComponentRegistry, register_standard_extensions,
    standard_registry,
};
use crate::config::{NestConfig, ScopeSettings};

static CHILD_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// A node of the scope tree
pub struct Scope {
    name: String,
    settings: ScopeSettings,
    bindings: BindingStore,
    components: Arc<dyn ComponentRegistry>,
    parent: Option<Arc<dyn ResolutionRoot>>,
    this: Weak<Scope>,
    disposed: AtomicBool,
}

impl Scope {
    fn assemble(
        name: String,
        settings: ScopeSettings,
        components: Arc<dyn ComponentRegistry>,
        parent: Option<Arc<dyn ResolutionRoot>>,
    ) -> Arc<Self> {
        debug!(scope = %name, has_parent = parent.is_some(), "Creating scope");
        Arc::new_cyclic(|this| Self {
            name,
            settings,
            bindings: BindingStore::new(),
            components,
            parent,
            this: this.clone(),
            disposed: AtomicBool::new(false),
        })
    }

    /// Root scope with the standard component set
    pub fn root(settings: ScopeSettings) -> Result<Arc<Self>> {
        Self::named_root(ROOT_SCOPE_NAME, settings)
    }

    /// Named root scope with the standard component set
    pub fn named_root(name: impl Into<String>, settings: ScopeSettings) -> Result<Arc<Self>> {
        let components: Arc<dyn ComponentRegistry> = Arc::new(standard_registry(&settings)?);
        Ok(Self::assemble(name.into(), settings, components, None))
    }

    /// Root scope configured from loaded configuration
    pub fn from_config(config: &NestConfig) -> Result<Arc<Self>> {
        Self::root(config.scope)
    }

    /// Child scope sharing the parent's components
    ///
    /// The child registers its own forwarding activation cache, chain-walking
    /// constructor scorer and selector; every other component is looked up in
    /// the parent's registry.
    pub fn child(parent: &Arc<Scope>) -> Arc<Self> {
        let name = format!(
            "{}/{}-{}",
            parent.name,
            CHILD_SCOPE_PREFIX,
            CHILD_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        Self::named_child(parent, name)
    }

    /// Named child scope sharing the parent's components
    pub fn named_child(parent: &Arc<Scope>, name: impl Into<String>) -> Arc<Self> {
        let name = name.into();
        let components: Arc<dyn ComponentRegistry> = Arc::new(ChildComponentRegistry::new(
            name.clone(),
            Arc::clone(&parent.components),
        ));
        let parent_root: Arc<dyn ResolutionRoot> = Arc::clone(parent) as Arc<dyn ResolutionRoot>;
        Self::assemble(name, parent.settings, components, Some(parent_root))
    }

    /// Child of a parent known only through its resolution surface
    ///
    /// The child gets a fresh standard component set. Its activation cache
    /// forwards to the cache of the nearest ancestor that is a scope; if the
    /// parent is not a scope, the child keeps its own activation record.
    pub fn child_of(
        parent: Arc<dyn ResolutionRoot>,
        name: impl Into<String>,
        settings: ScopeSettings,
    ) -> Result<Arc<Self>> {
        let name = name.into();
        let authority: Arc<dyn ActivationCache> = match Arc::clone(&parent).as_scope_node() {
            Some(node) => node.components().get::<dyn ActivationCache>()?.authority(),
            None => {
                debug!(scope = %name, "Parent is not a scope, using a local activation record");
                Arc::new(StandardActivationCache::new())
            }
        };
        let base: Arc<dyn ComponentRegistry> = Arc::new(StandardComponentRegistry::new());
        let registry = ChildComponentRegistry::with_activation_cache(name.clone(), base, authority);
        register_standard_extensions(&registry, &settings)?;
        Ok(Self::assemble(name, settings, Arc::new(registry), Some(parent)))
    }

    /// Scope name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings the scope was created with
    pub fn settings(&self) -> &ScopeSettings {
        &self.settings
    }

    /// The scope's component registry
    pub fn components(&self) -> &Arc<dyn ComponentRegistry> {
        &self.components
    }

    /// Parent resolution root, for child scopes
    pub fn parent(&self) -> Option<&Arc<dyn ResolutionRoot>> {
        self.parent.as_ref()
    }

    /// Start declaring a binding of service `S`
    pub fn bind<S: ?Sized + Send + Sync + 'static>(&self) -> BindingBuilder<'_, S> {
        BindingBuilder::new(self)
    }

    /// Remove the scope's bindings of service `S`
    pub fn unbind<S: ?Sized + 'static>(&self) -> Result<()> {
        self.ensure_active()?;
        let removed = self.bindings.remove_all(&ServiceKey::of::<S>());
        debug!(scope = %self.name, service = std::any::type_name::<S>(), removed = removed.len(), "Unbound service");
        Ok(())
    }

    /// Remove the scope's bindings of service `S` and start a new one
    pub fn rebind<S: ?Sized + Send + Sync + 'static>(&self) -> Result<BindingBuilder<'_, S>> {
        self.unbind::<S>()?;
        Ok(self.bind::<S>())
    }

    /// Register a fully built binding
    pub fn add_binding(&self, binding: Binding) -> Result<Arc<Binding>> {
        self.ensure_active()?;
        let binding = Arc::new(binding);
        debug!(
            scope = %self.name,
            service = %binding.service(),
            target = %binding.target().describe(),
            implicit = binding.is_implicit(),
            "Adding binding"
        );
        self.bindings.add(Arc::clone(&binding));
        Ok(binding)
    }

    /// The scope's own bindings of `service`, in declaration order
    pub fn bindings_for(&self, service: &ServiceKey) -> Vec<Arc<Binding>> {
        self.bindings.bindings_for(service)
    }

    /// Release a singleton instance owned by this scope
    ///
    /// Runs the deactivation pipeline and drops the cached instance. Returns
    /// `false` if no binding of this scope holds the instance.
    pub fn release(&self, instance: &Instance) -> Result<bool> {
        self.ensure_active()?;
        let Some(binding) = self
            .bindings
            .all()
            .into_iter()
            .find(|binding| binding.forget(instance))
        else {
            return Ok(false);
        };
        let context = Context::new(
            self.node()?,
            Request::new(*binding.service()),
            binding,
        );
        Pipeline::deactivate(&context, instance)?;
        Ok(true)
    }

    /// Dispose the scope
    ///
    /// Drops the scope's bindings and cached singletons and disposes its own
    /// component layer. Nothing reachable through the parent is touched.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let bindings = self.bindings.clear();
        for binding in &bindings {
            binding.clear_cache();
        }
        self.components.dispose();
        debug!(scope = %self.name, bindings = bindings.len(), "Disposed scope");
    }

    /// Whether `dispose` has run
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_disposed() {
            Err(Error::scope_disposed(self.name.clone()))
        } else {
            Ok(())
        }
    }

    fn strong(&self) -> Result<Arc<Scope>> {
        self.this
            .upgrade()
            .ok_or_else(|| Error::scope_disposed(self.name.clone()))
    }

    fn node(&self) -> Result<Arc<dyn ScopeNode>> {
        Ok(self.strong()? as Arc<dyn ScopeNode>)
    }
}

impl ScopeNode for Scope {
    fn name(&self) -> &str {
        &self.name
    }

    fn components(&self) -> Arc<dyn ComponentRegistry> {
        Arc::clone(&self.components)
    }

    fn has_explicit_binding(&self, service: &ServiceKey) -> bool {
        self.bindings.has_explicit_binding(service)
    }

    fn parent(&self) -> Option<Arc<dyn ResolutionRoot>> {
        self.parent.clone()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("bindings", &self.bindings.len())
            .field("has_parent", &self.parent.is_some())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
