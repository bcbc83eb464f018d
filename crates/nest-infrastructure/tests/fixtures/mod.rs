//! Shared test types
//!
//! `Foo` needs an `IBar` and a name, `Bar` needs a name and counts its
//! activations, `Baz` has a parameterless and an `IBar` constructor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nest_domain::planning::{Constructor, Injectable};
use nest_domain::ports::Initializable;
use nest_domain::value_objects::Target;
use nest_infrastructure::{Scope, ScopeSettings};

pub const PARENT_FOO_NAME: &str = "ParentFoo";
pub const PARENT_BAR_NAME: &str = "ParentBar";
pub const CHILD_FOO_NAME: &str = "ChildFoo";
pub const CHILD_BAR_NAME: &str = "ChildBar";

pub trait IFoo: Send + Sync {
    fn name(&self) -> &str;
    fn bar(&self) -> &Arc<dyn IBar>;
}

pub trait IBar: Send + Sync {
    fn name(&self) -> &str;
    fn activation_count(&self) -> usize;
}

pub struct Foo {
    pub name: String,
    pub bar: Arc<dyn IBar>,
}

impl IFoo for Foo {
    fn name(&self) -> &str {
        &self.name
    }

    fn bar(&self) -> &Arc<dyn IBar> {
        &self.bar
    }
}

impl Injectable for Foo {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(
            vec![
                Target::single::<dyn IBar>("bar"),
                Target::single::<String>("name"),
            ],
            |args| {
                Ok(Foo {
                    bar: args.get::<dyn IBar>("bar")?,
                    name: args.value::<String>("name")?,
                })
            },
        )]
    }
}

pub struct Bar {
    pub name: String,
    activations: AtomicUsize,
}

impl Bar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activations: AtomicUsize::new(0),
        }
    }
}

impl IBar for Bar {
    fn name(&self) -> &str {
        &self.name
    }

    fn activation_count(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl Initializable for Bar {
    fn initialize(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
    }
}

impl Injectable for Bar {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(
            vec![Target::single::<String>("name")],
            |args| Ok(Bar::new(args.value::<String>("name")?)),
        )]
    }

    fn initializer(this: &Arc<Self>) -> Option<Arc<dyn Initializable>> {
        Some(Arc::clone(this) as Arc<dyn Initializable>)
    }
}

/// Built through whichever constructor scores best
pub struct Baz {
    pub bar: Option<Arc<dyn IBar>>,
}

impl Injectable for Baz {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::new(vec![], |_| Ok(Baz { bar: None })),
            Constructor::new(vec![Target::single::<dyn IBar>("bar")], |args| {
                Ok(Baz {
                    bar: Some(args.get::<dyn IBar>("bar")?),
                })
            }),
        ]
    }
}

/// Collects every bound `IBar`
pub struct Qux {
    pub bars: Vec<Arc<dyn IBar>>,
    pub retries: u32,
}

impl Injectable for Qux {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(
            vec![
                Target::sequence::<dyn IBar>("bars"),
                Target::single::<u32>("retries").with_default(|| Arc::new(3_u32)),
            ],
            |args| {
                Ok(Qux {
                    bars: args.all::<dyn IBar>("bars")?,
                    retries: args.value::<u32>("retries")?,
                })
            },
        )]
    }
}

/// Depends on itself through `Loop`
pub struct Knot;

pub struct Loop;

impl Injectable for Knot {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(vec![Target::injectable::<Loop>("next")], |_| Ok(Knot))]
    }
}

impl Injectable for Loop {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(vec![Target::injectable::<Knot>("next")], |_| Ok(Loop))]
    }
}

pub fn name(value: &str) -> Arc<String> {
    Arc::new(value.to_string())
}

/// A root scope and one child of it
pub fn parent_and_child() -> (Arc<Scope>, Arc<Scope>) {
    let parent = Scope::root(ScopeSettings::default()).expect("root scope");
    let child = Scope::child(&parent);
    (parent, child)
}

pub fn as_bar(bar: Arc<Bar>) -> Arc<dyn IBar> {
    bar
}

pub fn as_foo(foo: Arc<Foo>) -> Arc<dyn IFoo> {
    foo
}
