//! Child scope resolution against a parent scope

use std::sync::Arc;

use nest_domain::ports::ResolutionRootExt;
use nest_domain::value_objects::{ConstructorArgument, Request, ServiceKey};

use crate::fixtures::*;

#[test]
fn test_dependencies_are_resolved_on_child_scope_if_possible() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IFoo>()
        .with_constructor_argument("name", name(PARENT_FOO_NAME))
        .to::<Foo>(as_foo)
        .unwrap();
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();
    child
        .bind::<dyn IFoo>()
        .with_constructor_argument("name", name(CHILD_FOO_NAME))
        .to::<Foo>(as_foo)
        .unwrap();
    child
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(CHILD_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let foo = child.get::<dyn IFoo>().unwrap();

    assert_eq!(foo.name(), CHILD_FOO_NAME);
    assert_eq!(foo.bar().name(), CHILD_BAR_NAME);
}

#[test]
fn test_dependencies_are_resolved_on_parent_scope_if_missing() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IFoo>()
        .with_constructor_argument("name", name(PARENT_FOO_NAME))
        .to::<Foo>(as_foo)
        .unwrap();
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();
    child
        .bind::<dyn IFoo>()
        .with_constructor_argument("name", name(CHILD_FOO_NAME))
        .to::<Foo>(as_foo)
        .unwrap();

    let foo = child.get::<dyn IFoo>().unwrap();

    assert_eq!(foo.name(), CHILD_FOO_NAME);
    assert_eq!(foo.bar().name(), PARENT_BAR_NAME);
}

#[test]
fn test_parent_scope_cannot_access_child_scope_objects() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IFoo>()
        .with_constructor_argument("name", name(PARENT_FOO_NAME))
        .to::<Foo>(as_foo)
        .unwrap();
    child
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(CHILD_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let error = child.get::<dyn IFoo>().err().expect("parent cannot see child bindings");

    assert!(error.is_no_viable_binding_for(ServiceKey::of::<dyn IBar>().type_name()));
}

#[test]
fn test_objects_activated_on_parent_are_not_activated_again() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<Bar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to_self()
        .unwrap();
    child
        .bind::<dyn IBar>()
        .to_method(|context| Ok(as_bar(context.get::<Bar>()?)))
        .unwrap();

    let bar = child.get::<dyn IBar>().unwrap();

    assert_eq!(bar.activation_count(), 1);
}

fn foo_request() -> Request {
    Request::new(ServiceKey::injectable::<Foo>())
        .with_argument(ConstructorArgument::new("name", name("")))
}

#[test]
fn test_implicit_bindings_are_resolved_on_child_scope() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();
    child
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(CHILD_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let foo = child.get_with::<Foo>(foo_request()).unwrap();

    assert_eq!(foo.bar.name(), CHILD_BAR_NAME);
}

#[test]
fn test_implicit_bindings_are_resolved_on_child_scope_even_if_parent_has_one() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();
    child
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(CHILD_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let from_parent = parent.get_with::<Foo>(foo_request()).unwrap();
    let from_child = child.get_with::<Foo>(foo_request()).unwrap();

    assert_eq!(from_parent.bar.name(), PARENT_BAR_NAME);
    assert_eq!(from_child.bar.name(), CHILD_BAR_NAME);
    assert_eq!(
        parent.bindings_for(&ServiceKey::of::<Foo>()).len(),
        1,
        "parent keeps its own implicit self-binding"
    );
    assert_eq!(child.bindings_for(&ServiceKey::of::<Foo>()).len(), 1);
}

#[test]
fn test_grandchild_falls_back_through_every_ancestor() {
    let (parent, child) = parent_and_child();
    let grandchild = nest_infrastructure::Scope::child(&child);
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let bar = grandchild.get::<dyn IBar>().unwrap();

    assert_eq!(bar.name(), PARENT_BAR_NAME);
    assert!(grandchild.name().starts_with(child.name()));
}

#[test]
fn test_named_requests_select_named_bindings() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .named("audit")
        .to_constant(as_bar(Arc::new(Bar::new("audit"))))
        .unwrap();
    child
        .bind::<dyn IBar>()
        .to_constant(as_bar(Arc::new(Bar::new("plain"))))
        .unwrap();

    assert_eq!(child.get_named::<dyn IBar>("audit").unwrap().name(), "audit");
    assert_eq!(child.get::<dyn IBar>().unwrap().name(), "plain");
}
