//! Component registry tests

use std::sync::Arc;

use nest_domain::planning::{ConstructorPlan, TypePlan};
use nest_domain::ports::{
    ActivationCache, ActivationStrategy, ComponentRegistration, ComponentRegistry,
    ComponentRegistryExt, ConstructorScorer, MissingBindingResolver, Selector,
};
use nest_domain::value_objects::{ComponentKind, IMMUTABLE_IN_CHILD_SCOPES};
use nest_infrastructure::constants::{
    CHILD_CONSTRUCTOR_SCORER, SELF_BINDING_RESOLVER, STANDARD_SELECTOR,
};
use nest_infrastructure::{ChildComponentRegistry, StandardComponentRegistry};

use crate::fixtures::*;

struct ReverseSelector;

impl Selector for ReverseSelector {
    fn select_constructors<'a>(&self, plan: &'a TypePlan) -> Vec<&'a ConstructorPlan> {
        plan.constructors().iter().rev().collect()
    }
}

fn selector_registration() -> ComponentRegistration {
    ComponentRegistration::singleton::<dyn Selector, _>("ReverseSelector", || {
        Ok(Arc::new(ReverseSelector) as Arc<dyn Selector>)
    })
}

#[test]
fn test_child_rejects_writes_to_immutable_kinds() {
    let (_parent, child) = parent_and_child();
    let components = child.components();

    let error = components.add(selector_registration()).unwrap_err();
    assert!(error.is_immutable_component());

    for kind in IMMUTABLE_IN_CHILD_SCOPES {
        assert!(components.remove_all(kind).unwrap_err().is_immutable_component());
        assert!(components.remove(kind, "anything").unwrap_err().is_immutable_component());
    }
}

#[test]
fn test_root_accepts_writes_to_every_kind() {
    let (parent, _child) = parent_and_child();
    let components = parent.components();

    components.add(selector_registration()).unwrap();
    components.remove(ComponentKind::Selector, STANDARD_SELECTOR).unwrap();

    assert_eq!(components.get_all::<dyn Selector>().unwrap().len(), 1);
}

#[test]
fn test_child_accepts_helper_components_exempt_from_checks() {
    let (_parent, child) = parent_and_child();

    child.components().add_transient(selector_registration()).unwrap();

    assert_eq!(child.components().get_all::<dyn Selector>().unwrap().len(), 3);
}

#[test]
fn test_child_removal_of_mutable_kinds_is_local() {
    let (parent, child) = parent_and_child();
    let before = parent
        .components()
        .get_all::<dyn MissingBindingResolver>()
        .unwrap()
        .len();

    child
        .components()
        .remove(ComponentKind::MissingBindingResolver, SELF_BINDING_RESOLVER)
        .unwrap();

    assert_eq!(
        child
            .components()
            .get_all::<dyn MissingBindingResolver>()
            .unwrap()
            .len(),
        before,
        "removal only touches the child's own layer"
    );
}

#[test]
fn test_get_all_lists_local_then_parent() {
    let (parent, child) = parent_and_child();

    let local = child.components().get_all::<dyn ConstructorScorer>().unwrap();
    let own = child.components().get::<dyn ConstructorScorer>().unwrap();

    assert_eq!(local.len(), 2);
    assert!(Arc::ptr_eq(&local[0], &own));
    let parent_scorer = parent.components().get::<dyn ConstructorScorer>().unwrap();
    assert!(Arc::ptr_eq(&local[1], &parent_scorer));
}

#[test]
fn test_lookup_falls_back_to_parent_for_absent_kinds() {
    let (parent, child) = parent_and_child();

    let from_child = child.components().get::<dyn ActivationStrategy>().unwrap();
    let from_parent = parent.components().get::<dyn ActivationStrategy>().unwrap();

    assert!(Arc::ptr_eq(&from_child, &from_parent));
}

#[test]
fn test_missing_component_is_reported() {
    let registry = StandardComponentRegistry::new();

    let error = registry.get::<dyn Selector>().err().expect("nothing registered");

    assert!(error.is_no_component());
    assert!(registry.get_all::<dyn Selector>().unwrap().is_empty());
}

#[test]
fn test_child_dispose_leaves_parent_components_alone() {
    let (parent, child) = parent_and_child();
    let bar = nest_domain::value_objects::Instance::new(as_bar(Arc::new(Bar::new("kept"))));
    let parent_cache = parent.components().get::<dyn ActivationCache>().unwrap();
    parent_cache.add_activated_instance(&bar);

    child.dispose();

    assert!(child.components().is_disposed());
    assert!(!parent.components().is_disposed());
    assert!(parent_cache.is_activated(&bar));
    assert!(parent.components().get::<dyn Selector>().is_ok());
}

#[test]
fn test_child_registry_over_bare_parent_registry() {
    let parent: Arc<dyn ComponentRegistry> = Arc::new(StandardComponentRegistry::new());
    let registry = ChildComponentRegistry::new("orphan", Arc::clone(&parent));

    assert!(registry.local().contains(ComponentKind::ConstructorScorer));
    assert!(registry.get::<dyn ConstructorScorer>().is_ok());
    assert!(registry.get::<dyn Selector>().is_ok());
    assert!(
        registry
            .get::<dyn ActivationCache>()
            .err()
            .expect("parent has no cache to forward to")
            .is_no_component()
    );
    assert_eq!(
        registry.local().registrations(ComponentKind::ConstructorScorer)[0].implementation(),
        CHILD_CONSTRUCTOR_SCORER
    );
}
