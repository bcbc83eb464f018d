//! Constructor scorer tests

use std::sync::Arc;

use nest_domain::bindings::{Binding, BindingTarget, Context};
use nest_domain::constants::INJECT_CONSTRUCTOR_SCORE;
use nest_domain::planning::{Constructor, Injectable, TypePlan};
use nest_domain::ports::{ComponentRegistryExt, ConstructorScorer, ResolutionRootExt, ScopeNode};
use nest_domain::value_objects::{Instance, Request, ServiceKey, Target};
use nest_infrastructure::selection::{
    ChildConstructorScorer, StandardConstructorScorer, explicit_binding_in_chain,
    select_constructor,
};

use crate::fixtures::*;

fn context_in(scope: Arc<dyn ScopeNode>) -> Context {
    let binding = Binding::new(
        ServiceKey::of::<Baz>(),
        BindingTarget::Constant(Instance::new(Arc::new(0_u8))),
    );
    Context::new(scope, Request::for_service::<Baz>(), Arc::new(binding))
}

#[test]
fn test_child_scope_prefers_constructor_satisfied_by_parent() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .with_constructor_argument("name", name(PARENT_BAR_NAME))
        .to::<Bar>(as_bar)
        .unwrap();

    let baz = child.get_self::<Baz>().unwrap();

    assert_eq!(baz.bar.as_ref().map(|bar| bar.name()), Some(PARENT_BAR_NAME));
}

#[test]
fn test_thin_constructor_wins_without_bindings() {
    let (_parent, child) = parent_and_child();

    let baz = child.get_self::<Baz>().unwrap();

    assert!(baz.bar.is_none());
}

#[test]
fn test_standard_scorer_only_sees_own_bindings() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .to_constant(as_bar(Arc::new(Bar::new(PARENT_BAR_NAME))))
        .unwrap();
    let plan = TypePlan::of::<Baz>();
    let needs_bar = &plan.constructors()[1];
    let context = context_in(Arc::clone(&child) as Arc<dyn ScopeNode>);

    let standard = StandardConstructorScorer.score(&context, needs_bar);
    let chained = ChildConstructorScorer.score(&context, needs_bar);

    assert!(standard < 0);
    assert_eq!(chained, 2);
    assert!(explicit_binding_in_chain(context.scope(), &ServiceKey::of::<dyn IBar>()));
}

#[test]
fn test_child_registry_uses_chain_walking_scorer() {
    let (parent, child) = parent_and_child();
    parent
        .bind::<dyn IBar>()
        .to_constant(as_bar(Arc::new(Bar::new(PARENT_BAR_NAME))))
        .unwrap();
    let plan = TypePlan::of::<Baz>();
    let context = context_in(Arc::clone(&child) as Arc<dyn ScopeNode>);

    let scorer = child.components().get::<dyn ConstructorScorer>().unwrap();
    let selected = select_constructor(&context, &plan).unwrap();

    assert_eq!(scorer.score(&context, &plan.constructors()[1]), 2);
    assert_eq!(selected.index(), 1);
}

/// Two equally scored constructors
struct Twin {
    built_by: usize,
}

impl Injectable for Twin {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::new(vec![Target::single::<u8>("a")], |_| Ok(Twin { built_by: 0 })),
            Constructor::new(vec![Target::single::<u16>("b")], |_| Ok(Twin { built_by: 1 })),
        ]
    }
}

#[test]
fn test_ties_go_to_first_declared_constructor() {
    let (parent, _child) = parent_and_child();
    parent.bind::<u8>().to_constant(Arc::new(1)).unwrap();
    parent.bind::<u16>().to_constant(Arc::new(2)).unwrap();

    let twin = parent.get_self::<Twin>().unwrap();

    assert_eq!(twin.built_by, 0);
}

/// Marked constructor wins regardless of bindings
struct Marked {
    built_by: usize,
}

impl Injectable for Marked {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::new(vec![], |_| Ok(Marked { built_by: 0 })),
            Constructor::new(vec![Target::single::<u8>("a")], |args| {
                Ok(Marked {
                    built_by: usize::from(*args.get::<u8>("a")?),
                })
            })
            .inject(),
        ]
    }
}

#[test]
fn test_inject_marked_constructor_always_wins() {
    let (parent, child) = parent_and_child();
    parent.bind::<u8>().to_constant(Arc::new(7)).unwrap();
    let plan = TypePlan::of::<Marked>();
    let context = context_in(Arc::clone(&child) as Arc<dyn ScopeNode>);

    assert_eq!(
        ChildConstructorScorer.score(&context, &plan.constructors()[1]),
        INJECT_CONSTRUCTOR_SCORE
    );
    assert_eq!(child.get_self::<Marked>().unwrap().built_by, 7);
}
