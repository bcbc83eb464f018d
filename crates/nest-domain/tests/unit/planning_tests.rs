//! Tests for constructor plans and arguments

use std::sync::Arc;

use nest_domain::planning::{Argument, Arguments, Constructor, Injectable, TypePlan, caster};
use nest_domain::value_objects::{Instance, Target};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct Hello {
    name: String,
}

impl Greeter for Hello {
    fn greet(&self) -> String {
        format!("hello {}", self.name)
    }
}

impl Injectable for Hello {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::new(vec![], |_| {
                Ok(Self {
                    name: "world".to_string(),
                })
            }),
            Constructor::new(vec![Target::single::<String>("name")], |args| {
                Ok(Self {
                    name: args.value::<String>("name")?,
                })
            })
            .inject(),
        ]
    }
}

fn named(name: &str) -> Arguments {
    Arguments::new(vec![(
        "name",
        Argument::Single(Instance::new(Arc::new(name.to_string()))),
    )])
}

#[test]
fn test_plan_keeps_declaration_order() {
    let plan = TypePlan::of::<Hello>();

    assert_eq!(plan.constructors().len(), 2);
    assert_eq!(plan.constructors()[0].index(), 0);
    assert!(!plan.constructors()[0].is_inject());
    assert!(plan.constructors()[1].is_inject());
    assert_eq!(plan.constructors()[1].targets()[0].name(), "name");
    assert!(plan.type_name().ends_with("Hello"));
}

#[test]
fn test_caster_exposes_service_view() {
    let plan = TypePlan::of::<Hello>();
    let object = plan.constructors()[1].build(&named("nest")).unwrap();

    let instance = caster::<Hello, dyn Greeter, _>(|hello| hello)(object).unwrap();

    assert!(instance.is::<dyn Greeter>());
    assert_eq!(instance.downcast::<dyn Greeter>().unwrap().greet(), "hello nest");
}

#[test]
fn test_self_caster_rejects_foreign_objects() {
    let plan = TypePlan::of::<Hello>();
    let foreign: nest_domain::planning::Object = Arc::new(42_u8);

    assert!(plan.self_caster()(foreign).is_err());
}

#[test]
fn test_arguments_type_mismatch_is_an_error() {
    let arguments = named("nest");

    assert!(arguments.get::<u32>("name").is_err());
    assert!(arguments.get::<String>("missing").is_err());
    assert_eq!(arguments.all::<String>("name").unwrap().len(), 1);
}
