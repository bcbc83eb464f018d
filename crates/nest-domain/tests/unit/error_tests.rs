//! Tests for the domain error type

use std::error::Error as _;

use nest_domain::error::Error;
use nest_domain::value_objects::ComponentKind;

#[test]
fn test_no_viable_binding_lists_attempted_scope() {
    let error = Error::no_viable_binding("dyn Bar", "root/child-1");

    assert!(error.is_no_viable_binding());
    assert!(error.is_no_viable_binding_for("dyn Bar"));
    assert!(!error.is_no_viable_binding_for("dyn Foo"));
    assert_eq!(
        error.to_string(),
        "No viable binding for dyn Bar in scope 'root/child-1' (tried: root/child-1)"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_fallback_failure_keeps_local_error_primary() {
    let local = Error::no_viable_binding("dyn Bar", "child");
    let parent = Error::no_viable_binding("dyn Bar", "root");

    let error = local.with_fallback_failure(parent);

    match &error {
        Error::NoViableBinding {
            scope,
            attempts,
            parent_failure,
            ..
        } => {
            assert_eq!(scope, "child");
            assert_eq!(attempts, &["child".to_string(), "root".to_string()]);
            assert!(parent_failure.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
    let source = error.source().expect("parent failure is chained");
    assert!(source.to_string().contains("scope 'root'"));
}

#[test]
fn test_fallback_failure_of_other_kind_is_marked() {
    let local = Error::no_viable_binding("dyn Bar", "child");
    let error = local.with_fallback_failure(Error::activation("boom"));

    match error {
        Error::NoViableBinding { attempts, .. } => {
            assert_eq!(attempts, vec!["child".to_string(), "<parent>".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fallback_failure_leaves_other_errors_alone() {
    let error = Error::activation("constructor panicked")
        .with_fallback_failure(Error::no_viable_binding("dyn Bar", "root"));

    assert!(matches!(error, Error::Activation { .. }));
    assert!(error.source().is_none());
}

#[test]
fn test_immutable_component_error() {
    let error = Error::immutable_component(ComponentKind::Selector, "root/child-2");

    assert!(error.is_immutable_component());
    assert_eq!(
        error.to_string(),
        "Component Selector is immutable in child scope 'root/child-2'"
    );
}

#[test]
fn test_configuration_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("Failed to read config", io);

    assert!(error.to_string().starts_with("Configuration error:"));
    assert!(error.source().is_some());
}
