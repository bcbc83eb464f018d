//! Tests for service keys and instance identity

use std::sync::Arc;

use nest_domain::planning::{Constructor, Injectable};
use nest_domain::value_objects::{Instance, ServiceKey};

trait Shape: Send + Sync {}

struct Square;

impl Shape for Square {}

impl Injectable for Square {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(vec![], |_| Ok(Square))]
    }
}

#[test]
fn test_keys_compare_by_type_only() {
    assert_eq!(ServiceKey::of::<Square>(), ServiceKey::injectable::<Square>());
    assert_ne!(ServiceKey::of::<Square>(), ServiceKey::of::<dyn Shape>());
    assert!(ServiceKey::injectable::<Square>().is_self_bindable());
    assert!(ServiceKey::of::<Square>().plan().is_none());
}

#[test]
fn test_identity_survives_service_views() {
    let square = Arc::new(Square);
    let as_self = Instance::new(Arc::clone(&square));
    let as_shape = Instance::new(square as Arc<dyn Shape>);

    assert!(as_self.same_object(&as_shape));
    assert!(as_shape.is::<dyn Shape>());
    assert!(!as_shape.is::<Square>());
}

#[test]
fn test_watch_reports_dropped_objects() {
    let instance = Instance::new(Arc::new(String::from("short lived")));
    let watch = instance.watch();
    assert!(watch.is_alive());

    drop(instance);
    assert!(!watch.is_alive());
}

#[test]
fn test_distinct_objects_have_distinct_ids() {
    let first = Instance::new(Arc::new(1_u64));
    let second = Instance::new(Arc::new(1_u64));

    assert!(!first.same_object(&second));
}
