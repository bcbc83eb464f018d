//! Tests for lazy resolutions and the typed resolution conveniences

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nest_domain::error::Error;
use nest_domain::ports::{Resolution, ResolutionRoot, ResolutionRootExt};
use nest_domain::value_objects::{Instance, Request, ServiceKey};

/// Resolution root answering only requests for `u32`
struct Numbers(Vec<u32>);

impl ResolutionRoot for Numbers {
    fn can_resolve_with(&self, request: &Request, _ignore_implicit_bindings: bool) -> bool {
        request.service() == &ServiceKey::of::<u32>() && !self.0.is_empty()
    }

    fn resolve(&self, request: &Request) -> Resolution {
        if request.service() != &ServiceKey::of::<u32>() {
            return Resolution::failed(Error::no_viable_binding(
                request.service().type_name(),
                "numbers",
            ));
        }
        let values: Vec<_> = self
            .0
            .iter()
            .map(|value| Ok(Instance::new(Arc::new(*value))))
            .collect();
        if values.is_empty() && request.is_optional() {
            return Resolution::empty();
        }
        Resolution::from_iter(values)
    }
}

#[test]
fn test_deferred_resolution_runs_on_first_pull() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let mut resolution = Resolution::deferred(move || {
        flag.store(true, Ordering::SeqCst);
        Ok(Resolution::from_iter(vec![Ok(Instance::new(Arc::new(1_u8)))]))
    });

    assert!(!ran.load(Ordering::SeqCst));
    assert!(resolution.next().unwrap().is_ok());
    assert!(ran.load(Ordering::SeqCst));
    assert!(resolution.next().is_none());
}

#[test]
fn test_deferred_failure_surfaces_on_iteration() {
    let mut resolution = Resolution::deferred(|| Err(Error::activation("late")));

    assert!(matches!(resolution.next(), Some(Err(Error::Activation { .. }))));
    assert!(resolution.next().is_none());
}

#[test]
fn test_prime_keeps_every_element() {
    let resolution = Resolution::from_iter(vec![
        Ok(Instance::new(Arc::new(1_u8))),
        Ok(Instance::new(Arc::new(2_u8))),
    ]);

    let primed = resolution.prime().unwrap();
    assert_eq!(primed.count(), 2);
}

#[test]
fn test_prime_reports_leading_error() {
    let resolution = Resolution::failed(Error::no_viable_binding("u8", "root"));

    let error = resolution.prime().unwrap_err();
    assert!(error.is_no_viable_binding());
}

#[test]
fn test_typed_get_views_first_instance() {
    let root = Numbers(vec![7, 8]);

    assert_eq!(*root.get::<u32>().unwrap(), 7);
    assert_eq!(
        root.get_all::<u32>().unwrap().iter().map(|v| **v).collect::<Vec<_>>(),
        vec![7, 8]
    );
    assert!(root.can_get::<u32>());
    assert!(!root.can_get::<String>());
}

#[test]
fn test_try_get_on_empty_root() {
    let root = Numbers(Vec::new());

    assert!(root.try_get::<u32>().unwrap().is_none());
    assert!(root.get_all::<u32>().unwrap().is_empty());
}

#[test]
fn test_non_scope_roots_have_no_scope_view() {
    let root: Arc<dyn ResolutionRoot> = Arc::new(Numbers(vec![1]));

    assert!(root.as_scope_node().is_none());
}
