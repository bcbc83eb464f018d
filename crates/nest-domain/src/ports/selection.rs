//! Constructor selection and implicit binding ports

use std::sync::Arc;

use crate::bindings::{Binding, Context};
use crate::planning::{ConstructorPlan, TypePlan};
use crate::value_objects::Request;

/// Ranks a candidate constructor; higher wins
pub trait ConstructorScorer: Send + Sync {
    /// Score `constructor` for construction within `context`
    fn score(&self, context: &Context, constructor: &ConstructorPlan) -> i64;
}

/// Picks the constructors of a type that may be used for injection
pub trait Selector: Send + Sync {
    /// Candidate constructors in declaration order
    fn select_constructors<'a>(&self, plan: &'a TypePlan) -> Vec<&'a ConstructorPlan>;
}

/// Synthesizes implicit bindings for requests nothing is bound to
pub trait MissingBindingResolver: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Implicit bindings able to satisfy `request`, possibly none
    fn resolve(&self, request: &Request) -> Vec<Arc<Binding>>;
}
