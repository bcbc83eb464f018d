//! Constructor scorers
//!
//! A constructor scores `1 + parameter count` when every parameter is
//! satisfiable, and ranks below every such constructor otherwise (still
//! ordered by parameter count). Constructors marked for injection always win.
//!
//! A parameter is satisfiable when the context supplies an explicit argument
//! for it, when it carries a default value, or when an explicit binding exists
//! for its type (sequence parameters checked by element type). The two scorers
//! differ only in where they look for that binding.

use std::sync::Arc;

use nest_domain::bindings::Context;
use nest_domain::constants::{INJECT_CONSTRUCTOR_SCORE, UNSATISFIABLE_CONSTRUCTOR_BASE};
use nest_domain::planning::ConstructorPlan;
use nest_domain::ports::{ConstructorScorer, ScopeNode};
use nest_domain::value_objects::{ServiceKey, Target};
use tracing::trace;

fn score_constructor<F>(context: &Context, constructor: &ConstructorPlan, binding_exists: F) -> i64
where
    F: Fn(&Context, &Target) -> bool,
{
    if constructor.is_inject() {
        return INJECT_CONSTRUCTOR_SCORE;
    }

    let targets = constructor.targets();
    let count = i64::try_from(targets.len()).unwrap_or(i64::MAX / 2);
    let satisfiable = targets.iter().all(|target| {
        context.argument(target.name()).is_some() || binding_exists(context, target)
    });

    let score = if satisfiable {
        1 + count
    } else {
        UNSATISFIABLE_CONSTRUCTOR_BASE + count
    };
    trace!(
        constructor = constructor.index(),
        parameters = targets.len(),
        satisfiable,
        score,
        "Scored constructor"
    );
    score
}

/// Scorer consulting only the context scope's own bindings
#[derive(Debug, Default)]
pub struct StandardConstructorScorer;

impl ConstructorScorer for StandardConstructorScorer {
    fn score(&self, context: &Context, constructor: &ConstructorPlan) -> i64 {
        score_constructor(context, constructor, |context, target| {
            target.has_default() || context.scope().has_explicit_binding(&target.binding_key())
        })
    }
}

/// Scorer walking the scope chain for explicit bindings
///
/// A parameter only a parent scope can satisfy still counts, so a constructor
/// needing it is preferred over a thinner one.
#[derive(Debug, Default)]
pub struct ChildConstructorScorer;

impl ConstructorScorer for ChildConstructorScorer {
    fn score(&self, context: &Context, constructor: &ConstructorPlan) -> i64 {
        score_constructor(context, constructor, |context, target| {
            target.has_default() || explicit_binding_in_chain(context.scope(), &target.binding_key())
        })
    }
}

/// Whether `scope` or any ancestor reachable as a scope node binds `service` explicitly
///
/// The walk stops at the first parent that is only a resolution root.
pub fn explicit_binding_in_chain(scope: &Arc<dyn ScopeNode>, service: &ServiceKey) -> bool {
    let mut current = Some(Arc::clone(scope));
    while let Some(node) = current {
        if node.has_explicit_binding(service) {
            trace!(scope = node.name(), %service, "Explicit binding found in scope chain");
            return true;
        }
        current = node.parent().and_then(|parent| parent.as_scope_node());
    }
    false
}
