//! Constructor injection
//!
//! Builds a planned type: the selector offers candidates, the scorer ranks
//! them, and every parameter of the winner is resolved through the context
//! scope. Ties go to the constructor declared first.

use nest_domain::bindings::Context;
use nest_domain::error::{Error, Result};
use nest_domain::planning::{Argument, Arguments, Caster, ConstructorPlan, TypePlan};
use nest_domain::ports::{ComponentRegistryExt, ConstructorScorer, ResolutionRoot, Selector};
use nest_domain::value_objects::{Instance, Target};
use tracing::trace;

/// Build an instance of `plan` viewed through `cast`
pub fn construct(context: &Context, plan: &TypePlan, cast: &Caster) -> Result<Instance> {
    let constructor = select_constructor(context, plan)?;
    let arguments = resolve_arguments(context, constructor)?;
    let object = constructor.build(&arguments)?;
    cast(object)
}

/// Highest scoring candidate, earliest declared on ties
pub fn select_constructor<'a>(context: &Context, plan: &'a TypePlan) -> Result<&'a ConstructorPlan> {
    let components = context.scope().components();
    let selector = components.get::<dyn Selector>()?;
    let scorer = components.get::<dyn ConstructorScorer>()?;

    let mut best: Option<(&ConstructorPlan, i64)> = None;
    for candidate in selector.select_constructors(plan) {
        let score = scorer.score(context, candidate);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    let (constructor, score) = best.ok_or_else(|| {
        Error::activation(format!("{} has no usable constructor", plan.type_name()))
    })?;
    trace!(
        type_name = plan.type_name(),
        constructor = constructor.index(),
        score,
        "Selected constructor"
    );
    Ok(constructor)
}

fn resolve_arguments(context: &Context, constructor: &ConstructorPlan) -> Result<Arguments> {
    constructor
        .targets()
        .iter()
        .map(|target| Ok((target.name(), resolve_argument(context, target)?)))
        .collect::<Result<Vec<_>>>()
        .map(Arguments::new)
}

fn resolve_argument(context: &Context, target: &Target) -> Result<Argument> {
    if let Some(value) = context.argument(target.name()) {
        return Ok(Argument::Single(value.clone()));
    }

    let request = context.nested_request(target);
    let mut resolution = context.scope().resolve(&request);

    if target.is_sequence() {
        return resolution.collect::<Result<Vec<_>>>().map(Argument::Sequence);
    }

    match resolution.next() {
        Some(Ok(instance)) => Ok(Argument::Single(instance)),
        Some(Err(error)) => match target.default_instance() {
            Some(default) if error.is_no_viable_binding_for(request.service().type_name()) => {
                Ok(Argument::Single(default))
            }
            _ => Err(error),
        },
        None => target.default_instance().map(Argument::Single).ok_or_else(|| {
            Error::no_viable_binding(request.service().type_name(), context.scope().name())
        }),
    }
}
