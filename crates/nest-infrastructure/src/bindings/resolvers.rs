//! Standard missing-binding resolvers

use std::sync::Arc;

use nest_domain::bindings::{Binding, BindingTarget, Context};
use nest_domain::error::{Error, Result};
use nest_domain::ports::MissingBindingResolver;
use nest_domain::value_objects::{Instance, Request, Target};

use crate::constants::{DEFAULT_VALUE_BINDING_RESOLVER, SELF_BINDING_RESOLVER};

fn targets_default(request: &Request) -> bool {
    request.target().is_some_and(Target::has_default)
}

/// Binds parameters carrying a default value to that value
///
/// The binding only applies to requests whose target has a default, so it
/// never satisfies a plain request for the same service.
#[derive(Debug, Default)]
pub struct DefaultValueBindingResolver;

impl MissingBindingResolver for DefaultValueBindingResolver {
    fn name(&self) -> &'static str {
        DEFAULT_VALUE_BINDING_RESOLVER
    }

    fn resolve(&self, request: &Request) -> Vec<Arc<Binding>> {
        if !targets_default(request) {
            return Vec::new();
        }
        let factory = Arc::new(|context: &Context| -> Result<Instance> {
            context
                .request()
                .target()
                .and_then(Target::default_instance)
                .ok_or_else(|| {
                    Error::activation(format!(
                        "no default value for {}",
                        context.request().service()
                    ))
                })
        });
        let binding = Binding::new(*request.service(), BindingTarget::Method(factory))
            .implicit()
            .when(Arc::new(targets_default));
        vec![Arc::new(binding)]
    }
}

/// Binds injectable concrete types to themselves
#[derive(Debug, Default)]
pub struct SelfBindingResolver;

impl MissingBindingResolver for SelfBindingResolver {
    fn name(&self) -> &'static str {
        SELF_BINDING_RESOLVER
    }

    fn resolve(&self, request: &Request) -> Vec<Arc<Binding>> {
        let Some(plan) = request.service().plan() else {
            return Vec::new();
        };
        let cast = plan.self_caster();
        let target = BindingTarget::Type {
            plan: Arc::new(plan),
            cast,
        };
        vec![Arc::new(Binding::new(*request.service(), target).implicit())]
    }
}
