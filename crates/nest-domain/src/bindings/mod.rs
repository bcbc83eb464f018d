//! Bindings and activation context

pub mod binding;
pub mod context;

pub use binding::{
    Binding, BindingAction, BindingCondition, BindingTarget, Factory, InstanceLifetime,
};
pub use context::Context;
