//! Binding store, declaration syntax and implicit binding resolvers

pub mod builder;
pub mod resolvers;
pub mod store;

pub use builder::BindingBuilder;
pub use resolvers::{DefaultValueBindingResolver, SelfBindingResolver};
pub use store::BindingStore;
