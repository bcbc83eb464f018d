//! Constructor selection

pub mod provider;
pub mod scorer;
pub mod selector;

pub use provider::{construct, select_constructor};
pub use scorer::{ChildConstructorScorer, StandardConstructorScorer, explicit_binding_in_chain};
pub use selector::StandardSelector;
