//! Capability kinds held by component registries

use std::fmt;

/// Capability kinds a component registry can hold
///
/// The set is closed. Three kinds define identity and uniqueness semantics
/// for a whole scope tree and are immutable in child scopes, see
/// [`IMMUTABLE_IN_CHILD_SCOPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Records which objects were already activated / deactivated
    ActivationCache,
    /// Ranks candidate constructors
    ConstructorScorer,
    /// Picks constructor candidates for injection
    Selector,
    /// Synthesizes implicit bindings for unbound requests
    MissingBindingResolver,
    /// Step of the activation / deactivation pipeline
    ActivationStrategy,
}

/// Capability kinds a child scope may neither add, remove nor replace
pub const IMMUTABLE_IN_CHILD_SCOPES: [ComponentKind; 3] = [
    ComponentKind::ActivationCache,
    ComponentKind::ConstructorScorer,
    ComponentKind::Selector,
];

impl ComponentKind {
    /// Every capability kind
    pub const ALL: [ComponentKind; 5] = [
        Self::ActivationCache,
        Self::ConstructorScorer,
        Self::Selector,
        Self::MissingBindingResolver,
        Self::ActivationStrategy,
    ];

    /// Whether writes to this kind are rejected in child scopes
    pub const fn is_immutable_in_child(self) -> bool {
        matches!(
            self,
            Self::ActivationCache | Self::ConstructorScorer | Self::Selector
        )
    }

    /// Stable name of the kind
    pub const fn name(self) -> &'static str {
        match self {
            Self::ActivationCache => "ActivationCache",
            Self::ConstructorScorer => "ConstructorScorer",
            Self::Selector => "Selector",
            Self::MissingBindingResolver => "MissingBindingResolver",
            Self::ActivationStrategy => "ActivationStrategy",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
