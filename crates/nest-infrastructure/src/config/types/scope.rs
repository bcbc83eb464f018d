//! Scope configuration types

use nest_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;
use serde::{Deserialize, Serialize};

/// Settings applied when a scope is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeSettings {
    /// Do not record activations in the activation cache
    ///
    /// Only affects scopes that build a fresh component set. The cache is
    /// still registered and authoritative; nothing is recorded into it.
    pub activation_cache_disabled: bool,

    /// Nesting depth beyond which constructor resolution fails
    pub max_resolution_depth: usize,
}

impl Default for ScopeSettings {
    fn default() -> Self {
        Self {
            activation_cache_disabled: false,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}
