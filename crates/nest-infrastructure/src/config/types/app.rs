//! Top-level configuration

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::scope::ScopeSettings;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestConfig {
    /// Scope creation settings
    pub scope: ScopeSettings,

    /// Logging setup
    pub logging: LoggingConfig,
}
