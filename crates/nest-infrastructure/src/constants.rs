//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `nest_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "nest.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "nest";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "NEST";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "NEST_LOG";

/// File name stem of rolling log files
pub const LOG_FILE_STEM: &str = "nest";

// ============================================================================
// COMPONENT IMPLEMENTATION NAMES
// ============================================================================

/// Root activation cache
pub const STANDARD_ACTIVATION_CACHE: &str = "StandardActivationCache";

/// Forwarding activation cache of child scopes
pub const CHILD_ACTIVATION_CACHE: &str = "ChildActivationCache";

/// Single-scope constructor scorer
pub const STANDARD_CONSTRUCTOR_SCORER: &str = "StandardConstructorScorer";

/// Chain-walking constructor scorer of child scopes
pub const CHILD_CONSTRUCTOR_SCORER: &str = "ChildConstructorScorer";

/// Constructor selector
pub const STANDARD_SELECTOR: &str = "StandardSelector";

/// Resolver binding targets that carry a default value
pub const DEFAULT_VALUE_BINDING_RESOLVER: &str = "DefaultValueBindingResolver";

/// Resolver self-binding injectable types
pub const SELF_BINDING_RESOLVER: &str = "SelfBindingResolver";

/// Strategy recording activations in the activation cache
pub const ACTIVATION_CACHE_STRATEGY: &str = "ActivationCacheStrategy";

/// Strategy running `Initializable::initialize`
pub const INITIALIZABLE_STRATEGY: &str = "InitializableStrategy";

/// Strategy running binding activation actions
pub const BINDING_ACTION_STRATEGY: &str = "BindingActionStrategy";
