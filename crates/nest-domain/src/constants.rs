//! Domain layer constants
//!
//! Values shared by every scope implementation. Infrastructure-specific
//! constants live in the infrastructure crate.

// ============================================================================
// SCOPE CONSTANTS
// ============================================================================

/// Name given to root scopes created without an explicit name
pub const ROOT_SCOPE_NAME: &str = "root";

/// Prefix of generated child scope names
pub const CHILD_SCOPE_PREFIX: &str = "child";

/// Nesting depth beyond which constructor resolution is aborted
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 64;

// ============================================================================
// SCORING CONSTANTS
// ============================================================================

/// Score of a constructor explicitly marked for injection
pub const INJECT_CONSTRUCTOR_SCORE: i64 = i64::MAX;

/// Base score of a constructor with at least one unsatisfiable parameter
///
/// Such a constructor still ranks by parameter count, but below every fully
/// satisfiable one.
pub const UNSATISFIABLE_CONSTRUCTOR_BASE: i64 = i64::MIN + 1;
