//! Error handling types

use crate::value_objects::ComponentKind;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Nest resolution runtime
#[derive(Error, Debug)]
pub enum Error {
    /// A scope could not produce an instance for the requested service
    ///
    /// `attempts` lists the scopes that were tried, in order. When a parent
    /// fallback also failed, its error is kept as `parent_failure` and exposed
    /// through `source()`, while this error stays the primary one.
    #[error(
        "No viable binding for {service} in scope '{scope}' (tried: {})",
        .attempts.join(" -> ")
    )]
    NoViableBinding {
        /// Requested service type
        service: String,
        /// Scope the caller asked
        scope: String,
        /// Scopes tried, in order
        attempts: Vec<String>,
        /// Masked failure of the parent fallback
        #[source]
        parent_failure: Option<Box<Error>>,
    },

    /// Neither the local nor any ancestor registry provides a component
    #[error("No component registered for {kind}")]
    NoComponentRegistered {
        /// Requested capability kind
        kind: ComponentKind,
    },

    /// A write targeted a capability kind that child scopes must not change
    #[error("Component {kind} is immutable in child scope '{scope}'")]
    ImmutableComponent {
        /// Capability kind the write targeted
        kind: ComponentKind,
        /// Child scope that rejected the write
        scope: String,
    },

    /// Construction failed for a reason other than a missing binding
    #[error("Activation error: {message}")]
    Activation {
        /// Description of the activation failure
        message: String,
    },

    /// The scope was disposed before the operation
    #[error("Scope '{scope}' has been disposed")]
    ScopeDisposed {
        /// Name of the disposed scope
        scope: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a no-viable-binding error for a single scope attempt
    pub fn no_viable_binding<S: Into<String>, C: Into<String>>(service: S, scope: C) -> Self {
        let scope = scope.into();
        Self::NoViableBinding {
            service: service.into(),
            attempts: vec![scope.clone()],
            scope,
            parent_failure: None,
        }
    }

    /// Create a no-component-registered error
    pub fn no_component(kind: ComponentKind) -> Self {
        Self::NoComponentRegistered { kind }
    }

    /// Create an immutable-component error
    pub fn immutable_component<S: Into<String>>(kind: ComponentKind, scope: S) -> Self {
        Self::ImmutableComponent {
            kind,
            scope: scope.into(),
        }
    }

    /// Create an activation error
    pub fn activation<S: Into<String>>(message: S) -> Self {
        Self::Activation {
            message: message.into(),
        }
    }

    /// Create a scope-disposed error
    pub fn scope_disposed<S: Into<String>>(scope: S) -> Self {
        Self::ScopeDisposed {
            scope: scope.into(),
        }
    }

    /// Attach the failure of a parent fallback to a local no-viable-binding error
    ///
    /// The local error stays primary. Scopes listed by the parent failure are
    /// appended to `attempts`. Other error kinds are returned unchanged.
    pub fn with_fallback_failure(self, parent: Error) -> Self {
        match self {
            Self::NoViableBinding {
                service,
                scope,
                mut attempts,
                parent_failure: _,
            } => {
                match &parent {
                    Self::NoViableBinding {
                        attempts: tried, ..
                    } => attempts.extend(tried.iter().cloned()),
                    _ => attempts.push("<parent>".to_string()),
                }
                Self::NoViableBinding {
                    service,
                    scope,
                    attempts,
                    parent_failure: Some(Box::new(parent)),
                }
            }
            other => other,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Whether this is a no-viable-binding error
    pub fn is_no_viable_binding(&self) -> bool {
        matches!(self, Self::NoViableBinding { .. })
    }

    /// Whether this is a no-viable-binding error for the given service type
    pub fn is_no_viable_binding_for(&self, type_name: &str) -> bool {
        matches!(self, Self::NoViableBinding { service, .. } if service == type_name)
    }

    /// Whether this is an immutable-component error
    pub fn is_immutable_component(&self) -> bool {
        matches!(self, Self::ImmutableComponent { .. })
    }

    /// Whether this is a no-component-registered error
    pub fn is_no_component(&self) -> bool {
        matches!(self, Self::NoComponentRegistered { .. })
    }
}
