//! Configuration types

pub mod app;
pub mod logging;
pub mod scope;

pub use app::NestConfig;
pub use logging::LoggingConfig;
pub use scope::ScopeSettings;
