/// Default configuration template and file creation.
pub mod default;

/// Configuration error types.
pub mod error;

/// Configuration file loader.
pub mod loader;

/// TOML configuration schema types.
pub mod schema;

/// XDG Base Directory path resolution.
pub mod xdg;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{Config, GridConfig, LogConfig, LogLevel};
