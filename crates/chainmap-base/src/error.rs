//! # Error Types
//!
//! Registry queries return [`chainmap_core::RegistryError`] directly. Loading
//! a configuration can fail on either side of the YAML boundary, so it gets
//! its own enum.

use chainmap_core::RegistryError;
use thiserror::Error;

/// Error loading or resolving a [`CircleConfig`](crate::config::CircleConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML text is malformed, or names an unknown network or chain.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The selection is well formed but not supported by the registry.
    #[error("unsupported selection: {0}")]
    Registry(#[from] RegistryError),
}
