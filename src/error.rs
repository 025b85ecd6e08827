//! Error types for rendering, registration and configuration.

use thiserror::Error;

/// Failure inside a single tile component.
///
/// Never escapes the composer: a failing component is skipped and the rest of
/// the tile still renders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("text measurement returned non-finite width {width} for {text:?}")]
    Measure { text: String, width: f64 },
    #[error("invalid region {width}x{height}")]
    InvalidRegion { width: f64, height: f64 },
    #[error("component panicked: {0}")]
    Panicked(String),
}

/// Rejected component registration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component name is empty")]
    EmptyName,
    #[error("component name {0:?} contains whitespace or '+'")]
    InvalidName(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
