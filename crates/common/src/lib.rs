//! Shared config and error definitions for weather-atlas.

pub mod config;
pub mod error;

pub use config::ServiceConfig;
pub use error::Error;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
