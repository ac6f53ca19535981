//! Service configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// JSON dataset to serve. `None` uses the dataset compiled into the binary.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Directory mounted at `/.well-known`.
    #[serde(default = "default_well_known_dir")]
    pub well_known_dir: PathBuf,

    /// Regenerate `<well_known_dir>/openapi.json` on startup.
    #[serde(default = "default_true")]
    pub write_openapi: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_path: None,
            well_known_dir: default_well_known_dir(),
            write_openapi: true,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".into()
}

fn default_well_known_dir() -> PathBuf {
    PathBuf::from(".well-known")
}

fn default_true() -> bool {
    true
}
