//! Configuration schema definitions.
//!
//! All types derive Serde traits; the defaults run the service with zero
//! setup (bind 0.0.0.0:3000, serve static files from the working
//! directory).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the relay service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static file serving settings.
    pub static_files: StaticFileConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFileConfig {
    /// Directory served for non-proxy paths.
    pub root: PathBuf,

    /// File served for `/` and as the fallback for unmatched paths.
    pub index_file: String,
}

impl Default for StaticFileConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index_file: "index.html".to_string(),
        }
    }
}
