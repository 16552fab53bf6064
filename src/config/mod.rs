//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT)
//!     → env.rs (read & validate)
//!     → RelayConfig (defaults filled in)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the service runs with zero setup
//! - The only external knob is the PORT environment variable

pub mod env;
pub mod schema;

pub use env::{load_from_env, ConfigError};
pub use schema::{ListenerConfig, RelayConfig, StaticFileConfig};
