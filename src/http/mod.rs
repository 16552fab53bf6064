//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, dispatch)
//!     → /proxy…  → relay.rs (target extraction, outbound request)
//!                  → cors.rs (response header overwrite)
//!     → fallback → static_files.rs (file lookup, root-page fallback)
//! ```

pub mod cors;
pub mod relay;
pub mod request;
pub mod server;
pub mod static_files;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
