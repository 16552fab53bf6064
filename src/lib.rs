//! erratic — CORS-relaying HTTP forward proxy.
//!
//! A small relay service: `ANY /proxy?url=<target>` forwards the inbound
//! request to `<target>` and returns the upstream response with permissive
//! CORS headers overwritten. Everything else is served as a static file,
//! falling back to the root landing page.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌──────────────────────────────────────────┐
//!     ─────────────────▶│  http::server (axum router + middleware) │
//!                       │        │                                 │
//!                       │   /proxy?url=…          anything else    │
//!                       │        ▼                     ▼           │
//!                       │  http::relay          http::static_files │
//!                       │        │                                 │
//!                       │  reqwest client ──▶ upstream target      │
//!                       │        │                                 │
//!     Client Response   │  http::cors (overwrite headers)          │
//!     ◀─────────────────│        │                                 │
//!                       └──────────────────────────────────────────┘
//!
//!     Cross-cutting: config (env), lifecycle (shutdown), tracing
//! ```

// Core subsystems
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
