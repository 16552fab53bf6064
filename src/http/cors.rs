//! CORS header rewriting for relayed responses.
//!
//! # Responsibilities
//! - Hold the fixed permissive header set the relay always emits
//! - Overwrite (not merge) any upstream-supplied CORS headers

use axum::http::{header, HeaderMap, HeaderValue};

/// Value of `Access-Control-Allow-Origin` on every relayed response.
pub const ALLOW_ORIGIN: &str = "*";

/// Value of `Access-Control-Allow-Methods` on every relayed response.
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Value of `Access-Control-Allow-Headers` on every relayed response.
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Overwrite the CORS header set on a response.
///
/// `insert` drops every value the upstream may have supplied for these
/// keys, so the relayed response carries exactly the fixed set.
pub fn overwrite_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
