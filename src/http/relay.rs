//! The request relay behind `/proxy`.
//!
//! # Responsibilities
//! - Extract the target URL from the `url` query parameter
//! - Forward method, headers, and body to the target, streaming both ways
//! - Rewrite the origin host to the target authority
//! - Overwrite CORS headers on the relayed response
//! - Map failures to the 400/500 JSON contract
//!
//! # Design Decisions
//! - One outbound request per inbound request; no retries, no redirect
//!   following (redirect responses are relayed as-is)
//! - Hop-by-hop headers never cross the relay in either direction
//! - The `/proxy` route always carries the CORS header set, error
//!   responses included

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::http::cors;
use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;

/// Path prefix stripped from inbound requests before forwarding.
const PROXY_PREFIX: &str = "/proxy";

/// User-visible relay failures.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `url` query parameter was absent or empty.
    #[error("erratic: missing target url")]
    MissingTarget,

    /// The outbound request could not be completed.
    #[error("erratic: proxy connection failed: {details}")]
    Upstream { details: String },
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            RelayError::MissingTarget => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "erratic: missing target url",
                    "usage": "/proxy?url=https://example.com",
                }),
            ),
            RelayError::Upstream { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "erratic: proxy connection failed",
                    "details": details,
                }),
            ),
        };
        let mut response = (status, Json(body)).into_response();
        cors::overwrite_cors(response.headers_mut());
        response
    }
}

/// Relay an inbound `/proxy` request to the target named in its query.
pub async fn relay_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, RelayError> {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();

    let (target, extra_query) = extract_target(parts.uri.query())?;
    let target_url = build_target_url(&target, parts.uri.path(), &extra_query)?;

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %target_url,
        "Relaying request"
    );

    let mut outbound_headers = HeaderMap::new();
    for (name, value) in &parts.headers {
        if skip_request_header(name) {
            continue;
        }
        outbound_headers.append(name.clone(), value.clone());
    }

    let upstream = state
        .client
        .request(parts.method.clone(), target_url.clone())
        .headers(outbound_headers)
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await
        .map_err(|error| {
            tracing::warn!(
                request_id = %request_id,
                target = %target_url,
                error = %error,
                "Upstream request failed"
            );
            RelayError::Upstream {
                details: error.to_string(),
            }
        })?;

    let status = upstream.status();
    tracing::debug!(request_id = %request_id, status = %status, "Upstream responded");

    let mut headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    cors::overwrite_cors(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Pull the target URL out of the query string.
///
/// The first `url` parameter wins; every other parameter is forwarded to
/// the target.
fn extract_target(query: Option<&str>) -> Result<(String, Vec<(String, String)>), RelayError> {
    let mut target = None;
    let mut extra = Vec::new();

    for (key, value) in url::form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
        if key == "url" && target.is_none() {
            target = Some(value.into_owned());
        } else {
            extra.push((key.into_owned(), value.into_owned()));
        }
    }

    match target {
        Some(t) if !t.is_empty() => Ok((t, extra)),
        _ => Err(RelayError::MissingTarget),
    }
}

/// Build the outbound URL: target, plus any inbound path suffix after the
/// `/proxy` prefix, plus forwarded query parameters.
fn build_target_url(
    target: &str,
    inbound_path: &str,
    extra_query: &[(String, String)],
) -> Result<Url, RelayError> {
    let mut url = Url::parse(target).map_err(|error| RelayError::Upstream {
        details: format!("invalid target url '{target}': {error}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::Upstream {
            details: format!("unsupported target scheme '{}'", url.scheme()),
        });
    }

    let suffix = inbound_path
        .strip_prefix(PROXY_PREFIX)
        .unwrap_or(inbound_path);
    if !suffix.is_empty() && suffix != "/" {
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}{suffix}"));
    }

    if !extra_query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(extra_query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Headers that must not be copied onto the outbound request.
///
/// `host` is rewritten to the target authority by the client;
/// `content-length` is recomputed for the streamed body.
fn skip_request_header(name: &HeaderName) -> bool {
    is_hop_by_hop(name) || matches!(name.as_str(), "host" | "content-length")
}

/// Hop-by-hop headers are scoped to a single connection and never cross
/// the relay.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}
