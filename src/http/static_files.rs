//! Static file serving for every non-proxy path.
//!
//! # Responsibilities
//! - Serve GET/HEAD requests from the configured root directory
//! - Fall back to the root HTML page for unmatched paths
//! - Derive Content-Type from the file extension

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::StaticFileConfig;
use crate::http::server::AppState;

/// Fallback handler for everything the router does not match.
pub async fn static_handler(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method();
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }
    let is_head = method == Method::HEAD;

    serve_path(&state.config.static_files, request.uri().path(), is_head).await
}

async fn serve_path(config: &StaticFileConfig, path: &str, is_head: bool) -> Response {
    if let Some(file_path) = resolve(&config.root, path) {
        if let Ok(content) = fs::read(&file_path).await {
            let content_type =
                content_type_for(file_path.extension().and_then(|e| e.to_str()));
            return file_response(content, content_type, is_head);
        }
    }

    // Unmatched paths fall back to the root page
    let index_path = config.root.join(&config.index_file);
    match fs::read(&index_path).await {
        Ok(content) => file_response(content, "text/html; charset=utf-8", is_head),
        Err(error) => {
            tracing::debug!(
                path = %index_path.display(),
                error = %error,
                "Root page unavailable"
            );
            not_found()
        }
    }
}

/// Map a request path onto the root directory.
///
/// `/` maps to nothing (the index fallback handles it) and any `..`
/// segment is treated as unmatched.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let clean = request_path.trim_start_matches('/');
    if clean.is_empty() {
        return None;
    }
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(root.join(clean))
}

fn file_response(content: Vec<u8>, content_type: &'static str, is_head: bool) -> Response {
    let length = content.len();
    let body = if is_head {
        Body::empty()
    } else {
        Body::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

/// Get MIME Content-Type based on file extension.
fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
