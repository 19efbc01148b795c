//! Front door: one public port that forwards `/api/*` to the API process
//! and serves the built dashboard for everything else.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

#[derive(Clone)]
pub struct ProxyState {
    pub client: reqwest::Client,
    pub backend_url: String,
}

impl ProxyState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
        }
    }
}

pub fn create_proxy_router(state: ProxyState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api", any(forward))
        .route("/api/*rest", any(forward))
        .with_state(state)
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
}

async fn forward(State(state): State<ProxyState>, req: Request) -> Response {
    let target = req.uri().path().to_string();
    match forward_request(&state, req).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, path = %target, backend = %state.backend_url, "Upstream request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "success": false,
                    "data": null,
                    "error": "API server unavailable",
                })),
            )
                .into_response()
        }
    }
}

async fn forward_request(state: &ProxyState, req: Request) -> anyhow::Result<Response> {
    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", state.backend_url, path_and_query);

    let mut headers = strip_hop_by_hop(&parts.headers);
    headers.remove(header::HOST);
    let body = to_bytes(body, MAX_BODY_BYTES).await?;

    tracing::debug!(method = %parts.method, %url, "Forwarding to API");
    let upstream = state
        .client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let mut builder = Response::builder().status(upstream.status());
    if let Some(out) = builder.headers_mut() {
        *out = strip_hop_by_hop(upstream.headers());
    }
    let bytes = upstream.bytes().await?;

    Ok(builder.body(Body::from(bytes))?)
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in &HOP_BY_HOP {
        out.remove(name);
    }
    out
}
