use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::HOST},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::routes::AppState;

/// Rejects requests whose `Host` header is not listed in
/// `server.allowed_hosts`.
pub async fn allowed_hosts(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host());

    let allowed = match host {
        Some(host) => state.config.server.is_allowed_host(host),
        None => state.config.server.allowed_hosts.iter().any(|h| h == "*"),
    };

    if !allowed {
        tracing::warn!(host = ?host, "rejected request with disallowed host");

        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid host header." })),
        )
            .into_response();
    }

    next.run(request).await
}
