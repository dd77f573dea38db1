//! Axum webhook server.
//!
//! One POST route receives LINE webhook deliveries; the signature is
//! checked against the raw body before anything is parsed.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::{ExposeSecret, SecretString};
use tower_http::trace::TraceLayer;

use crate::bot::Bot;
use crate::line::events::WebhookPayload;
use crate::line::signature::verify_signature;

/// Shared state for webhook routes.
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Bot>,
    pub channel_secret: SecretString,
}

/// POST /callback
///
/// LINE webhook endpoint. Returns 400 on a missing or invalid signature
/// before any event is processed; otherwise dispatches every event and
/// answers "OK".
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let Some(signature) = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
    else {
        tracing::warn!("Webhook rejected: missing x-line-signature header");
        return (StatusCode::BAD_REQUEST, "missing signature").into_response();
    };

    if !verify_signature(state.channel_secret.expose_secret(), signature, &body) {
        tracing::warn!("Webhook rejected: signature mismatch");
        return (StatusCode::BAD_REQUEST, "invalid signature").into_response();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "Webhook rejected: unparseable body");
            return (StatusCode::BAD_REQUEST, "invalid body").into_response();
        }
    };

    state.bot.handle_payload(payload).await;
    (StatusCode::OK, "OK").into_response()
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Build the webhook router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
