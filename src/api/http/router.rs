// src/api/http/router.rs
// HTTP router composition for the REST endpoints.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::{chat_handler, feedback_handler, health_handler, summary_handler};
use crate::config::CONFIG;
use crate::state::AppState;

/// Main HTTP router. Every response carries `Cache-Control: no-store`; the
/// transcript travels with each request and nothing may be cached.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            CONFIG
                .cors_origin
                .parse::<HeaderValue>()
                .map(AllowOrigin::exact)
                .unwrap_or_else(|_| AllowOrigin::any()),
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Chat turn, transcript summary, feedback submission
        .route("/api/chat", post(chat_handler))
        .route("/api/summary", post(summary_handler))
        .route("/api/feedback", post(feedback_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
