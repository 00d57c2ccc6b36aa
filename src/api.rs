// src/api.rs
use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::metrics::Metrics;

/// Body of the liveness route.
pub const LIVENESS_BODY: &str = "Agent is alive - checking the news every 2 hours";

/// `GET /` liveness, plus `GET /metrics` when a recorder is passed in.
pub fn router(metrics: Option<&Metrics>) -> Router {
    let mut app = Router::new().route("/", get(liveness));
    if let Some(m) = metrics {
        app = app.merge(m.router());
    }
    app.layer(TraceLayer::new_for_http())
}

async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, LIVENESS_BODY)
}
