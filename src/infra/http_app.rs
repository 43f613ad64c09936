use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router as AxumRouter;

use crate::api::http::AppState;
use crate::api::router::Router;

/// `/healthz` for probes, `/mcp` for the JSON-RPC transport.
pub fn build_app(router: Arc<Router>) -> AxumRouter {
    AxumRouter::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/mcp", post(crate::api::http::rpc))
        .with_state(AppState { router })
}
