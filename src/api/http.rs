//! HTTP transport: one JSON-RPC message per POST, one synchronous dispatch.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as J;

use crate::api::router::Router;
use crate::infra::metrics::{self, CallOutcome};

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
}

/// `POST /mcp`. Notifications get `202 Accepted` with an empty body;
/// everything else gets the response envelope. Metrics are recorded for
/// `tools/call` only and never alter the response.
pub async fn rpc(State(state): State<AppState>, Json(body): Json<J>) -> Response {
    let started = Instant::now();
    let called_tool = tool_call_name(&body);

    let resp = state.router.dispatch_value(body).await;

    if let Some(tool) = called_tool {
        let outcome = match &resp {
            Some(r) => CallOutcome::classify(r),
            None => CallOutcome::RpcError,
        };
        metrics::record_tool_call(&tool, outcome, started.elapsed());
    }

    match resp {
        Some(r) => Json(r).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn tool_call_name(body: &J) -> Option<String> {
    if body.get("method").and_then(J::as_str) != Some("tools/call") {
        return None;
    }
    let name = body
        .get("params")
        .and_then(|p| p.get("name"))
        .and_then(J::as_str)
        .unwrap_or("unknown");
    Some(name.to_owned())
}
