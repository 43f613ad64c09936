use reqwest::Client;
use serde::Serialize;
use serde_json::Value as J;
use std::time::Instant;

use crate::clients::{AutomationBackend, BackendError};
use crate::domain::DisplaySnapshot;
use crate::infra::config::BackendConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::{make_http_client, make_http_client_with, retry_async};

/// HTTP client for the automaton service, the engine that actually drives
/// the desktop. One POST per command; server errors are retried with backoff.
#[derive(Clone)]
pub struct AutomatonRemote {
    base: String,
    http: Client,
    retries: u32,
}

#[derive(Serialize)]
struct CommandReq<'a> {
    command: &'a str,
    payload: &'a J,
}

impl AutomatonRemote {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into(), http: make_http_client(), retries: 2 }
    }

    pub fn from_config(cfg: &BackendConfig) -> Self {
        let base = cfg.base_url.clone().unwrap_or_default();
        Self { base, http: make_http_client_with(cfg), retries: cfg.retries }
    }

    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base.trim_end_matches('/'));
        let (builder, _rid) = add_standard_headers(self.http.get(url), None);
        match builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post_json(&self, path: &str, command: &str, payload: &J) -> Result<J, BackendError> {
        let url = format!("{}{}", self.base.trim_end_matches('/'), path);
        let http = self.http.clone();
        let req_id = generate_request_id();
        tracing::debug!(endpoint = %url, command, "automaton request");

        let start = Instant::now();
        let body = serde_json::to_value(CommandReq { command, payload })
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let res: Result<J, BackendError> = retry_async(self.retries, move |_| {
            let http = http.clone();
            let url = url.clone();
            let req_id = req_id.clone();
            let body = body.clone();
            async move {
                let (builder, _rid) = add_standard_headers(http.post(url), Some(req_id));
                let resp = builder
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| BackendError::Transport(e.to_string()))?;
                if !resp.status().is_success() {
                    return Err(BackendError::Status(resp.status().as_u16()));
                }
                resp.json::<J>().await.map_err(|e| BackendError::Decode(e.to_string()))
            }
        })
        .await;

        if res.is_err() {
            crate::infra::logging::log_metric(command, "remote_error_total", 1.0);
        }
        let out = res?;
        let elapsed_ms = start.elapsed().as_millis() as f64;
        crate::infra::logging::log_metric(command, "remote_latency_ms", elapsed_ms);
        Ok(out)
    }
}

#[async_trait::async_trait]
impl AutomationBackend for AutomatonRemote {
    async fn invoke(&self, command: &str, payload: J) -> Result<J, BackendError> {
        self.post_json("/api/v1/execute", command, &payload).await
    }

    async fn display_snapshot(&self) -> Result<DisplaySnapshot, BackendError> {
        let v = self.post_json("/api/v1/display", "display.snapshot", &J::Null).await?;
        serde_json::from_value(v).map_err(|e| BackendError::Decode(e.to_string()))
    }
}
