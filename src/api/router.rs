//! Transport-independent JSON-RPC method dispatch.
//!
//! Both transports funnel every inbound message through [`Router::dispatch`].
//! The method set is closed and part of the protocol contract, hence the flat
//! match rather than anything pluggable. Each message is handled
//! independently; there is no per-connection state at this layer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value as J};

use crate::api::{prompts, resources};
use crate::clients::AutomationBackend;
use crate::core::rpc::{self, RpcReq, RpcResp};
use crate::core::tool::ToolCall;
use crate::infra::audit::{AuditEntry, AuditLog};
use crate::infra::lifecycle::Lifecycle;
use crate::infra::metrics::CallOutcome;
use crate::tools::registry::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Per-method outcome before envelope assembly: a result value, or a
/// protocol error (code, message).
type MethodResult = Result<J, (i32, String)>;

pub struct Router {
    registry: ToolRegistry,
    backend: Arc<dyn AutomationBackend>,
    audit: Arc<dyn AuditLog>,
    lifecycle: Arc<Lifecycle>,
    shutdown_grace: Duration,
}

impl Router {
    pub fn new(
        registry: ToolRegistry,
        backend: Arc<dyn AutomationBackend>,
        audit: Arc<dyn AuditLog>,
        lifecycle: Arc<Lifecycle>,
        shutdown_grace: Duration,
    ) -> Self {
        Self { registry, backend, audit, lifecycle, shutdown_grace }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Stream-transport entry point: one raw line in, at most one response out.
    pub async fn handle_raw(&self, raw: &str) -> Option<RpcResp> {
        match serde_json::from_str::<J>(raw) {
            Ok(v) => self.dispatch_value(v).await,
            Err(e) => Some(rpc::parse_error(format!("parse error: {e}"))),
        }
    }

    /// Envelope rules over already-parsed JSON. Responses addressed to us are
    /// dropped; request-shaped values go to [`Router::dispatch`].
    pub async fn dispatch_value(&self, v: J) -> Option<RpcResp> {
        if v.get("method").is_none() {
            if v.get("result").is_some() || v.get("error").is_some() {
                // A response envelope; servers do not answer those.
                return None;
            }
            let id = v.get("id").cloned()?;
            return Some(rpc::err(id, rpc::INVALID_REQUEST, "invalid request: no method", None));
        }
        let id = v.get("id").cloned();
        match serde_json::from_value::<RpcReq>(v) {
            Ok(req) => self.dispatch(req).await,
            Err(e) => {
                let id = id?;
                Some(rpc::err(id, rpc::INVALID_REQUEST, format!("invalid request: {e}"), None))
            }
        }
    }

    /// Method dispatch. Returns `None` exactly when no message must be sent:
    /// for notifications (no id), and for `exit`.
    pub async fn dispatch(&self, req: RpcReq) -> Option<RpcResp> {
        tracing::debug!(method = %req.method, id = ?req.id, "dispatch");
        let res = match req.method.as_str() {
            "initialize" => self.initialize().await,
            // Acknowledgment only; MUST NOT produce a message.
            "notifications/initialized" => return None,
            "shutdown" => {
                self.lifecycle.schedule_shutdown(self.shutdown_grace);
                Ok(json!({}))
            }
            "exit" => {
                self.lifecycle.schedule_shutdown(Duration::ZERO);
                return None;
            }
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tools_call(&req.params).await,
            "resources/list" => Ok(resources::list()),
            "resources/read" => self.resources_read(&req.params),
            "prompts/list" => Ok(prompts::list()),
            "prompts/get" => self.prompts_get(&req.params),
            other => {
                Err((rpc::METHOD_NOT_FOUND, format!("unknown method: {other}")))
            }
        };
        finish(req.id, res)
    }

    async fn initialize(&self) -> MethodResult {
        // Best-effort grounding snapshot; a dead backend must not fail bootstrap.
        let display = match self.backend.display_snapshot().await {
            Ok(snap) => serde_json::to_value(snap).unwrap_or_else(|_| json!({})),
            Err(e) => {
                tracing::warn!(error = %e, "display snapshot unavailable, continuing without");
                json!({})
            }
        };
        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            },
            "display": display
        }))
    }

    fn tools_list(&self) -> J {
        let tools: Vec<J> = self
            .registry
            .list()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn tools_call(&self, params: &J) -> MethodResult {
        let call = parse_tool_call(params)?;
        let Some(tool) = self.registry.lookup(&call.name) else {
            return Err((rpc::METHOD_NOT_FOUND, format!("unknown tool: {}", call.name)));
        };

        let started = Instant::now();
        let outcome = tool.call(&call.arguments).await;
        let elapsed = started.elapsed();

        match outcome {
            Ok(result) => {
                let class =
                    if result.is_error { CallOutcome::ToolError } else { CallOutcome::Ok };
                self.audit.record(AuditEntry {
                    tool: call.name.clone(),
                    arguments: call.arguments.clone(),
                    outcome: class,
                    duration: elapsed,
                });
                serde_json::to_value(result)
                    .map_err(|e| (rpc::INTERNAL_ERROR, e.to_string()))
            }
            // Handlers catch anticipated failures themselves; an Err here is
            // an unexpected fault and surfaces as an internal error.
            Err(e) => {
                self.audit.record(AuditEntry {
                    tool: call.name.clone(),
                    arguments: call.arguments.clone(),
                    outcome: CallOutcome::RpcError,
                    duration: elapsed,
                });
                tracing::error!(tool = %call.name, error = %e, "tool handler fault");
                Err((rpc::INTERNAL_ERROR, format!("tool {}: {e}", call.name)))
            }
        }
    }

    fn resources_read(&self, params: &J) -> MethodResult {
        let uri = params
            .get("uri")
            .and_then(J::as_str)
            .ok_or_else(|| (rpc::INVALID_PARAMS, "missing resource uri".to_string()))?;
        resources::read(uri)
            .ok_or_else(|| (rpc::INVALID_PARAMS, format!("unknown resource: {uri}")))
    }

    fn prompts_get(&self, params: &J) -> MethodResult {
        let name = params
            .get("name")
            .and_then(J::as_str)
            .ok_or_else(|| (rpc::INVALID_PARAMS, "missing prompt name".to_string()))?;
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        prompts::get(name, &args)
            .ok_or_else(|| (rpc::INVALID_PARAMS, format!("unknown prompt: {name}")))
    }
}

fn parse_tool_call(params: &J) -> Result<ToolCall, (i32, String)> {
    let name = params
        .get("name")
        .and_then(J::as_str)
        .ok_or_else(|| (rpc::INVALID_PARAMS, "missing tool name".to_string()))?;
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    Ok(ToolCall { name: name.to_owned(), arguments })
}

/// Assemble the response envelope; notifications never get one.
fn finish(id: Option<J>, res: MethodResult) -> Option<RpcResp> {
    let id = id?;
    Some(match res {
        Ok(result) => rpc::ok(id, result),
        Err((code, msg)) => rpc::err(id, code, msg, None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{BackendError, FnBackend};
    use crate::infra::audit::NullAuditLog;
    use crate::tools::catalog::build_catalog;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn router_with(backend: Arc<dyn AutomationBackend>) -> Router {
        let audit: Arc<dyn AuditLog> = Arc::new(NullAuditLog);
        let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
        Router::new(
            build_catalog(backend.clone()),
            backend,
            audit,
            lifecycle,
            Duration::from_millis(200),
        )
    }

    fn ok_router() -> Router {
        router_with(Arc::new(FnBackend::new(|cmd, _| async move {
            if cmd == "display.snapshot" {
                Ok(json!({"displays":[{"id":0,"width":1920,"height":1080,"primary":true}]}))
            } else {
                Ok(json!({"status":"done"}))
            }
        })))
    }

    fn down_router() -> Router {
        router_with(Arc::new(FnBackend::new(|_, _| async {
            Err(BackendError::Transport("connection refused".into()))
        })))
    }

    async fn req(router: &Router, raw: &str) -> Option<RpcResp> {
        router.handle_raw(raw).await
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let resp = req(&ok_router(), r#"{"jsonrpc":"2.0","id":4,"method":"nope"}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, rpc::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_tool_is_method_not_found_not_internal() {
        let resp = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"no_such_tool","arguments":{}}}"#,
        )
        .await
        .unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, rpc::METHOD_NOT_FOUND);
        assert_ne!(err.code, rpc::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn malformed_call_params_echo_id_with_invalid_params() {
        let resp = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","id":17,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await
        .unwrap();
        assert_eq!(resp.id, json!(17));
        assert_eq!(resp.error.unwrap().code, rpc::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn initialized_notification_never_answers() {
        let none = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","method":"notifications/initialized","params":{}}"#,
        )
        .await;
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn tools_list_is_complete_and_duplicate_free() {
        let router = ok_router();
        let resp = req(&router, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), router.registry().len());
        let names: BTreeSet<&str> =
            tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names.len(), tools.len());
        let clip = tools.iter().find(|t| t["name"] == "get_clipboard").expect("get_clipboard");
        assert!(!clip["description"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn tools_list_twice_yields_same_name_set() {
        let router = ok_router();
        let mut sets = Vec::new();
        for id in [1, 2] {
            let resp = req(&router, &format!(r#"{{"jsonrpc":"2.0","id":{id},"method":"tools/list"}}"#))
                .await
                .unwrap();
            let names: BTreeSet<String> = resp.result.unwrap()["tools"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t["name"].as_str().unwrap().to_owned())
                .collect();
            sets.push(names);
        }
        assert_eq!(sets[0], sets[1]);
    }

    #[tokio::test]
    async fn successful_call_omits_is_error() {
        let resp = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"click","arguments":{"x":1,"y":2}}}"#,
        )
        .await
        .unwrap();
        let result = resp.result.unwrap();
        assert!(result.get("is_error").is_none());
        assert!(!result["content"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn business_failure_sets_is_error_true() {
        let resp = req(
            &down_router(),
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"click","arguments":{"x":1,"y":2}}}"#,
        )
        .await
        .unwrap();
        assert!(resp.error.is_none(), "backend refusal is not a protocol error");
        let result = resp.result.unwrap();
        assert_eq!(result["is_error"], true);
    }

    #[tokio::test]
    async fn initialize_degrades_to_empty_snapshot_when_backend_is_down() {
        let resp = req(&down_router(), r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["display"], json!({}));
        assert!(result["serverInfo"]["name"].as_str().unwrap().contains("gateway"));
    }

    #[tokio::test]
    async fn initialize_embeds_snapshot_when_available() {
        let resp = req(&ok_router(), r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["display"]["displays"][0]["width"], 1920);
    }

    #[tokio::test]
    async fn unknown_prompt_is_invalid_params_not_internal() {
        let resp = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","id":9,"method":"prompts/get","params":{"name":"does_not_exist"}}"#,
        )
        .await
        .unwrap();
        assert_eq!(resp.error.unwrap().code, rpc::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_resource_is_invalid_params() {
        let resp = req(
            &ok_router(),
            r#"{"jsonrpc":"2.0","id":9,"method":"resources/read","params":{"uri":"guide://missing"}}"#,
        )
        .await
        .unwrap();
        assert_eq!(resp.error.unwrap().code, rpc::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn resources_roundtrip_through_router() {
        let router = ok_router();
        let resp = req(&router, r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#)
            .await
            .unwrap();
        let uri = resp.result.unwrap()["resources"][0]["uri"].as_str().unwrap().to_owned();
        let resp = req(
            &router,
            &format!(r#"{{"jsonrpc":"2.0","id":2,"method":"resources/read","params":{{"uri":"{uri}"}}}}"#),
        )
        .await
        .unwrap();
        assert!(resp.result.unwrap()["contents"][0]["text"].is_string());
    }

    #[tokio::test]
    async fn parse_error_on_garbage_line() {
        let resp = req(&ok_router(), "{ not json").await.unwrap();
        assert_eq!(resp.error.unwrap().code, rpc::PARSE_ERROR);
        assert_eq!(resp.id, J::Null);
    }

    #[tokio::test]
    async fn response_envelopes_are_ignored() {
        let none = req(&ok_router(), r#"{"jsonrpc":"2.0","id":1,"result":{}}"#).await;
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn handler_fault_surfaces_as_internal_error() {
        use crate::core::content::ToolResult;
        use crate::core::tool::{Tool, ToolError, ToolSpec};
        use async_trait::async_trait;

        struct FaultyTool;

        impl ToolSpec for FaultyTool {
            fn name(&self) -> &'static str {
                "faulty"
            }
            fn description(&self) -> &'static str {
                "always faults"
            }
            fn input_schema(&self) -> J {
                json!({"type":"object"})
            }
        }

        #[async_trait]
        impl Tool for FaultyTool {
            async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
                Err(ToolError::Internal("state invariant violated".into()))
            }
        }

        let backend: Arc<dyn AutomationBackend> = Arc::new(FnBackend::unconfigured());
        let audit: Arc<dyn AuditLog> = Arc::new(NullAuditLog);
        let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
        let registry = crate::tools::registry::ToolRegistry::with_tools([
            Arc::new(FaultyTool) as Arc<dyn crate::core::tool::Tool>,
        ]);
        let router =
            Router::new(registry, backend, audit, lifecycle, Duration::from_millis(200));

        let resp = router
            .handle_raw(r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"faulty","arguments":{}}}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, rpc::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn audit_log_sees_every_dispatched_call() {
        use std::sync::Mutex;

        #[derive(Default)]
        struct RecordingAudit(Mutex<Vec<(String, CallOutcome)>>);

        impl AuditLog for RecordingAudit {
            fn record(&self, entry: AuditEntry) {
                self.0.lock().unwrap().push((entry.tool, entry.outcome));
            }
        }

        let backend: Arc<dyn AutomationBackend> = Arc::new(FnBackend::new(|cmd, _| async move {
            if cmd == "pointer.click" {
                Ok(json!({"status":"done"}))
            } else {
                Err(BackendError::Transport("down".into()))
            }
        }));
        let audit = Arc::new(RecordingAudit::default());
        let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
        let router = Router::new(
            build_catalog(backend.clone()),
            backend,
            audit.clone(),
            lifecycle,
            Duration::from_millis(200),
        );

        router
            .handle_raw(r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"click","arguments":{"x":1,"y":1}}}"#)
            .await
            .unwrap();
        router
            .handle_raw(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"press_key","arguments":{"key":"a"}}}"#)
            .await
            .unwrap();
        // An unknown tool never reaches a handler, so nothing is audited.
        router
            .handle_raw(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"ghost","arguments":{}}}"#)
            .await
            .unwrap();

        let entries = audit.0.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("click".to_string(), CallOutcome::Ok));
        assert_eq!(entries[1], ("press_key".to_string(), CallOutcome::ToolError));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_answers_before_teardown_begins() {
        let backend: Arc<dyn AutomationBackend> = Arc::new(FnBackend::unconfigured());
        let audit: Arc<dyn AuditLog> = Arc::new(NullAuditLog);
        let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
        let router = Router::new(
            build_catalog(backend.clone()),
            backend,
            audit,
            lifecycle.clone(),
            Duration::from_millis(200),
        );

        let resp = router
            .handle_raw(r#"{"jsonrpc":"2.0","id":1,"method":"shutdown"}"#)
            .await
            .unwrap();
        assert_eq!(resp.result.unwrap(), json!({}));
        // The response is in hand and the grace delay has not elapsed yet.
        assert!(!lifecycle.is_shut_down());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(lifecycle.is_shut_down());
    }

    #[tokio::test]
    async fn exit_answers_nothing_and_tears_down() {
        let backend: Arc<dyn AutomationBackend> = Arc::new(FnBackend::unconfigured());
        let audit: Arc<dyn AuditLog> = Arc::new(NullAuditLog);
        let lifecycle = Lifecycle::new(audit.clone(), backend.clone());
        let router = Router::new(
            build_catalog(backend.clone()),
            backend,
            audit,
            lifecycle.clone(),
            Duration::from_millis(200),
        );

        let none = router.handle_raw(r#"{"jsonrpc":"2.0","id":1,"method":"exit"}"#).await;
        assert!(none.is_none());

        // Immediate teardown, no grace delay.
        tokio::time::timeout(Duration::from_secs(1), lifecycle.cancellation_token().cancelled())
            .await
            .expect("exit must cancel promptly");
    }
}
