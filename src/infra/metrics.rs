//! Per-call outcome classification and the metrics-recorder boundary.

use std::time::Duration;

use crate::core::rpc::RpcResp;

/// Ternary classification of a `tools/call`: the handler succeeded, the
/// handler ran but reported a business failure, or the call failed at the
/// protocol level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Ok,
    ToolError,
    RpcError,
}

impl CallOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CallOutcome::Ok => "ok",
            CallOutcome::ToolError => "tool_error",
            CallOutcome::RpcError => "error",
        }
    }

    /// Derive the outcome from a finished response envelope.
    pub fn classify(resp: &RpcResp) -> Self {
        if resp.error.is_some() {
            return CallOutcome::RpcError;
        }
        let is_error = resp
            .result
            .as_ref()
            .and_then(|r| r.get("is_error"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if is_error {
            CallOutcome::ToolError
        } else {
            CallOutcome::Ok
        }
    }
}

/// Fire-and-forget: feeds whatever recorder the host process installed.
/// Without an installed recorder these are no-ops.
pub fn record_tool_call(tool: &str, outcome: CallOutcome, elapsed: Duration) {
    metrics::counter!(
        "gateway_tool_calls_total",
        "tool" => tool.to_owned(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!("gateway_tool_call_duration_seconds", "tool" => tool.to_owned())
        .record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rpc;
    use serde_json::json;

    #[test]
    fn error_envelope_classifies_as_rpc_error() {
        let resp = rpc::err(json!(1), rpc::METHOD_NOT_FOUND, "nope", None);
        assert_eq!(CallOutcome::classify(&resp), CallOutcome::RpcError);
    }

    #[test]
    fn is_error_result_classifies_as_tool_error() {
        let resp = rpc::ok(
            json!(1),
            json!({"content":[{"type":"text","text":"failed"}],"is_error":true}),
        );
        assert_eq!(CallOutcome::classify(&resp), CallOutcome::ToolError);
    }

    #[test]
    fn plain_result_classifies_as_ok() {
        let resp = rpc::ok(json!(1), json!({"content":[{"type":"text","text":"done"}]}));
        assert_eq!(CallOutcome::classify(&resp), CallOutcome::Ok);
    }

    #[test]
    fn recording_without_a_recorder_is_a_noop() {
        record_tool_call("click", CallOutcome::Ok, Duration::from_millis(3));
    }
}
