use async_trait::async_trait;
use serde_json::Value as J;
use thiserror::Error;

use crate::core::content::ToolResult;

/// Unexpected fault inside a tool handler. Anticipated failures (bad
/// arguments, backend refusals) are reported as `ToolResult::error` instead;
/// an `Err` here surfaces to the client as a protocol-level internal error.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Internal(String),
}

/// One parsed `tools/call` invocation.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub name: String,
    pub arguments: J,
}

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> J;
}

/// A named, schema-described, remotely invokable operation.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(&self, arguments: &J) -> Result<ToolResult, ToolError>;
}
