//! Pause tool. Runs locally; the backend is not involved in waiting.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_u64, missing};

// Upper bound so a bad argument cannot park a handler task for hours.
const MAX_WAIT_MS: u64 = 30_000;

pub struct WaitTool;

impl WaitTool {
    pub fn new(_backend: Arc<dyn AutomationBackend>) -> Self {
        Self
    }
}

impl ToolSpec for WaitTool {
    fn name(&self) -> &'static str {
        "wait"
    }
    fn description(&self) -> &'static str {
        "Pause before the next action, e.g. while the UI settles"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "ms": { "type": "integer", "minimum": 0, "maximum": MAX_WAIT_MS }
            },
            "required": ["ms"]
        })
    }
}

#[async_trait]
impl Tool for WaitTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(ms) = arg_u64(args, "ms") else { return Ok(missing("ms")) };
        if ms > MAX_WAIT_MS {
            return Ok(ToolResult::error(format!("wait capped at {MAX_WAIT_MS} ms, got {ms}")));
        }
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(ToolResult::text(format!("waited {ms} ms")))
    }
}
