//! Clipboard tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_str, missing};

pub struct GetClipboardTool {
    backend: Arc<dyn AutomationBackend>,
}

impl GetClipboardTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for GetClipboardTool {
    fn name(&self) -> &'static str {
        "get_clipboard"
    }
    fn description(&self) -> &'static str {
        "Read the current text contents of the system clipboard"
    }
    fn input_schema(&self) -> J {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for GetClipboardTool {
    async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
        match self.backend.invoke("clipboard.get", json!({})).await {
            Ok(out) => {
                let text = out.get("text").and_then(J::as_str).unwrap_or_default();
                if text.is_empty() {
                    Ok(ToolResult::text("clipboard is empty"))
                } else {
                    Ok(ToolResult::text(text))
                }
            }
            Err(e) => Ok(ToolResult::error(format!("clipboard read failed: {e}"))),
        }
    }
}

pub struct SetClipboardTool {
    backend: Arc<dyn AutomationBackend>,
}

impl SetClipboardTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for SetClipboardTool {
    fn name(&self) -> &'static str {
        "set_clipboard"
    }
    fn description(&self) -> &'static str {
        "Replace the system clipboard contents with the given text"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "text": { "type": "string" }
            },
            "required": ["text"]
        })
    }
}

#[async_trait]
impl Tool for SetClipboardTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(text) = arg_str(args, "text") else { return Ok(missing("text")) };
        match self.backend.invoke("clipboard.set", json!({"text": text})).await {
            Ok(_) => Ok(ToolResult::text(format!("clipboard set ({} characters)", text.chars().count()))),
            Err(e) => Ok(ToolResult::error(format!("clipboard write failed: {e}"))),
        }
    }
}
