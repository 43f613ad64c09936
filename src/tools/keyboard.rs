//! Keyboard tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_str, missing};

pub struct TypeTextTool {
    backend: Arc<dyn AutomationBackend>,
}

impl TypeTextTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for TypeTextTool {
    fn name(&self) -> &'static str {
        "type_text"
    }
    fn description(&self) -> &'static str {
        "Type a string into the focused element"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "Text to type verbatim" }
            },
            "required": ["text"]
        })
    }
}

#[async_trait]
impl Tool for TypeTextTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(text) = arg_str(args, "text") else { return Ok(missing("text")) };
        match self.backend.invoke("keyboard.type", json!({"text": text})).await {
            Ok(_) => Ok(ToolResult::text(format!("typed {} characters", text.chars().count()))),
            Err(e) => Ok(ToolResult::error(format!("typing failed: {e}"))),
        }
    }
}

pub struct PressKeyTool {
    backend: Arc<dyn AutomationBackend>,
}

impl PressKeyTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for PressKeyTool {
    fn name(&self) -> &'static str {
        "press_key"
    }
    fn description(&self) -> &'static str {
        "Press and release a single named key (e.g. enter, escape, tab)"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "key": { "type": "string" }
            },
            "required": ["key"]
        })
    }
}

#[async_trait]
impl Tool for PressKeyTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(key) = arg_str(args, "key") else { return Ok(missing("key")) };
        match self.backend.invoke("keyboard.press", json!({"key": key})).await {
            Ok(_) => Ok(ToolResult::text(format!("pressed {key}"))),
            Err(e) => Ok(ToolResult::error(format!("key press failed: {e}"))),
        }
    }
}

pub struct HotkeyTool {
    backend: Arc<dyn AutomationBackend>,
}

impl HotkeyTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for HotkeyTool {
    fn name(&self) -> &'static str {
        "hotkey"
    }
    fn description(&self) -> &'static str {
        "Press a key combination simultaneously (e.g. [\"ctrl\", \"c\"])"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "keys": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1
                }
            },
            "required": ["keys"]
        })
    }
}

#[async_trait]
impl Tool for HotkeyTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let keys: Vec<&str> = args
            .get("keys")
            .and_then(J::as_array)
            .map(|a| a.iter().filter_map(J::as_str).collect())
            .unwrap_or_default();
        if keys.is_empty() {
            return Ok(ToolResult::error("missing required argument: keys (non-empty string array)"));
        }
        match self.backend.invoke("keyboard.hotkey", json!({"keys": keys})).await {
            Ok(_) => Ok(ToolResult::text(format!("pressed {}", keys.join("+")))),
            Err(e) => Ok(ToolResult::error(format!("hotkey failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::FnBackend;
    use crate::core::content::Content;
    use serde_json::json;

    fn ok_backend() -> Arc<dyn AutomationBackend> {
        Arc::new(FnBackend::new(|_, _| async { Ok(json!({"status":"done"})) }))
    }

    #[tokio::test]
    async fn type_text_counts_characters() {
        let tool = TypeTextTool::new(ok_backend());
        let out = tool.call(&json!({"text": "héllo"})).await.unwrap();
        assert!(!out.is_error);
        let Content::Text { text } = &out.content[0];
        assert_eq!(text, "typed 5 characters");
    }

    #[tokio::test]
    async fn hotkey_rejects_empty_combo() {
        let tool = HotkeyTool::new(ok_backend());
        let out = tool.call(&json!({"keys": []})).await.unwrap();
        assert!(out.is_error);
    }

    #[tokio::test]
    async fn hotkey_joins_keys_in_summary() {
        let tool = HotkeyTool::new(ok_backend());
        let out = tool.call(&json!({"keys": ["ctrl", "shift", "t"]})).await.unwrap();
        let Content::Text { text } = &out.content[0];
        assert_eq!(text, "pressed ctrl+shift+t");
    }
}
