//! Application lifecycle tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_str, missing};

pub struct OpenApplicationTool {
    backend: Arc<dyn AutomationBackend>,
}

impl OpenApplicationTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for OpenApplicationTool {
    fn name(&self) -> &'static str {
        "open_application"
    }
    fn description(&self) -> &'static str {
        "Launch an application by name, or focus it if already running"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        })
    }
}

#[async_trait]
impl Tool for OpenApplicationTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(name) = arg_str(args, "name") else { return Ok(missing("name")) };
        match self.backend.invoke("apps.open", json!({"name": name})).await {
            Ok(_) => Ok(ToolResult::text(format!("opened {name}"))),
            Err(e) => Ok(ToolResult::error(format!("could not open {name}: {e}"))),
        }
    }
}

pub struct QuitApplicationTool {
    backend: Arc<dyn AutomationBackend>,
}

impl QuitApplicationTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for QuitApplicationTool {
    fn name(&self) -> &'static str {
        "quit_application"
    }
    fn description(&self) -> &'static str {
        "Ask an application to quit gracefully"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        })
    }
}

#[async_trait]
impl Tool for QuitApplicationTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(name) = arg_str(args, "name") else { return Ok(missing("name")) };
        match self.backend.invoke("apps.quit", json!({"name": name})).await {
            Ok(_) => Ok(ToolResult::text(format!("asked {name} to quit"))),
            Err(e) => Ok(ToolResult::error(format!("could not quit {name}: {e}"))),
        }
    }
}

pub struct ListApplicationsTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ListApplicationsTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ListApplicationsTool {
    fn name(&self) -> &'static str {
        "list_applications"
    }
    fn description(&self) -> &'static str {
        "List running applications"
    }
    fn input_schema(&self) -> J {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for ListApplicationsTool {
    async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
        match self.backend.invoke("apps.list", json!({})).await {
            Ok(out) => {
                let names: Vec<&str> = out
                    .get("applications")
                    .and_then(J::as_array)
                    .map(|a| a.iter().filter_map(J::as_str).collect())
                    .unwrap_or_default();
                if names.is_empty() {
                    Ok(ToolResult::text("no running applications reported"))
                } else {
                    Ok(ToolResult::text(names.join("\n")))
                }
            }
            Err(e) => Ok(ToolResult::error(format!("application list failed: {e}"))),
        }
    }
}
