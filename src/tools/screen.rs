//! Screen and display tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_i64, arg_u64, missing};

pub struct ScreenshotTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ScreenshotTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ScreenshotTool {
    fn name(&self) -> &'static str {
        "screenshot"
    }
    fn description(&self) -> &'static str {
        "Capture a screenshot of a display and return where it was stored"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "display": { "type": "integer", "description": "Display id; defaults to the primary display" }
            }
        })
    }
}

#[async_trait]
impl Tool for ScreenshotTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let display = arg_u64(args, "display").unwrap_or(0);
        match self.backend.invoke("screen.capture", json!({"display": display})).await {
            Ok(out) => {
                let location = out
                    .get("path")
                    .or_else(|| out.get("uri"))
                    .and_then(J::as_str)
                    .unwrap_or("(backend returned no location)");
                Ok(ToolResult::text(format!("screenshot of display {display}: {location}")))
            }
            Err(e) => Ok(ToolResult::error(format!("screenshot failed: {e}"))),
        }
    }
}

pub struct ListDisplaysTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ListDisplaysTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ListDisplaysTool {
    fn name(&self) -> &'static str {
        "list_displays"
    }
    fn description(&self) -> &'static str {
        "List connected displays with resolution and primary flag"
    }
    fn input_schema(&self) -> J {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for ListDisplaysTool {
    async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
        match self.backend.display_snapshot().await {
            Ok(snap) if snap.is_empty() => Ok(ToolResult::text("no displays reported")),
            Ok(snap) => {
                let lines: Vec<String> = snap
                    .displays
                    .iter()
                    .map(|d| {
                        format!(
                            "#{} {}x{}{}",
                            d.id,
                            d.width,
                            d.height,
                            if d.primary { " (primary)" } else { "" }
                        )
                    })
                    .collect();
                Ok(ToolResult::text(lines.join("\n")))
            }
            Err(e) => Ok(ToolResult::error(format!("display query failed: {e}"))),
        }
    }
}

pub struct PixelColorTool {
    backend: Arc<dyn AutomationBackend>,
}

impl PixelColorTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for PixelColorTool {
    fn name(&self) -> &'static str {
        "pixel_color"
    }
    fn description(&self) -> &'static str {
        "Read the color of a single screen pixel as a hex string"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "x": { "type": "integer" },
                "y": { "type": "integer" }
            },
            "required": ["x", "y"]
        })
    }
}

#[async_trait]
impl Tool for PixelColorTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        match self.backend.invoke("screen.pixel", json!({"x": x, "y": y})).await {
            Ok(out) => match out.get("color").and_then(J::as_str) {
                Some(color) => Ok(ToolResult::text(format!("pixel at ({x}, {y}) is {color}"))),
                None => Ok(ToolResult::error("backend returned no color")),
            },
            Err(e) => Ok(ToolResult::error(format!("pixel read failed: {e}"))),
        }
    }
}
