//! Mouse tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_i64, arg_str, missing};

fn xy_schema(extra: J) -> J {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "x": { "type": "integer", "description": "Horizontal position in pixels" },
            "y": { "type": "integer", "description": "Vertical position in pixels" }
        },
        "required": ["x", "y"]
    });
    if let (Some(obj), Some(more)) = (
        schema["properties"].as_object_mut(),
        extra.as_object(),
    ) {
        for (k, v) in more {
            obj.insert(k.clone(), v.clone());
        }
    }
    schema
}

pub struct ClickTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ClickTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ClickTool {
    fn name(&self) -> &'static str {
        "click"
    }
    fn description(&self) -> &'static str {
        "Click the mouse at screen coordinates"
    }
    fn input_schema(&self) -> J {
        xy_schema(json!({
            "button": { "type": "string", "enum": ["left", "middle", "right"] }
        }))
    }
}

#[async_trait]
impl Tool for ClickTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        let button = arg_str(args, "button").unwrap_or("left");
        match self
            .backend
            .invoke("pointer.click", json!({"x": x, "y": y, "button": button}))
            .await
        {
            Ok(_) => Ok(ToolResult::text(format!("clicked {button} at ({x}, {y})"))),
            Err(e) => Ok(ToolResult::error(format!("click failed: {e}"))),
        }
    }
}

pub struct DoubleClickTool {
    backend: Arc<dyn AutomationBackend>,
}

impl DoubleClickTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for DoubleClickTool {
    fn name(&self) -> &'static str {
        "double_click"
    }
    fn description(&self) -> &'static str {
        "Double-click the left mouse button at screen coordinates"
    }
    fn input_schema(&self) -> J {
        xy_schema(json!({}))
    }
}

#[async_trait]
impl Tool for DoubleClickTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        match self
            .backend
            .invoke("pointer.double_click", json!({"x": x, "y": y}))
            .await
        {
            Ok(_) => Ok(ToolResult::text(format!("double-clicked at ({x}, {y})"))),
            Err(e) => Ok(ToolResult::error(format!("double click failed: {e}"))),
        }
    }
}

pub struct RightClickTool {
    backend: Arc<dyn AutomationBackend>,
}

impl RightClickTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for RightClickTool {
    fn name(&self) -> &'static str {
        "right_click"
    }
    fn description(&self) -> &'static str {
        "Right-click the mouse at screen coordinates"
    }
    fn input_schema(&self) -> J {
        xy_schema(json!({}))
    }
}

#[async_trait]
impl Tool for RightClickTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        match self
            .backend
            .invoke("pointer.right_click", json!({"x": x, "y": y}))
            .await
        {
            Ok(_) => Ok(ToolResult::text(format!("right-clicked at ({x}, {y})"))),
            Err(e) => Ok(ToolResult::error(format!("right click failed: {e}"))),
        }
    }
}

pub struct MoveMouseTool {
    backend: Arc<dyn AutomationBackend>,
}

impl MoveMouseTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for MoveMouseTool {
    fn name(&self) -> &'static str {
        "move_mouse"
    }
    fn description(&self) -> &'static str {
        "Move the mouse cursor to screen coordinates without clicking"
    }
    fn input_schema(&self) -> J {
        xy_schema(json!({}))
    }
}

#[async_trait]
impl Tool for MoveMouseTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        match self.backend.invoke("pointer.move", json!({"x": x, "y": y})).await {
            Ok(_) => Ok(ToolResult::text(format!("moved cursor to ({x}, {y})"))),
            Err(e) => Ok(ToolResult::error(format!("move failed: {e}"))),
        }
    }
}

pub struct DragTool {
    backend: Arc<dyn AutomationBackend>,
}

impl DragTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for DragTool {
    fn name(&self) -> &'static str {
        "drag"
    }
    fn description(&self) -> &'static str {
        "Press the mouse at a start point and release at an end point"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "from_x": { "type": "integer" },
                "from_y": { "type": "integer" },
                "to_x": { "type": "integer" },
                "to_y": { "type": "integer" },
                "button": { "type": "string", "enum": ["left", "middle", "right"] }
            },
            "required": ["from_x", "from_y", "to_x", "to_y"]
        })
    }
}

#[async_trait]
impl Tool for DragTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(from_x) = arg_i64(args, "from_x") else { return Ok(missing("from_x")) };
        let Some(from_y) = arg_i64(args, "from_y") else { return Ok(missing("from_y")) };
        let Some(to_x) = arg_i64(args, "to_x") else { return Ok(missing("to_x")) };
        let Some(to_y) = arg_i64(args, "to_y") else { return Ok(missing("to_y")) };
        let button = arg_str(args, "button").unwrap_or("left");
        let payload = json!({
            "from": {"x": from_x, "y": from_y},
            "to": {"x": to_x, "y": to_y},
            "button": button
        });
        match self.backend.invoke("pointer.drag", payload).await {
            Ok(_) => Ok(ToolResult::text(format!(
                "dragged from ({from_x}, {from_y}) to ({to_x}, {to_y})"
            ))),
            Err(e) => Ok(ToolResult::error(format!("drag failed: {e}"))),
        }
    }
}

pub struct ScrollTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ScrollTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ScrollTool {
    fn name(&self) -> &'static str {
        "scroll"
    }
    fn description(&self) -> &'static str {
        "Scroll the wheel at the current or given position"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "delta_x": { "type": "integer", "description": "Horizontal scroll amount" },
                "delta_y": { "type": "integer", "description": "Vertical scroll amount; negative scrolls up" },
                "x": { "type": "integer" },
                "y": { "type": "integer" }
            },
            "required": ["delta_y"]
        })
    }
}

#[async_trait]
impl Tool for ScrollTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(delta_y) = arg_i64(args, "delta_y") else { return Ok(missing("delta_y")) };
        let delta_x = arg_i64(args, "delta_x").unwrap_or(0);
        let mut payload = json!({"delta_x": delta_x, "delta_y": delta_y});
        if let (Some(x), Some(y)) = (arg_i64(args, "x"), arg_i64(args, "y")) {
            payload["x"] = json!(x);
            payload["y"] = json!(y);
        }
        match self.backend.invoke("pointer.scroll", payload).await {
            Ok(_) => Ok(ToolResult::text(format!("scrolled by ({delta_x}, {delta_y})"))),
            Err(e) => Ok(ToolResult::error(format!("scroll failed: {e}"))),
        }
    }
}
