//! Window-management tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as J};

use crate::clients::AutomationBackend;
use crate::core::content::ToolResult;
use crate::core::tool::{Tool, ToolError, ToolSpec};
use crate::tools::{arg_i64, arg_u64, missing};

fn window_id_schema() -> J {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer", "description": "Window id as returned by list_windows" }
        },
        "required": ["id"]
    })
}

fn describe_window(w: &J) -> String {
    let id = w.get("id").and_then(J::as_u64).unwrap_or(0);
    let title = w.get("title").and_then(J::as_str).unwrap_or("(untitled)");
    let app = w.get("app").and_then(J::as_str).unwrap_or("?");
    format!("#{id} [{app}] {title}")
}

pub struct ListWindowsTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ListWindowsTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ListWindowsTool {
    fn name(&self) -> &'static str {
        "list_windows"
    }
    fn description(&self) -> &'static str {
        "List open windows with id, owning application and title"
    }
    fn input_schema(&self) -> J {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for ListWindowsTool {
    async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
        match self.backend.invoke("window.list", json!({})).await {
            Ok(out) => {
                let windows = out.get("windows").and_then(J::as_array).cloned().unwrap_or_default();
                if windows.is_empty() {
                    return Ok(ToolResult::text("no open windows"));
                }
                let lines: Vec<String> = windows.iter().map(describe_window).collect();
                Ok(ToolResult::text(lines.join("\n")))
            }
            Err(e) => Ok(ToolResult::error(format!("window list failed: {e}"))),
        }
    }
}

pub struct ActiveWindowTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ActiveWindowTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ActiveWindowTool {
    fn name(&self) -> &'static str {
        "active_window"
    }
    fn description(&self) -> &'static str {
        "Describe the currently focused window"
    }
    fn input_schema(&self) -> J {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for ActiveWindowTool {
    async fn call(&self, _args: &J) -> Result<ToolResult, ToolError> {
        match self.backend.invoke("window.active", json!({})).await {
            Ok(out) => match out.get("window") {
                Some(w) if !w.is_null() => Ok(ToolResult::text(describe_window(w))),
                _ => Ok(ToolResult::text("no focused window")),
            },
            Err(e) => Ok(ToolResult::error(format!("active window query failed: {e}"))),
        }
    }
}

// The id-only window operations differ solely in command and wording.
macro_rules! simple_window_tool {
    ($name:ident, $tool_name:literal, $desc:literal, $command:literal, $done:literal, $failed:literal) => {
        pub struct $name {
            backend: Arc<dyn AutomationBackend>,
        }

        impl $name {
            pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
                Self { backend }
            }
        }

        impl ToolSpec for $name {
            fn name(&self) -> &'static str {
                $tool_name
            }
            fn description(&self) -> &'static str {
                $desc
            }
            fn input_schema(&self) -> J {
                window_id_schema()
            }
        }

        #[async_trait]
        impl Tool for $name {
            async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
                let Some(id) = arg_u64(args, "id") else { return Ok(missing("id")) };
                match self.backend.invoke($command, json!({"id": id})).await {
                    Ok(_) => Ok(ToolResult::text(format!(concat!($done, " window #{}"), id))),
                    Err(e) => {
                        Ok(ToolResult::error(format!(concat!($failed, " window #{}: {}"), id, e)))
                    }
                }
            }
        }
    };
}

simple_window_tool!(
    FocusWindowTool,
    "focus_window",
    "Bring a window to the foreground",
    "window.focus",
    "focused",
    "could not focus"
);
simple_window_tool!(
    MinimizeWindowTool,
    "minimize_window",
    "Minimize a window",
    "window.minimize",
    "minimized",
    "could not minimize"
);
simple_window_tool!(
    MaximizeWindowTool,
    "maximize_window",
    "Maximize a window",
    "window.maximize",
    "maximized",
    "could not maximize"
);
simple_window_tool!(
    CloseWindowTool,
    "close_window",
    "Close a window",
    "window.close",
    "closed",
    "could not close"
);

pub struct MoveWindowTool {
    backend: Arc<dyn AutomationBackend>,
}

impl MoveWindowTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for MoveWindowTool {
    fn name(&self) -> &'static str {
        "move_window"
    }
    fn description(&self) -> &'static str {
        "Move a window so its top-left corner lands at the given coordinates"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "x": { "type": "integer" },
                "y": { "type": "integer" }
            },
            "required": ["id", "x", "y"]
        })
    }
}

#[async_trait]
impl Tool for MoveWindowTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(id) = arg_u64(args, "id") else { return Ok(missing("id")) };
        let Some(x) = arg_i64(args, "x") else { return Ok(missing("x")) };
        let Some(y) = arg_i64(args, "y") else { return Ok(missing("y")) };
        match self.backend.invoke("window.move", json!({"id": id, "x": x, "y": y})).await {
            Ok(_) => Ok(ToolResult::text(format!("moved window #{id} to ({x}, {y})"))),
            Err(e) => Ok(ToolResult::error(format!("move failed for window #{id}: {e}"))),
        }
    }
}

pub struct ResizeWindowTool {
    backend: Arc<dyn AutomationBackend>,
}

impl ResizeWindowTool {
    pub fn new(backend: Arc<dyn AutomationBackend>) -> Self {
        Self { backend }
    }
}

impl ToolSpec for ResizeWindowTool {
    fn name(&self) -> &'static str {
        "resize_window"
    }
    fn description(&self) -> &'static str {
        "Resize a window to the given width and height"
    }
    fn input_schema(&self) -> J {
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "width": { "type": "integer", "minimum": 1 },
                "height": { "type": "integer", "minimum": 1 }
            },
            "required": ["id", "width", "height"]
        })
    }
}

#[async_trait]
impl Tool for ResizeWindowTool {
    async fn call(&self, args: &J) -> Result<ToolResult, ToolError> {
        let Some(id) = arg_u64(args, "id") else { return Ok(missing("id")) };
        let Some(width) = arg_u64(args, "width") else { return Ok(missing("width")) };
        let Some(height) = arg_u64(args, "height") else { return Ok(missing("height")) };
        if width == 0 || height == 0 {
            return Ok(ToolResult::error("width and height must be positive"));
        }
        match self
            .backend
            .invoke("window.resize", json!({"id": id, "width": width, "height": height}))
            .await
        {
            Ok(_) => Ok(ToolResult::text(format!("resized window #{id} to {width}x{height}"))),
            Err(e) => Ok(ToolResult::error(format!("resize failed for window #{id}: {e}"))),
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
    async fn list_windows_formats_lines() {
        let backend: Arc<dyn AutomationBackend> = Arc::new(FnBackend::new(|_, _| async {
            Ok(json!({"windows":[
                {"id": 3, "app": "editor", "title": "notes.txt"},
                {"id": 9, "app": "browser", "title": "docs"}
            ]}))
        }));
        let tool = ListWindowsTool::new(backend);
        let out = tool.call(&json!({})).await.unwrap();
        let Content::Text { text } = &out.content[0];
        assert_eq!(text, "#3 [editor] notes.txt\n#9 [browser] docs");
    }

    #[tokio::test]
    async fn focus_window_requires_id() {
        let tool = FocusWindowTool::new(ok_backend());
        let out = tool.call(&json!({})).await.unwrap();
        assert!(out.is_error);
    }

    #[tokio::test]
    async fn resize_rejects_zero_dimensions() {
        let tool = ResizeWindowTool::new(ok_backend());
        let out = tool.call(&json!({"id": 1, "width": 0, "height": 100})).await.unwrap();
        assert!(out.is_error);
    }

    #[tokio::test]
    async fn move_window_formats_target() {
        let tool = MoveWindowTool::new(ok_backend());
        let out = tool.call(&json!({"id": 4, "x": 100, "y": 50})).await.unwrap();
        let Content::Text { text } = &out.content[0];
        assert_eq!(text, "moved window #4 to (100, 50)");
    }
}
