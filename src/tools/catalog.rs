//! The fixed tool table. Built once at startup; the registry never changes
//! afterwards. Adding a tool means adding one line here.

use std::sync::Arc;

use crate::clients::AutomationBackend;
use crate::core::tool::Tool;
use crate::tools::registry::ToolRegistry;

use crate::tools::apps::{ListApplicationsTool, OpenApplicationTool, QuitApplicationTool};
use crate::tools::clipboard::{GetClipboardTool, SetClipboardTool};
use crate::tools::keyboard::{HotkeyTool, PressKeyTool, TypeTextTool};
use crate::tools::pointer::{
    ClickTool, DoubleClickTool, DragTool, MoveMouseTool, RightClickTool, ScrollTool,
};
use crate::tools::screen::{ListDisplaysTool, PixelColorTool, ScreenshotTool};
use crate::tools::wait::WaitTool;
use crate::tools::window::{
    ActiveWindowTool, CloseWindowTool, FocusWindowTool, ListWindowsTool, MaximizeWindowTool,
    MinimizeWindowTool, MoveWindowTool, ResizeWindowTool,
};

pub fn build_catalog(backend: Arc<dyn AutomationBackend>) -> ToolRegistry {
    let b = &backend;
    let tools: Vec<Arc<dyn Tool>> = vec![
        // pointer
        Arc::new(ClickTool::new(b.clone())),
        Arc::new(DoubleClickTool::new(b.clone())),
        Arc::new(RightClickTool::new(b.clone())),
        Arc::new(MoveMouseTool::new(b.clone())),
        Arc::new(DragTool::new(b.clone())),
        Arc::new(ScrollTool::new(b.clone())),
        // keyboard
        Arc::new(TypeTextTool::new(b.clone())),
        Arc::new(PressKeyTool::new(b.clone())),
        Arc::new(HotkeyTool::new(b.clone())),
        // clipboard
        Arc::new(GetClipboardTool::new(b.clone())),
        Arc::new(SetClipboardTool::new(b.clone())),
        // screen
        Arc::new(ScreenshotTool::new(b.clone())),
        Arc::new(ListDisplaysTool::new(b.clone())),
        Arc::new(PixelColorTool::new(b.clone())),
        // window
        Arc::new(ListWindowsTool::new(b.clone())),
        Arc::new(ActiveWindowTool::new(b.clone())),
        Arc::new(FocusWindowTool::new(b.clone())),
        Arc::new(MoveWindowTool::new(b.clone())),
        Arc::new(ResizeWindowTool::new(b.clone())),
        Arc::new(MinimizeWindowTool::new(b.clone())),
        Arc::new(MaximizeWindowTool::new(b.clone())),
        Arc::new(CloseWindowTool::new(b.clone())),
        // applications
        Arc::new(OpenApplicationTool::new(b.clone())),
        Arc::new(QuitApplicationTool::new(b.clone())),
        Arc::new(ListApplicationsTool::new(b.clone())),
        // misc
        Arc::new(WaitTool::new(b.clone())),
    ];
    ToolRegistry::with_tools(tools)
}
