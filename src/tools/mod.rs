//! Tool catalogue: fixed set of desktop-automation tools, grouped by family.

pub mod apps;
pub mod catalog;
pub mod clipboard;
pub mod keyboard;
pub mod pointer;
pub mod registry;
pub mod screen;
pub mod wait;
pub mod window;

use serde_json::Value as J;

use crate::core::content::ToolResult;

// Argument extraction shared by the handlers. A missing or ill-typed
// argument is a business failure (`is_error=true`), not invalid params:
// the envelope was fine, the operation cannot proceed.

pub(crate) fn arg_str<'a>(args: &'a J, key: &str) -> Option<&'a str> {
    args.get(key).and_then(J::as_str)
}

pub(crate) fn arg_i64(args: &J, key: &str) -> Option<i64> {
    args.get(key).and_then(J::as_i64)
}

pub(crate) fn arg_u64(args: &J, key: &str) -> Option<u64> {
    args.get(key).and_then(J::as_u64)
}

pub(crate) fn missing(key: &str) -> ToolResult {
    ToolResult::error(format!("missing required argument: {key}"))
}
