//! Tool result content model.

use serde::{Deserialize, Serialize};

/// One item of tool output. Only `text` is produced by this server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text { text: String },
}

/// Outcome of a tool invocation. `is_error` marks a business-level failure:
/// the call was dispatched and ran, but the requested operation did not
/// succeed. Protocol-level failures never travel through this type.
///
/// Wire contract: `is_error` is omitted entirely on success, never written
/// as `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<Content>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl ToolResult {
    /// Successful result with a single text item. Content is never empty.
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![Content::Text { text: text.into() }], is_error: false }
    }

    /// Business failure described in human-readable text.
    pub fn error(text: impl Into<String>) -> Self {
        Self { content: vec![Content::Text { text: text.into() }], is_error: true }
    }
}
