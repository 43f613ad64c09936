use serde::{Deserialize, Serialize};

/// Best-effort description of the display layout attached to `initialize`.
/// An empty snapshot is valid and is what clients get when the automation
/// backend cannot be reached during session bootstrap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    #[serde(default)]
    pub displays: Vec<DisplayInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub scale: f64,
    #[serde(default)]
    pub primary: bool,
}

impl DisplaySnapshot {
    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}
