//! Static resource catalogue. The set is fixed at build time; `resources/read`
//! serves documentation text, not live state.

use serde_json::{json, Value as J};

const TOOL_GUIDE: &str = "\
Automation tools act on the desktop the backend controls.\n\
Coordinates are absolute screen pixels with the origin at the top-left\n\
of the primary display. Use list_displays for the current layout and\n\
list_windows for window ids before window operations.\n";

const ERROR_GUIDE: &str = "\
A response with an `error` object means the request itself failed\n\
(unknown method or tool, invalid params, internal fault) and retrying\n\
unchanged will not help. A result whose `is_error` flag is true means\n\
the operation ran and failed; the text content explains why, and a\n\
retry or a different approach may succeed.\n";

const ENTRIES: &[(&str, &str, &str)] = &[
    ("guide://tools", "Tool conventions", TOOL_GUIDE),
    ("guide://errors", "Error contract", ERROR_GUIDE),
];

pub fn list() -> J {
    let resources: Vec<J> = ENTRIES
        .iter()
        .map(|(uri, name, _)| {
            json!({
                "uri": uri,
                "name": name,
                "mimeType": "text/plain"
            })
        })
        .collect();
    json!({ "resources": resources })
}

pub fn read(uri: &str) -> Option<J> {
    let (_, _, text) = ENTRIES.iter().find(|(u, _, _)| *u == uri)?;
    Some(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "text/plain",
            "text": text
        }]
    }))
}
