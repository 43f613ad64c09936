//! JSON-RPC 2.0 envelope shared by both transports.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

// Error codes fixed by the protocol contract.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Inclusive range reserved for server-defined codes.
pub const SERVER_ERROR_RANGE: (i32, i32) = (-32099, -32000);

/// Inbound request or notification. `id` is absent on notifications.
#[derive(Deserialize, Debug)]
pub struct RpcReq {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<J>,
    pub method: String,
    #[serde(default)]
    pub params: J,
}

impl RpcReq {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResp {
    pub jsonrpc: String,
    pub id: J,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp { jsonrpc: "2.0".into(), id, result: Some(result), error: None }
}

pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp {
        jsonrpc: "2.0".into(),
        id,
        result: None,
        error: Some(RpcErr { code, message: msg.into(), data }),
    }
}

/// Response for a body that did not parse as JSON at all; id is unknowable.
pub fn parse_error(msg: impl Into<String>) -> RpcResp {
    err(J::Null, PARSE_ERROR, msg, None)
}
