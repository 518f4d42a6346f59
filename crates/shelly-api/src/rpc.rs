// JSON-RPC envelopes
//
// Request: `{ id, method, params?, auth? }`
// Response: `{ id, src, error?: { code, message }, result? }`

use serde::{Deserialize, Serialize};

/// Generic request envelope sent on the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Digest response fields. Filled in by the channel when the device
    /// answers with an authentication challenge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthResponse>,
}

impl Request {
    pub fn new(id: u64, method: impl Into<String>) -> Self {
        Self {
            id,
            method: method.into(),
            params: None,
            auth: None,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// Digest-auth response block attached to a request after a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub realm: String,
    pub username: String,
    pub nonce: u64,
    pub cnonce: String,
    pub response: String,
    pub algorithm: String,
}

/// Error object reported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Generic response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub src: String,
    pub error: Option<RpcError>,
    pub result: Option<T>,
}

/// Result body of every `*.SetConfig` style call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    #[serde(default)]
    pub restart_required: bool,
}

/// Per-component outcome of a configuration change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReport {
    /// Identifier of the device that answered.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub src: String,
    pub restart_required: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_absent_params_and_auth() {
        let req = Request::new(7, "Sys.GetConfig");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "id": 7, "method": "Sys.GetConfig" }));
    }

    #[test]
    fn response_with_error_and_no_result() {
        let raw = r#"{"id":1,"src":"shellyplus1-a8032ab12345","error":{"code":-103,"message":"Invalid argument"}}"#;
        let resp: Response<SetResult> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.src, "shellyplus1-a8032ab12345");
        assert!(resp.result.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, -103);
        assert_eq!(err.message, "Invalid argument");
    }

    #[test]
    fn set_result_defaults_restart_flag() {
        let resp: Response<SetResult> =
            serde_json::from_str(r#"{"id":2,"src":"dev","result":{}}"#).unwrap();
        assert_eq!(resp.result, Some(SetResult { restart_required: false }));
    }
}
