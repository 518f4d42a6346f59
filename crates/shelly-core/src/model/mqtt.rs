// ── MQTT component ──

use serde::{Deserialize, Serialize};

/// Broker connection, topic prefix and notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    /// `host` or `host:port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Write-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    /// `None` for plain TCP, `"user_ca.pem"` or `"ca.pem"` for TLS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_ca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_ntf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ntf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_client_cert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_rpc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_control: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttStatus {
    pub connected: bool,
}
