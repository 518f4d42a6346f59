// ── Sys component ──

use serde::{Deserialize, Serialize};

use super::shelly::AvailableUpdates;

/// `Sys.GetConfig` / `Sys.SetConfig` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<SysDevice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SysLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<SysDebug>,
    /// Opaque UI settings, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_udp: Option<SysRpcUdp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sntp: Option<SysSntp>,
    /// Read-only on the device; ignored by `SetConfig`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_rev: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addon_type: Option<String>,
    /// Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysDebug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websocket: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<SysUdp>,
}

/// `{ "enable": bool }`, shared by several nested settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysUdp {
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysRpcUdp {
    pub dst_addr: Option<String>,
    pub listen_port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysSntp {
    pub server: Option<String>,
}

/// `Sys.GetStatus` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysStatus {
    pub mac: Option<String>,
    pub restart_required: bool,
    pub time: Option<String>,
    pub unixtime: Option<i64>,
    pub uptime: Option<u64>,
    pub ram_size: Option<u64>,
    pub ram_free: Option<u64>,
    pub fs_size: Option<u64>,
    pub fs_free: Option<u64>,
    pub cfg_rev: Option<u64>,
    pub kvs_rev: Option<u64>,
    pub schedule_rev: Option<u64>,
    pub webhook_rev: Option<u64>,
    pub available_updates: Option<AvailableUpdates>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_omits_unset_fields() {
        let cfg = SysConfig {
            device: Some(SysDevice {
                name: Some("porch".into()),
                ..SysDevice::default()
            }),
            ..SysConfig::default()
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v, serde_json::json!({ "device": { "name": "porch" } }));
    }

    #[test]
    fn status_tolerates_unknown_fields() {
        let status: SysStatus = serde_json::from_value(serde_json::json!({
            "mac": "A8032AB12345",
            "restart_required": true,
            "uptime": 42,
            "reset_reason": 3,
            "available_updates": { "beta": { "version": "1.1.0-beta1" } }
        }))
        .unwrap();
        assert!(status.restart_required);
        assert_eq!(status.uptime, Some(42));
        let beta = status.available_updates.and_then(|u| u.beta).unwrap();
        assert_eq!(beta.version, "1.1.0-beta1");
    }
}
