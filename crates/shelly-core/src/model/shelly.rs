// ── Shelly device service ──
//
// Device-wide types: identity, firmware updates, the aggregated status
// document, and the auth slot of a composite config.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    BluetoothStatus, CloudStatus, EthernetStatus, MqttStatus, SysStatus, WebsocketStatus,
    WifiStatus,
};

/// `Shelly.GetDeviceInfo` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub name: Option<String>,
    /// Device id, e.g. `shellyplus1-a8032ab12345`. Doubles as the auth realm.
    pub id: String,
    pub mac: String,
    pub model: String,
    #[serde(rename = "gen")]
    pub generation: u8,
    pub fw_id: String,
    #[serde(rename = "ver")]
    pub version: String,
    pub app: String,
    pub profile: Option<String>,
    #[serde(rename = "auth_en")]
    pub auth_enabled: bool,
    pub auth_domain: Option<String>,
    pub discoverable: Option<bool>,
    pub key: Option<String>,
    pub batch: Option<String>,
    pub fw_sbits: Option<String>,
}

/// `Shelly.ListMethods` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodList {
    pub methods: Vec<String>,
}

/// An available firmware build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareStatus {
    pub version: String,
    pub build_id: Option<String>,
}

/// `Shelly.CheckForUpdate` result. Empty when the device is current.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<FirmwareStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<FirmwareStatus>,
}

impl AvailableUpdates {
    pub fn is_empty(&self) -> bool {
        self.stable.is_none() && self.beta.is_none()
    }
}

/// Parameters of `Shelly.Update`. Set either `stage` or `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// `stable` or `beta`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Parameters of `Shelly.PutUserCA`, `PutTLSClientCert` and `PutTLSClientKey`.
///
/// `data: None` deletes the stored file. Large PEM files are uploaded in
/// chunks with `append` set on all but the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsDataParams {
    pub data: Option<String>,
    #[serde(default)]
    pub append: bool,
}

/// Auth slot of a composite config. Not a device component: it is applied
/// through `Shelly.SetAuth`.
///
/// `pass` may be cleartext or an existing digest. `None` disables
/// authentication on the device.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Defaults to the device id when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    pub pass: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("user", &self.user)
            .field("realm", &self.realm)
            .field("pass", &self.pass.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// `Shelly.GetStatus` result: every component status keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<SysStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi: Option<WifiStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth: Option<EthernetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ble: Option<BluetoothStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt: Option<MqttStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws: Option<WebsocketStatus>,
    /// Indexed and device-specific components (`switch:0`, `input:1`, ...).
    #[serde(flatten)]
    pub components: BTreeMap<String, serde_json::Value>,
}

impl DeviceStatus {
    /// Decode the status of an indexed component, e.g.
    /// `status.component::<SwitchStatus>("switch", 0)`.
    pub fn component<T: DeserializeOwned>(&self, kind: &str, id: u32) -> Option<T> {
        self.components
            .get(&format!("{kind}:{id}"))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::SwitchStatus;

    #[test]
    fn device_info_maps_short_names() {
        let info: DeviceInfo = serde_json::from_value(serde_json::json!({
            "name": null,
            "id": "shellyplus1-a8032ab12345",
            "mac": "A8032AB12345",
            "model": "SNSW-001X16EU",
            "gen": 2,
            "fw_id": "20230913-112003/v1.0.3-g6e6a1ff",
            "ver": "1.0.3",
            "app": "Plus1",
            "auth_en": true,
            "auth_domain": "shellyplus1-a8032ab12345"
        }))
        .unwrap();
        assert_eq!(info.generation, 2);
        assert_eq!(info.version, "1.0.3");
        assert!(info.auth_enabled);
    }

    #[test]
    fn status_exposes_indexed_components() {
        let status: DeviceStatus = serde_json::from_value(serde_json::json!({
            "sys": { "uptime": 10 },
            "switch:0": { "id": 0, "source": "init", "output": false },
            "script:1": { "running": true }
        }))
        .unwrap();
        assert_eq!(status.sys.as_ref().unwrap().uptime, Some(10));
        let sw: SwitchStatus = status.component("switch", 0).unwrap();
        assert!(!sw.output);
        assert!(status.component::<SwitchStatus>("switch", 1).is_none());
    }

    #[test]
    fn auth_debug_hides_password() {
        let auth = AuthConfig {
            user: Some("admin".into()),
            realm: None,
            pass: Some("hunter2".into()),
        };
        let printed = format!("{auth:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("REDACTED"));
    }
}
