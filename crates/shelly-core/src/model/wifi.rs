// ── WiFi component ──

use serde::{Deserialize, Serialize};

/// `WiFi.GetConfig` / `WiFi.SetConfig` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap: Option<WifiAp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sta: Option<WifiSta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sta1: Option<WifiSta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roam: Option<WifiRoam>,
}

/// Access point settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiAp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    /// Write-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_extender: Option<WifiRangeExtender>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiRangeExtender {
    pub enable: bool,
}

/// Station (client) settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiSta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    /// Write-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    /// `dhcp` or `static`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(rename = "gw", skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiRoam {
    #[serde(rename = "rssi_thr", skip_serializing_if = "Option::is_none")]
    pub rssi_threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

/// Connection state reported by `WiFi.GetStatus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
    #[serde(rename = "got ip")]
    GotIp,
    #[default]
    #[serde(other)]
    Unknown,
}

/// `WiFi.GetStatus` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiStatus {
    pub sta_ip: Option<String>,
    pub status: WifiState,
    pub ssid: Option<String>,
    pub rssi: Option<i32>,
    pub ap_client_count: Option<u32>,
}

/// One network found by `WiFi.Scan`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiNetwork {
    pub ssid: Option<String>,
    pub bssid: String,
    pub auth: Option<u8>,
    pub channel: Option<u8>,
    pub rssi: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiScan {
    pub results: Vec<WifiNetwork>,
}

/// One client attached to the device's access point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApClient {
    pub mac: String,
    pub ip: String,
    pub ip_static: bool,
    pub mport: u16,
    pub since: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApClientList {
    pub ts: Option<i64>,
    pub ap_clients: Vec<ApClient>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_got_ip() {
        let s: WifiStatus = serde_json::from_value(serde_json::json!({
            "sta_ip": "192.168.1.20",
            "status": "got ip",
            "ssid": "home",
            "rssi": -61
        }))
        .unwrap();
        assert_eq!(s.status, WifiState::GotIp);
        assert_eq!(s.rssi, Some(-61));
    }

    #[test]
    fn unknown_state_is_tolerated() {
        let s: WifiStatus =
            serde_json::from_value(serde_json::json!({ "status": "rebooting" })).unwrap();
        assert_eq!(s.status, WifiState::Unknown);
    }

    #[test]
    fn gateway_uses_wire_name() {
        let sta = WifiSta {
            gateway: Some("10.0.0.1".into()),
            ..WifiSta::default()
        };
        assert_eq!(
            serde_json::to_value(&sta).unwrap(),
            serde_json::json!({ "gw": "10.0.0.1" })
        );
    }
}
