// ── BLE component ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BluetoothConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc: Option<BluetoothRpc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer: Option<BluetoothObserver>,
}

/// RPC-over-BLE service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothRpc {
    pub enable: bool,
}

/// Passive BLE observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothObserver {
    pub enable: bool,
}

/// BLE reports no status properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothStatus {}
