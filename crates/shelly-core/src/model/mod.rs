// ── Device data model ──
//
// Config and status shapes for every component a Gen2 device exposes.
// Config types are partial documents: a field left as `None` is omitted
// from `SetConfig` and the device keeps its current value.

pub mod bluetooth;
pub mod cloud;
pub mod ethernet;
pub mod input;
pub mod light;
pub mod mqtt;
pub mod shelly;
pub mod switch;
pub mod system;
pub mod webhook;
pub mod websocket;
pub mod wifi;

// ── Re-exports ──────────────────────────────────────────────────────

pub use bluetooth::{BluetoothConfig, BluetoothObserver, BluetoothRpc, BluetoothStatus};
pub use cloud::{CloudConfig, CloudStatus};
pub use ethernet::{EthernetConfig, EthernetStatus};
pub use input::{InputConfig, InputStatus, InputType};
pub use light::{LightConfig, LightDefault, LightNightMode, LightStatus};
pub use mqtt::{MqttConfig, MqttStatus};
pub use shelly::{
    AuthConfig, AvailableUpdates, DeviceInfo, DeviceStatus, FirmwareStatus, MethodList,
    TlsDataParams, UpdateParams,
};
pub use switch::{ActiveEnergy, SwitchConfig, SwitchStatus, SwitchToggle, Temperature};
pub use system::{
    SysDebug, SysDevice, SysLocation, SysRpcUdp, SysSntp, SysUdp, SysConfig, SysStatus, Toggle,
};
pub use webhook::{
    EventAttr, Hook, HookList, HookParams, HookRevision, SupportedEvent, SupportedEvents,
};
pub use websocket::{WebsocketConfig, WebsocketStatus};
pub use wifi::{
    ApClient, ApClientList, WifiAp, WifiConfig, WifiNetwork, WifiRangeExtender, WifiRoam,
    WifiScan, WifiSta, WifiState, WifiStatus,
};

/// Marker for repeatable components whose config embeds its instance id.
pub trait Indexed {
    fn id(&self) -> Option<u32>;
}
