// ── Typed component clients ──
//
// Thin wrappers over `shelly_api::ComponentClient` that fix each
// component's parameter and result types. One client per component,
// each owning its own lazily opened channel handle.

pub mod indexed;
pub mod shelly;
pub mod single;
pub mod webhook;

pub use indexed::{IndexedClient, InputClient, LightClient, LightSet, SwitchClient};
pub use shelly::ShellyClient;
pub use single::{
    BluetoothClient, CloudClient, ConfigClient, EthernetClient, MqttClient, SysClient,
    WebsocketClient, WifiClient,
};
pub use webhook::WebhookClient;
