// ── Device component set ──
//
// One `Device` per physical unit. Component clients are created on first
// access and cached for the device's lifetime; each owns its own channel
// handle from the shared factory.

use std::sync::{Arc, OnceLock};

use shelly_api::ChannelFactory;
use tracing::debug;

use crate::components::{
    BluetoothClient, CloudClient, EthernetClient, InputClient, LightClient, MqttClient,
    ShellyClient, SwitchClient, SysClient, WebhookClient, WebsocketClient, WifiClient,
};

/// Typed access to every component of a Gen2 device.
pub struct Device {
    factory: Arc<dyn ChannelFactory>,
    shelly: OnceLock<ShellyClient>,
    sys: OnceLock<SysClient>,
    wifi: OnceLock<WifiClient>,
    eth: OnceLock<EthernetClient>,
    ble: OnceLock<BluetoothClient>,
    cloud: OnceLock<CloudClient>,
    mqtt: OnceLock<MqttClient>,
    ws: OnceLock<WebsocketClient>,
    webhook: OnceLock<WebhookClient>,
    switch: OnceLock<SwitchClient>,
    light: OnceLock<LightClient>,
    input: OnceLock<InputClient>,
}

impl Device {
    pub fn new(factory: Arc<dyn ChannelFactory>) -> Self {
        Self {
            factory,
            shelly: OnceLock::new(),
            sys: OnceLock::new(),
            wifi: OnceLock::new(),
            eth: OnceLock::new(),
            ble: OnceLock::new(),
            cloud: OnceLock::new(),
            mqtt: OnceLock::new(),
            ws: OnceLock::new(),
            webhook: OnceLock::new(),
            switch: OnceLock::new(),
            light: OnceLock::new(),
            input: OnceLock::new(),
        }
    }

    fn factory(&self) -> Arc<dyn ChannelFactory> {
        Arc::clone(&self.factory)
    }

    /// Device-level `Shelly` service.
    pub fn shelly(&self) -> &ShellyClient {
        self.shelly.get_or_init(|| ShellyClient::new(self.factory()))
    }

    pub fn sys(&self) -> &SysClient {
        self.sys.get_or_init(|| SysClient::new("Sys", self.factory()))
    }

    pub fn wifi(&self) -> &WifiClient {
        self.wifi.get_or_init(|| WifiClient::new("WiFi", self.factory()))
    }

    pub fn ethernet(&self) -> &EthernetClient {
        self.eth.get_or_init(|| EthernetClient::new("Eth", self.factory()))
    }

    pub fn bluetooth(&self) -> &BluetoothClient {
        self.ble.get_or_init(|| BluetoothClient::new("BLE", self.factory()))
    }

    pub fn cloud(&self) -> &CloudClient {
        self.cloud.get_or_init(|| CloudClient::new("Cloud", self.factory()))
    }

    pub fn mqtt(&self) -> &MqttClient {
        self.mqtt.get_or_init(|| MqttClient::new("MQTT", self.factory()))
    }

    /// Outbound websocket.
    pub fn websocket(&self) -> &WebsocketClient {
        self.ws.get_or_init(|| WebsocketClient::new("Ws", self.factory()))
    }

    pub fn webhook(&self) -> &WebhookClient {
        self.webhook.get_or_init(|| WebhookClient::new(self.factory()))
    }

    pub fn switch(&self) -> &SwitchClient {
        self.switch.get_or_init(|| SwitchClient::new("Switch", self.factory()))
    }

    pub fn light(&self) -> &LightClient {
        self.light.get_or_init(|| LightClient::new("Light", self.factory()))
    }

    pub fn input(&self) -> &InputClient {
        self.input.get_or_init(|| InputClient::new("Input", self.factory()))
    }

    /// Close every component handle opened so far. Components never used
    /// are left alone; closing twice is a no-op.
    pub async fn close(&self) {
        debug!("closing device component handles");
        if let Some(c) = self.shelly.get() {
            c.close().await;
        }
        if let Some(c) = self.sys.get() {
            c.close().await;
        }
        if let Some(c) = self.wifi.get() {
            c.close().await;
        }
        if let Some(c) = self.eth.get() {
            c.close().await;
        }
        if let Some(c) = self.ble.get() {
            c.close().await;
        }
        if let Some(c) = self.cloud.get() {
            c.close().await;
        }
        if let Some(c) = self.mqtt.get() {
            c.close().await;
        }
        if let Some(c) = self.ws.get() {
            c.close().await;
        }
        if let Some(c) = self.webhook.get() {
            c.close().await;
        }
        if let Some(c) = self.switch.get() {
            c.close().await;
        }
        if let Some(c) = self.light.get() {
            c.close().await;
        }
        if let Some(c) = self.input.get() {
            c.close().await;
        }
    }
}
