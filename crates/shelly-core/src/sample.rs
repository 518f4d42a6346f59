// ── Example composite configuration ──
//
// A filled-in document a user can save, edit and apply. Values are
// placeholders; every slot kind appears once so the shape is obvious.

use crate::composite::{CompositeConfig, Slots};
use crate::model::{
    AuthConfig, BluetoothConfig, BluetoothObserver, BluetoothRpc, CloudConfig, EthernetConfig,
    InputConfig, InputType, LightConfig, LightDefault, MqttConfig, SwitchConfig, SysConfig,
    SysDebug, SysDevice, SysLocation, SysSntp, Toggle, WebsocketConfig, WifiAp, WifiConfig,
    WifiRoam, WifiSta,
};

fn one<T>(value: T) -> Slots<T> {
    let mut slots = Slots::default();
    // Index 0 is always within capacity.
    let _ = slots.insert(0, value);
    slots
}

/// Example document covering every component kind.
pub fn example_config() -> CompositeConfig {
    CompositeConfig {
        sys: Some(SysConfig {
            device: Some(SysDevice {
                name: Some("garage-door".into()),
                discoverable: Some(true),
                eco_mode: Some(false),
                ..SysDevice::default()
            }),
            location: Some(SysLocation {
                tz: Some("America/Denver".into()),
                lat: Some(39.7392),
                lon: Some(-104.9903),
            }),
            debug: Some(SysDebug {
                mqtt: Some(Toggle { enable: false }),
                websocket: Some(Toggle { enable: false }),
                udp: None,
            }),
            sntp: Some(SysSntp {
                server: Some("time.google.com".into()),
            }),
            ..SysConfig::default()
        }),
        ble: Some(BluetoothConfig {
            enable: Some(true),
            rpc: Some(BluetoothRpc { enable: true }),
            observer: Some(BluetoothObserver { enable: false }),
        }),
        cloud: Some(CloudConfig {
            enable: Some(false),
            server: None,
        }),
        mqtt: Some(MqttConfig {
            enable: Some(true),
            server: Some("10.10.10.10:1883".into()),
            topic_prefix: Some("shelly/garage-door".into()),
            rpc_ntf: Some(true),
            status_ntf: Some(true),
            use_client_cert: Some(false),
            enable_control: Some(true),
            ..MqttConfig::default()
        }),
        switch: one(SwitchConfig {
            id: Some(0),
            name: Some("Door relay".into()),
            in_mode: Some("momentary".into()),
            initial_state: Some("off".into()),
            auto_off: Some(true),
            auto_off_delay: Some(1.0),
            ..SwitchConfig::default()
        }),
        light: one(LightConfig {
            id: Some(0),
            name: Some("Porch".into()),
            initial_state: Some("restore_last".into()),
            default: Some(LightDefault { brightness: 60.0 }),
            ..LightConfig::default()
        }),
        input: one(InputConfig {
            id: Some(0),
            name: Some("Door sensor".into()),
            kind: Some(InputType::Switch),
            invert: Some(false),
            factory_reset: Some(true),
            ..InputConfig::default()
        }),
        ws: Some(WebsocketConfig {
            enable: Some(false),
            server: None,
            ssl_ca: Some("ca.pem".into()),
        }),
        auth: Some(AuthConfig {
            user: Some(shelly_api::DEFAULT_USER.into()),
            realm: None,
            pass: Some("change-me".into()),
        }),
        eth: Some(EthernetConfig {
            enable: Some(true),
            ipv4mode: Some("dhcp".into()),
            ..EthernetConfig::default()
        }),
        wifi: Some(WifiConfig {
            ap: Some(WifiAp {
                enable: Some(false),
                ..WifiAp::default()
            }),
            sta: Some(WifiSta {
                ssid: Some("home-network".into()),
                pass: Some("wifi-password".into()),
                enable: Some(true),
                ipv4mode: Some("dhcp".into()),
                ..WifiSta::default()
            }),
            sta1: None,
            roam: Some(WifiRoam {
                rssi_threshold: Some(-80),
                interval: Some(60),
            }),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::slot::dispatch_order;

    #[test]
    fn covers_every_kind() {
        let cfg = example_config();
        let kinds: Vec<_> = cfg.slots().map(|s| s.kind).collect();
        let mut expected: Vec<_> = dispatch_order()
            .filter(|s| s.index.is_none_or(|i| i == 0))
            .map(|s| s.kind)
            .collect();
        expected.dedup();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn survives_yaml_round_trip() {
        let cfg = example_config();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(yaml.contains("switch:0"));
        let back: CompositeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, cfg);
    }
}
