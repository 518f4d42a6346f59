#![allow(clippy::unwrap_used)]
// Integration tests for the typed component clients.

use pretty_assertions::assert_eq;
use serde_json::json;
use shelly_api::AuthParams;
use shelly_api::auth::ha1;
use shelly_api::fakes::{Script, ScriptedChannel};
use shelly_core::components::LightSet;
use shelly_core::model::{HookParams, InputType, WifiState};
use shelly_core::{CancellationToken, CoreError, Device, ErrorKind, SlotKind};
use tokio_test::{assert_err, assert_ok};

const DEVICE_ID: &str = "shellyplus1-a8032ab12345";

// ── Helpers ─────────────────────────────────────────────────────────

fn setup() -> (ScriptedChannel, Device, CancellationToken) {
    let channel = ScriptedChannel::new(DEVICE_ID);
    let device = Device::new(channel.factory());
    (channel, device, CancellationToken::new())
}

fn hook(event: &str) -> HookParams {
    HookParams {
        cid: Some(0),
        event: Some(event.into()),
        enable: Some(true),
        urls: Some(vec!["http://10.0.0.5/hook".into()]),
        ..HookParams::default()
    }
}

// ── Shelly service ──────────────────────────────────────────────────

#[tokio::test]
async fn device_info_decodes_renamed_fields() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.GetDeviceInfo",
        Script::Result(json!({
            "id": DEVICE_ID,
            "mac": "A8032AB12345",
            "model": "SNSW-001X16EU",
            "gen": 2,
            "fw_id": "20230913-112003/v1.14.0-gcb84623",
            "ver": "1.14.0",
            "app": "Plus1",
            "auth_en": true,
            "auth_domain": DEVICE_ID,
        })),
    );

    let info = device.shelly().get_device_info(&cancel).await.unwrap();

    assert_eq!(info.id, DEVICE_ID);
    assert_eq!(info.generation, 2);
    assert_eq!(info.version, "1.14.0");
    assert!(info.auth_enabled);
}

#[tokio::test]
async fn device_identity_requests_ident() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.GetDeviceInfo",
        Script::Result(json!({ "id": DEVICE_ID, "key": "k", "batch": "2301" })),
    );

    let info = device.shelly().get_device_identity(&cancel).await.unwrap();

    assert_eq!(info.batch.as_deref(), Some("2301"));
    assert_eq!(channel.calls()[0].params, Some(json!({ "ident": true })));
}

#[tokio::test]
async fn device_config_keeps_known_components() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.GetConfig",
        Script::Result(json!({
            "sys": { "device": { "name": "garage" } },
            "switch:0": { "id": 0, "name": "relay", "in_mode": "follow" },
            "input:0": { "id": 0, "type": "switch" },
            "script:1": { "id": 1, "enable": true },
            "wifi": { "sta": { "ssid": "home" } },
        })),
    );

    let config = device.shelly().get_config(&cancel).await.unwrap();

    let kinds: Vec<_> = config.slots().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SlotKind::Sys, SlotKind::Switch, SlotKind::Input, SlotKind::Wifi]
    );
    assert_eq!(config.input.get(0).unwrap().kind, Some(InputType::Switch));
}

#[tokio::test]
async fn list_methods_unwraps_the_list() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.ListMethods",
        Script::Result(json!({ "methods": ["Shelly.Reboot", "Switch.Set"] })),
    );

    let methods = device.shelly().list_methods(&cancel).await.unwrap();

    assert_eq!(methods, vec!["Shelly.Reboot", "Switch.Set"]);
}

#[tokio::test]
async fn set_auth_fills_user_and_keeps_digest() {
    let (channel, device, cancel) = setup();
    let digest = ha1("admin", DEVICE_ID, "secret");

    let report = device
        .shelly()
        .set_auth(
            &cancel,
            AuthParams {
                user: Some(String::new()),
                realm: Some(DEVICE_ID.into()),
                ha1: Some(digest.clone()),
            },
        )
        .await
        .unwrap();

    assert!(!report.restart_required);
    assert_eq!(report.src, DEVICE_ID);
    assert_eq!(
        channel.calls()[0].params,
        Some(json!({ "user": "admin", "realm": DEVICE_ID, "ha1": digest }))
    );
}

#[tokio::test]
async fn set_auth_fills_empty_realm_from_device_id() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.GetDeviceInfo",
        Script::Result(json!({ "id": DEVICE_ID, "gen": 2 })),
    );

    assert_ok!(
        device
            .shelly()
            .set_auth(
                &cancel,
                AuthParams {
                    user: Some("admin".into()),
                    realm: Some(String::new()),
                    ha1: Some("secret".into()),
                },
            )
            .await
    );

    assert_eq!(
        channel.methods(),
        vec!["Shelly.GetDeviceInfo", "Shelly.SetAuth"]
    );
    assert_eq!(
        channel.calls()[1].params,
        Some(json!({
            "user": "admin",
            "realm": DEVICE_ID,
            "ha1": ha1("admin", DEVICE_ID, "secret"),
        }))
    );
}

#[tokio::test]
async fn set_auth_lowercases_an_uppercase_digest() {
    let (channel, device, cancel) = setup();
    let digest = ha1("admin", DEVICE_ID, "secret");

    assert_ok!(
        device
            .shelly()
            .set_auth(
                &cancel,
                AuthParams {
                    user: Some("admin".into()),
                    realm: Some(DEVICE_ID.into()),
                    ha1: Some(digest.to_ascii_uppercase()),
                },
            )
            .await
    );

    assert_eq!(channel.calls()[0].params.as_ref().unwrap()["ha1"], json!(digest));
}

#[tokio::test]
async fn set_auth_surfaces_realm_lookup_failure() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Shelly.GetDeviceInfo",
        Script::device_error(401, "unauthorized"),
    );

    let err = device
        .shelly()
        .set_auth(
            &cancel,
            AuthParams {
                ha1: Some("secret".into()),
                ..AuthParams::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.device_code(), Some(401));
    assert_eq!(channel.methods(), vec!["Shelly.GetDeviceInfo"]);
}

#[tokio::test]
async fn reboot_accepts_a_bare_envelope() {
    let (channel, device, cancel) = setup();
    channel.on("Shelly.Reboot", Script::Empty);

    assert_ok!(device.shelly().reboot(&cancel).await);
}

// ── Switch / Light / Input ──────────────────────────────────────────

#[tokio::test]
async fn switch_set_reports_previous_state() {
    let (channel, device, cancel) = setup();
    channel.on("Switch.Set", Script::Result(json!({ "was_on": true })));

    let was_on = device
        .switch()
        .set(&cancel, 0, false, Some(5.0))
        .await
        .unwrap();

    assert_eq!(was_on, Some(true));
    assert_eq!(
        channel.calls()[0].params,
        Some(json!({ "id": 0, "on": false, "toggle_after": 5.0 }))
    );
}

#[tokio::test]
async fn switch_status_is_addressed_by_id() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Switch.GetStatus",
        Script::Result(json!({
            "id": 1,
            "source": "init",
            "output": true,
            "pf": 0.92,
            "temperature": { "tC": 41.5, "tF": 106.7 },
        })),
    );

    let status = device.switch().get_status(&cancel, 1).await.unwrap();

    assert!(status.output);
    assert_eq!(status.power_factor, Some(0.92));
    assert_eq!(status.temperature.unwrap().celsius, Some(41.5));
    assert_eq!(channel.calls()[0].params, Some(json!({ "id": 1 })));
}

#[tokio::test]
async fn light_set_flattens_fields() {
    let (channel, device, cancel) = setup();
    let set = LightSet {
        on: Some(true),
        brightness: Some(40.0),
        ..LightSet::default()
    };

    assert_ok!(device.light().set(&cancel, 2, &set).await);
    assert_eq!(
        channel.calls()[0].params,
        Some(json!({ "id": 2, "on": true, "brightness": 40.0 }))
    );
}

#[tokio::test]
async fn input_config_round_trips_type_field() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Input.GetConfig",
        Script::Result(json!({ "id": 0, "name": null, "type": "button", "invert": false })),
    );

    let config = device.input().get_config(&cancel, 0).await.unwrap();

    assert_eq!(config.kind, Some(InputType::Button));
}

// ── WiFi ────────────────────────────────────────────────────────────

#[tokio::test]
async fn wifi_status_and_scan() {
    let (channel, device, cancel) = setup();
    channel.on(
        "WiFi.GetStatus",
        Script::Result(json!({ "sta_ip": "10.0.0.7", "status": "got ip", "ssid": "home", "rssi": -61 })),
    );
    channel.on(
        "WiFi.Scan",
        Script::Result(json!({ "results": [
            { "ssid": "home", "bssid": "aa:bb:cc:dd:ee:ff", "auth": 3, "channel": 6, "rssi": -50 },
            { "ssid": null, "bssid": "11:22:33:44:55:66", "auth": 0, "channel": 11, "rssi": -87 },
        ] })),
    );

    let status = device.wifi().get_status(&cancel).await.unwrap();
    let networks = device.wifi().scan(&cancel).await.unwrap();

    assert_eq!(status.status, WifiState::GotIp);
    assert_eq!(networks.len(), 2);
    assert_eq!(networks[1].ssid, None);
    assert_eq!(channel.methods(), vec!["WiFi.GetStatus", "WiFi.Scan"]);
}

// ── Webhooks ────────────────────────────────────────────────────────

#[tokio::test]
async fn webhook_create_requires_event_cid_and_urls() {
    let (channel, device, cancel) = setup();
    let webhook = device.webhook();

    let no_event = HookParams {
        event: None,
        ..hook("switch.on")
    };
    let no_cid = HookParams {
        cid: None,
        ..hook("switch.on")
    };
    let no_urls = HookParams {
        urls: Some(Vec::new()),
        ..hook("switch.on")
    };

    for params in [no_event, no_cid, no_urls] {
        let err = assert_err!(webhook.create(&cancel, &params).await);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(channel.calls().is_empty());
}

#[tokio::test]
async fn webhook_create_returns_new_id() {
    let (channel, device, cancel) = setup();
    channel.on("Webhook.Create", Script::Result(json!({ "id": 3, "rev": 12 })));

    let rev = device
        .webhook()
        .create(&cancel, &hook("switch.on"))
        .await
        .unwrap();

    assert_eq!(rev.id, Some(3));
    assert_eq!(rev.rev, 12);
}

#[tokio::test]
async fn webhook_update_and_delete() {
    let (channel, device, cancel) = setup();
    channel.on("Webhook.Update", Script::Result(json!({ "rev": 13 })));
    channel.on("Webhook.Delete", Script::Result(json!({ "rev": 14 })));

    let err = device
        .webhook()
        .update(&cancel, &hook("switch.off"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { field, .. } if field == "id"));

    let update = HookParams {
        id: Some(3),
        ..hook("switch.off")
    };
    assert_eq!(
        device.webhook().update(&cancel, &update).await.unwrap().rev,
        13
    );
    assert_eq!(device.webhook().delete(&cancel, 3).await.unwrap().rev, 14);

    assert_eq!(channel.methods(), vec!["Webhook.Update", "Webhook.Delete"]);
    assert_eq!(channel.calls()[1].params, Some(json!({ "id": 3 })));
}

#[tokio::test]
async fn webhook_list_decodes_hooks() {
    let (channel, device, cancel) = setup();
    channel.on(
        "Webhook.List",
        Script::Result(json!({
            "hooks": [{
                "id": 1, "cid": 0, "enable": true, "event": "switch.on",
                "name": "notify", "urls": ["http://10.0.0.5/on"],
            }],
            "rev": 7,
        })),
    );

    let list = device.webhook().list(&cancel).await.unwrap();

    assert_eq!(list.rev, 7);
    assert_eq!(list.hooks[0].urls, vec!["http://10.0.0.5/on"]);
}
