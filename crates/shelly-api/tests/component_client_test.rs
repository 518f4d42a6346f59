#![allow(clippy::unwrap_used)]
// Integration tests for `ComponentClient` against the scripted channel.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use shelly_api::fakes::{Script, ScriptedChannel};
use shelly_api::{CancellationToken, ChannelError, ComponentClient, Error};
use tokio_test::{assert_err, assert_ok};

// ── Helpers ─────────────────────────────────────────────────────────

fn setup(component: &'static str) -> (ScriptedChannel, ComponentClient) {
    let channel = ScriptedChannel::new("shellyplus1pm-441793a1b2c3");
    let client = ComponentClient::new(component, channel.factory());
    (channel, client)
}

#[derive(Debug, Deserialize, PartialEq)]
struct MqttStatus {
    connected: bool,
}

// ── Envelope handling ───────────────────────────────────────────────

#[tokio::test]
async fn test_request_unwraps_result_and_src() {
    let (channel, client) = setup("Mqtt");
    channel.on("Mqtt.GetStatus", Script::Result(json!({ "connected": true })));

    let reply = client
        .request::<MqttStatus>(&CancellationToken::new(), "GetStatus", None)
        .await
        .unwrap();

    assert_eq!(reply.src, "shellyplus1pm-441793a1b2c3");
    assert_eq!(reply.result, MqttStatus { connected: true });
    assert_eq!(channel.methods(), vec!["Mqtt.GetStatus"]);
}

#[tokio::test]
async fn test_device_error_wins_over_result() {
    let (channel, client) = setup("Mqtt");
    channel.on(
        "Mqtt.GetStatus",
        Script::Raw(Bytes::from_static(
            br#"{"id":1,"src":"dev","error":{"code":-103,"message":"Invalid argument"},"result":{"connected":true}}"#,
        )),
    );

    let result = client
        .request::<MqttStatus>(&CancellationToken::new(), "GetStatus", None)
        .await;

    match result {
        Err(Error::Device { code, message }) => {
            assert_eq!(code, -103);
            assert_eq!(message, "Invalid argument");
        }
        other => panic!("expected device error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_result_is_protocol_error() {
    let (channel, client) = setup("Sys");
    channel.on("Sys.GetConfig", Script::Empty);

    let err = client
        .request::<serde_json::Value>(&CancellationToken::new(), "GetConfig", None)
        .await
        .unwrap_err();

    assert!(err.is_protocol_error(), "got: {err:?}");
    assert!(matches!(err, Error::MissingResult { ref method } if method == "Sys.GetConfig"));
}

#[tokio::test]
async fn test_execute_accepts_missing_result() {
    let (channel, client) = setup("Shelly");
    channel.on("Shelly.Reboot", Script::Empty);

    let reply = client
        .execute::<serde_json::Value>(&CancellationToken::new(), "Reboot", None)
        .await
        .unwrap();

    assert_eq!(reply.result, None);
}

#[tokio::test]
async fn test_undecodable_body_keeps_raw_bytes() {
    let (channel, client) = setup("WiFi");
    channel.on("WiFi.GetStatus", Script::Raw(Bytes::from_static(b"<html>oops")));

    let err = client
        .request::<serde_json::Value>(&CancellationToken::new(), "GetStatus", None)
        .await
        .unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops"),
        other => panic!("expected deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_set_config_reports_restart() {
    let (channel, client) = setup("WiFi");
    channel.on("WiFi.SetConfig", Script::restart(true));

    let report = client
        .set_config(&CancellationToken::new(), json!({ "config": {} }))
        .await
        .unwrap();

    assert!(report.restart_required);
    assert_eq!(report.src, "shellyplus1pm-441793a1b2c3");
    assert_eq!(channel.calls()[0].params, Some(json!({ "config": {} })));
}

#[tokio::test]
async fn test_request_ids_increase() {
    let (channel, client) = setup("Cloud");
    let cancel = CancellationToken::new();

    for _ in 0..3 {
        let _ = client
            .execute::<serde_json::Value>(&cancel, "GetStatus", None)
            .await
            .unwrap();
    }

    let ids: Vec<u64> = channel.calls().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// ── Handle lifecycle ────────────────────────────────────────────────

#[tokio::test]
async fn test_handle_is_lazy_and_reused() {
    let (channel, client) = setup("Sys");
    assert_eq!(channel.handles_opened(), 0);
    assert!(!client.is_open().await);

    let cancel = CancellationToken::new();
    for _ in 0..4 {
        client
            .execute::<serde_json::Value>(&cancel, "GetStatus", None)
            .await
            .unwrap();
    }

    assert_eq!(channel.handles_opened(), 1);
    assert!(client.is_open().await);
}

#[tokio::test]
async fn test_concurrent_first_calls_share_one_handle() {
    let (channel, client) = setup("Sys");
    let cancel = CancellationToken::new();

    let (a, b) = tokio::join!(
        client.execute::<serde_json::Value>(&cancel, "GetStatus", None),
        client.execute::<serde_json::Value>(&cancel, "GetConfig", None),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(channel.handles_opened(), 1);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let (channel, client) = setup("Sys");
    client
        .execute::<serde_json::Value>(&CancellationToken::new(), "GetStatus", None)
        .await
        .unwrap();

    client.close().await;
    client.close().await;

    assert_eq!(channel.handles_closed(), 1);
    assert!(!client.is_open().await);
}

#[tokio::test]
async fn test_close_before_use_is_noop() {
    let (channel, client) = setup("Sys");
    client.close().await;

    assert_eq!(channel.handles_opened(), 0);
    assert_eq!(channel.handles_closed(), 0);

    client
        .execute::<serde_json::Value>(&CancellationToken::new(), "GetStatus", None)
        .await
        .unwrap();
    assert_eq!(channel.handles_opened(), 1);
}

#[tokio::test]
async fn test_calls_after_close_fail() {
    let (_channel, client) = setup("Sys");
    let cancel = CancellationToken::new();
    assert_ok!(
        client
            .execute::<serde_json::Value>(&cancel, "GetStatus", None)
            .await
    );
    client.close().await;

    let err = assert_err!(
        client
            .execute::<serde_json::Value>(&cancel, "GetStatus", None)
            .await
    );

    assert!(matches!(err, Error::Channel(ChannelError::Closed)));
}

// ── Channel failures ────────────────────────────────────────────────

#[tokio::test]
async fn test_cancellation_reaches_channel() {
    let (channel, client) = setup("Switch");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .set_config(&cancel, json!({ "id": 0, "config": {} }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Channel(ChannelError::Cancelled)));
    assert_eq!(channel.methods(), vec!["Switch.SetConfig"]);
}

#[tokio::test]
async fn test_timeout_is_transient() {
    let (channel, client) = setup("Switch");
    channel.on(
        "Switch.GetStatus",
        Script::Fail(ChannelError::Timeout(std::time::Duration::from_secs(5))),
    );

    let err = client
        .request::<serde_json::Value>(&CancellationToken::new(), "GetStatus", None)
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert!(!err.is_device_error());
}
