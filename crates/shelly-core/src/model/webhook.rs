// ── Webhook service ──
//
// Hooks fire an HTTP request when a component event occurs
// (`switch.on`, `input.toggle_off`, ...). Every change bumps the
// registry revision, which each mutating call returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A registered hook as returned by `Webhook.List`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hook {
    pub id: u32,
    pub cid: u32,
    pub enable: bool,
    pub event: String,
    pub name: Option<String>,
    pub ssl_ca: Option<String>,
    pub urls: Vec<String>,
    pub condition: Option<String>,
    pub repeat_period: i64,
    pub active_between: Vec<String>,
}

/// Parameters of `Webhook.Create` and `Webhook.Update`.
///
/// `id` is required by `Update` and ignored by `Create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_ca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_between: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_period: Option<i64>,
}

impl From<&Hook> for HookParams {
    fn from(hook: &Hook) -> Self {
        Self {
            id: Some(hook.id),
            cid: Some(hook.cid),
            event: Some(hook.event.clone()),
            enable: Some(hook.enable),
            name: hook.name.clone(),
            ssl_ca: hook.ssl_ca.clone(),
            urls: Some(hook.urls.clone()),
            active_between: Some(hook.active_between.clone()),
            condition: hook.condition.clone(),
            repeat_period: Some(hook.repeat_period),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookList {
    pub hooks: Vec<Hook>,
    pub rev: u64,
}

/// Result of the mutating webhook calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookRevision {
    /// Present for `Create`.
    pub id: Option<u32>,
    pub rev: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventAttr {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedEvent {
    pub attrs: Vec<EventAttr>,
}

/// `Webhook.ListSupported` result, keyed by event name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedEvents {
    pub types: BTreeMap<String, SupportedEvent>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_params_skip_unset_fields() {
        let params = HookParams {
            cid: Some(0),
            event: Some("switch.on".into()),
            urls: Some(vec!["http://10.0.0.5/on".into()]),
            ..HookParams::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "cid": 0, "event": "switch.on", "urls": ["http://10.0.0.5/on"] })
        );
    }

    #[test]
    fn supported_events_keyed_by_name() {
        let s: SupportedEvents = serde_json::from_value(serde_json::json!({
            "types": {
                "switch.on": {},
                "temperature.change": { "attrs": [{ "name": "tC", "type": "number", "desc": "Celsius" }] }
            }
        }))
        .unwrap();
        assert_eq!(s.types.len(), 2);
        assert_eq!(s.types["temperature.change"].attrs[0].name, "tC");
    }
}
