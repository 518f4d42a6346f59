// ── Switch component ──

use serde::{Deserialize, Serialize};

use super::Indexed;

/// Per-instance switch configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `momentary`, `follow`, `flip` or `detached`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_mode: Option<String>,
    /// `off`, `on`, `restore_last` or `match_input`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_on_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_off: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_off_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorecover_voltage_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undervoltage_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_limit: Option<f64>,
}

impl Indexed for SwitchConfig {
    fn id(&self) -> Option<u32> {
        self.id
    }
}

/// `Switch.GetStatus` result. Metering fields appear only on PM models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchStatus {
    pub id: u32,
    pub source: String,
    pub output: bool,
    pub timer_started_at: Option<f64>,
    pub timer_duration: Option<f64>,
    pub apower: Option<f64>,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    #[serde(rename = "pf")]
    pub power_factor: Option<f64>,
    pub aenergy: Option<ActiveEnergy>,
    pub temperature: Option<Temperature>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveEnergy {
    /// Watt-hours.
    pub total: f64,
    /// Milliwatt-hours for each of the last three minutes, newest first.
    pub by_minute: Vec<f64>,
    pub minute_ts: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(rename = "tC")]
    pub celsius: Option<f64>,
    #[serde(rename = "tF")]
    pub fahrenheit: Option<f64>,
}

/// Result of `Switch.Set` and `Switch.Toggle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchToggle {
    pub was_on: Option<bool>,
}
