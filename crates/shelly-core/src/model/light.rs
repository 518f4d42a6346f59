// ── Light (dimmer) component ──

use serde::{Deserialize, Serialize};

use super::Indexed;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    pub default: Option<LightDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_mode: Option<LightNightMode>,
}

impl Indexed for LightConfig {
    fn id(&self) -> Option<u32> {
        self.id
    }
}

/// Brightness applied at power on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightDefault {
    pub brightness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightNightMode {
    pub enable: bool,
    pub brightness: f64,
    /// `["HH:MM", "HH:MM"]`.
    pub active_between: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightStatus {
    pub id: u32,
    pub source: String,
    pub output: bool,
    /// Percent.
    pub brightness: Option<f64>,
    pub timer_started_at: Option<f64>,
    pub timer_duration: Option<f64>,
}
