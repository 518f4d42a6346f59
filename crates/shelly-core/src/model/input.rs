// ── Input component ──

use serde::{Deserialize, Serialize};

use super::Indexed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Switch,
    Button,
    Analog,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InputType>,
    /// Switch and button inputs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_reset: Option<bool>,
    /// Analog inputs only, in percent.
    #[serde(rename = "report_thr", skip_serializing_if = "Option::is_none")]
    pub report_threshold: Option<f64>,
}

impl Indexed for InputConfig {
    fn id(&self) -> Option<u32> {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputStatus {
    pub id: u32,
    /// `None` for stateless (button) inputs.
    pub state: Option<bool>,
    pub percent: Option<u8>,
    pub errors: Vec<String>,
}
