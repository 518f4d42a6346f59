// ── Composite documents on disk ──
//
// A composite config is written by hand as JSON or YAML. The format is
// picked from the file extension; stdin callers name it explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shelly_core::CompositeConfig;
use tracing::debug;

use crate::ConfigError;

/// Encodings accepted for composite documents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

impl DocumentFormat {
    /// Format implied by `path`'s extension: `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse().map_err(|_| ConfigError::Validation {
            field: "document".into(),
            reason: format!(
                "cannot tell the format of '{}': expected .json, .yaml or .yml",
                path.display()
            ),
        })
    }
}

/// Decode a composite document.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<CompositeConfig, ConfigError> {
    let config = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(config)
}

/// Read and decode the composite document at `path`.
pub fn load_document(path: &Path) -> Result<CompositeConfig, ConfigError> {
    let format = DocumentFormat::from_path(path)?;
    debug!(path = %path.display(), %format, "loading composite document");
    let text = std::fs::read_to_string(path)?;
    parse_document(&text, format)
}

/// Encode a composite document, e.g. the example config for editing.
pub fn render_document(
    config: &CompositeConfig,
    format: DocumentFormat,
) -> Result<String, ConfigError> {
    let text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(config)?,
        DocumentFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shelly_core::{Slot, SlotKind};

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/device.json")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("device.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert!(DocumentFormat::from_path(Path::new("device.toml")).is_err());
        assert!(DocumentFormat::from_path(Path::new("device")).is_err());
    }

    #[test]
    fn yaml_document_decodes_indexed_slots() {
        let text = "\
switch:1:
  id: 1
  name: pump
wifi:
  sta:
    ssid: home
";
        let cfg = parse_document(text, DocumentFormat::Yaml).unwrap();
        assert!(cfg.has(Slot::indexed(SlotKind::Switch, 1)));
        assert!(cfg.has(Slot::single(SlotKind::Wifi)));
        assert!(!cfg.has(Slot::single(SlotKind::Sys)));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let unknown = parse_document(r#"{"gizmo": {}}"#, DocumentFormat::Json);
        assert!(matches!(unknown, Err(ConfigError::Json(_))));

        let out_of_range = parse_document("switch:8:\n  id: 8\n", DocumentFormat::Yaml);
        assert!(matches!(out_of_range, Err(ConfigError::Yaml(_))));
    }
}
