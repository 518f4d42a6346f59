// ── Composite slots ──
//
// A slot names one addressable piece of a composite document: a singleton
// component (`sys`, `wifi`, ...) or one instance of a repeatable one
// (`switch:3`). Slots carry both the document key and the display name
// used in error reports.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use thiserror::Error;

/// Instances per repeatable component kind.
pub const SLOT_CAPACITY: usize = 8;

/// Component kinds that can appear in a composite document.
///
/// Declaration order is the dispatch order: network components come
/// last so the control channel survives until everything else is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
pub enum SlotKind {
    #[strum(to_string = "System")]
    Sys,
    #[strum(to_string = "Bluetooth")]
    Ble,
    Cloud,
    Mqtt,
    Switch,
    Light,
    Input,
    #[strum(to_string = "Websocket")]
    Ws,
    Auth,
    #[strum(to_string = "Ethernet")]
    Eth,
    Wifi,
}

impl SlotKind {
    /// Key used in composite documents (`"sys"`, `"switch"`, ...).
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Sys => "sys",
            Self::Ble => "ble",
            Self::Cloud => "cloud",
            Self::Mqtt => "mqtt",
            Self::Switch => "switch",
            Self::Light => "light",
            Self::Input => "input",
            Self::Ws => "ws",
            Self::Auth => "auth",
            Self::Eth => "eth",
            Self::Wifi => "wifi",
        }
    }

    /// RPC component that applies this slot.
    pub fn component(self) -> &'static str {
        match self {
            Self::Sys => "Sys",
            Self::Ble => "BLE",
            Self::Cloud => "Cloud",
            Self::Mqtt => "MQTT",
            Self::Switch => "Switch",
            Self::Light => "Light",
            Self::Input => "Input",
            Self::Ws => "Ws",
            Self::Auth => "Shelly",
            Self::Eth => "Eth",
            Self::Wifi => "WiFi",
        }
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Switch | Self::Light | Self::Input)
    }

    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::iter().find(|k| k.wire_key() == key)
    }
}

/// One slot of a composite document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub kind: SlotKind,
    /// `Some` exactly for indexed kinds, always below [`SLOT_CAPACITY`].
    pub index: Option<usize>,
}

impl Slot {
    pub const fn single(kind: SlotKind) -> Self {
        Self { kind, index: None }
    }

    pub const fn indexed(kind: SlotKind, index: usize) -> Self {
        Self {
            kind,
            index: Some(index),
        }
    }

    /// Document key: `"wifi"`, `"switch:0"`.
    pub fn wire_key(&self) -> String {
        match self.index {
            Some(i) => format!("{}:{i}", self.kind.wire_key()),
            None => self.kind.wire_key().to_owned(),
        }
    }
}

/// Display name used in reports: `System`, `Switch0`, `Wifi`.
impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}{i}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Rejected composite document key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotKeyError {
    #[error("unknown component key `{0}`")]
    Unknown(String),

    #[error("`{key}` needs an instance index, e.g. `{key}:0`")]
    MissingIndex { key: String },

    #[error("`{key}` is not a repeatable component")]
    UnexpectedIndex { key: String },

    #[error("`{key}`: index must be below {max}", max = SLOT_CAPACITY)]
    IndexOutOfRange { key: String },
}

impl FromStr for Slot {
    type Err = SlotKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (name, index) = match key.split_once(':') {
            Some((name, index)) => (name, Some(index)),
            None => (key, None),
        };
        let kind =
            SlotKind::from_wire_key(name).ok_or_else(|| SlotKeyError::Unknown(key.to_owned()))?;

        match (kind.is_indexed(), index) {
            (false, None) => Ok(Self::single(kind)),
            (false, Some(_)) => Err(SlotKeyError::UnexpectedIndex {
                key: key.to_owned(),
            }),
            (true, None) => Err(SlotKeyError::MissingIndex {
                key: key.to_owned(),
            }),
            (true, Some(raw)) => {
                let index: usize = raw
                    .parse()
                    .map_err(|_| SlotKeyError::Unknown(key.to_owned()))?;
                if index >= SLOT_CAPACITY {
                    return Err(SlotKeyError::IndexOutOfRange {
                        key: key.to_owned(),
                    });
                }
                Ok(Self::indexed(kind, index))
            }
        }
    }
}

/// Every slot in the order the orchestrator applies them.
pub fn dispatch_order() -> impl Iterator<Item = Slot> {
    SlotKind::iter().flat_map(|kind| {
        let count = if kind.is_indexed() { SLOT_CAPACITY } else { 1 };
        (0..count).map(move |i| {
            if kind.is_indexed() {
                Slot::indexed(kind, i)
            } else {
                Slot::single(kind)
            }
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn order_puts_network_last() {
        let order: Vec<String> = dispatch_order().map(|s| s.to_string()).collect();
        assert_eq!(order.len(), 8 + 3 * SLOT_CAPACITY);
        assert_eq!(&order[..4], ["System", "Bluetooth", "Cloud", "Mqtt"]);
        assert_eq!(order[4], "Switch0");
        assert_eq!(order[4 + SLOT_CAPACITY], "Light0");
        assert_eq!(order[4 + 2 * SLOT_CAPACITY], "Input0");
        assert_eq!(
            &order[order.len() - 4..],
            ["Websocket", "Auth", "Ethernet", "Wifi"]
        );
    }

    #[test]
    fn parses_document_keys() {
        assert_eq!("wifi".parse::<Slot>().unwrap(), Slot::single(SlotKind::Wifi));
        assert_eq!(
            "light:7".parse::<Slot>().unwrap(),
            Slot::indexed(SlotKind::Light, 7)
        );
        assert_eq!(Slot::indexed(SlotKind::Input, 2).wire_key(), "input:2");
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(matches!(
            "switch:8".parse::<Slot>(),
            Err(SlotKeyError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            "switch".parse::<Slot>(),
            Err(SlotKeyError::MissingIndex { .. })
        ));
        assert!(matches!(
            "wifi:0".parse::<Slot>(),
            Err(SlotKeyError::UnexpectedIndex { .. })
        ));
        assert!(matches!(
            "knx".parse::<Slot>(),
            Err(SlotKeyError::Unknown(_))
        ));
        assert!(matches!(
            "switch:x".parse::<Slot>(),
            Err(SlotKeyError::Unknown(_))
        ));
    }
}
