// ── Composite configuration documents ──
//
// One document covering every component of a device, keyed the way the
// device itself keys `Shelly.GetConfig`: `sys`, `wifi`, `switch:0`, ...
// A missing key and a `null` value both mean "leave this component alone".

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shelly_api::SetReport;

use crate::error::CoreError;
use crate::model::{
    AuthConfig, BluetoothConfig, CloudConfig, EthernetConfig, InputConfig, LightConfig,
    MqttConfig, SwitchConfig, SysConfig, WebsocketConfig, WifiConfig,
};
use crate::slot::{SLOT_CAPACITY, Slot, SlotKind, dispatch_order};

// ── Slots ────────────────────────────────────────────────────────────

/// Fixed-capacity indexed storage for repeatable components.
#[derive(Clone, PartialEq)]
pub struct Slots<T>([Option<T>; SLOT_CAPACITY]);

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| None))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> Slots<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index).and_then(Option::as_mut)
    }

    /// Store `value` at `index`, returning the previous occupant.
    pub fn insert(&mut self, index: usize, value: T) -> Result<Option<T>, CoreError> {
        let slot = self.0.get_mut(index).ok_or_else(|| {
            CoreError::validation("index", format!("{index} is not below {SLOT_CAPACITY}"))
        })?;
        Ok(slot.replace(value))
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.0.get_mut(index).and_then(Option::take)
    }

    /// Occupied entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i, v)))
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

// ── CompositeConfig ──────────────────────────────────────────────────

/// Partial configuration for a whole device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeConfig {
    pub sys: Option<SysConfig>,
    pub ble: Option<BluetoothConfig>,
    pub cloud: Option<CloudConfig>,
    pub mqtt: Option<MqttConfig>,
    pub switch: Slots<SwitchConfig>,
    pub light: Slots<LightConfig>,
    pub input: Slots<InputConfig>,
    pub ws: Option<WebsocketConfig>,
    pub auth: Option<AuthConfig>,
    pub eth: Option<EthernetConfig>,
    pub wifi: Option<WifiConfig>,
}

impl CompositeConfig {
    /// Whether `slot` holds a sub-document.
    pub fn has(&self, slot: Slot) -> bool {
        let index = slot.index.unwrap_or_default();
        match slot.kind {
            SlotKind::Sys => self.sys.is_some(),
            SlotKind::Ble => self.ble.is_some(),
            SlotKind::Cloud => self.cloud.is_some(),
            SlotKind::Mqtt => self.mqtt.is_some(),
            SlotKind::Switch => self.switch.get(index).is_some(),
            SlotKind::Light => self.light.get(index).is_some(),
            SlotKind::Input => self.input.get(index).is_some(),
            SlotKind::Ws => self.ws.is_some(),
            SlotKind::Auth => self.auth.is_some(),
            SlotKind::Eth => self.eth.is_some(),
            SlotKind::Wifi => self.wifi.is_some(),
        }
    }

    /// Populated slots in dispatch order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        dispatch_order().filter(|s| self.has(*s))
    }

    pub fn is_empty(&self) -> bool {
        self.slots().next().is_none()
    }

    /// Decode a `Shelly.GetConfig` result. Unlike the strict document
    /// decoder, keys this crate does not model (`script:1`, `knx`, ...)
    /// are dropped instead of rejected.
    pub fn from_device_config(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match value {
            serde_json::Value::Object(map) => {
                let known: serde_json::Map<String, serde_json::Value> = map
                    .into_iter()
                    .filter(|(key, _)| key.parse::<Slot>().is_ok())
                    .collect();
                serde_json::from_value(serde_json::Value::Object(known))
            }
            other => serde_json::from_value(other),
        }
    }

    fn serialize_slot<M: SerializeMap>(&self, slot: Slot, map: &mut M) -> Result<(), M::Error> {
        let key = slot.wire_key();
        let index = slot.index.unwrap_or_default();
        match slot.kind {
            SlotKind::Sys => entry(map, &key, self.sys.as_ref()),
            SlotKind::Ble => entry(map, &key, self.ble.as_ref()),
            SlotKind::Cloud => entry(map, &key, self.cloud.as_ref()),
            SlotKind::Mqtt => entry(map, &key, self.mqtt.as_ref()),
            SlotKind::Switch => entry(map, &key, self.switch.get(index)),
            SlotKind::Light => entry(map, &key, self.light.get(index)),
            SlotKind::Input => entry(map, &key, self.input.get(index)),
            SlotKind::Ws => entry(map, &key, self.ws.as_ref()),
            SlotKind::Auth => entry(map, &key, self.auth.as_ref()),
            SlotKind::Eth => entry(map, &key, self.eth.as_ref()),
            SlotKind::Wifi => entry(map, &key, self.wifi.as_ref()),
        }
    }

    fn fill_slot<'de, A: MapAccess<'de>>(&mut self, slot: Slot, map: &mut A) -> Result<(), A::Error> {
        let index = slot.index.unwrap_or_default();
        match slot.kind {
            SlotKind::Sys => self.sys = map.next_value()?,
            SlotKind::Ble => self.ble = map.next_value()?,
            SlotKind::Cloud => self.cloud = map.next_value()?,
            SlotKind::Mqtt => self.mqtt = map.next_value()?,
            SlotKind::Switch => put::<_, A::Error>(&mut self.switch, index, map.next_value()?)?,
            SlotKind::Light => put::<_, A::Error>(&mut self.light, index, map.next_value()?)?,
            SlotKind::Input => put::<_, A::Error>(&mut self.input, index, map.next_value()?)?,
            SlotKind::Ws => self.ws = map.next_value()?,
            SlotKind::Auth => self.auth = map.next_value()?,
            SlotKind::Eth => self.eth = map.next_value()?,
            SlotKind::Wifi => self.wifi = map.next_value()?,
        }
        Ok(())
    }
}

fn entry<M: SerializeMap, T: Serialize>(
    map: &mut M,
    key: &str,
    value: Option<&T>,
) -> Result<(), M::Error> {
    match value {
        Some(v) => map.serialize_entry(key, v),
        None => Ok(()),
    }
}

fn put<T, E: de::Error>(slots: &mut Slots<T>, index: usize, value: Option<T>) -> Result<(), E> {
    if let Some(value) = value {
        slots.insert(index, value).map_err(E::custom)?;
    }
    Ok(())
}

impl Serialize for CompositeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for slot in self.slots() {
            self.serialize_slot(slot, &mut map)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompositeConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CompositeVisitor)
    }
}

struct CompositeVisitor;

impl<'de> Visitor<'de> for CompositeVisitor {
    type Value = CompositeConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of component keys to configuration documents")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut config = CompositeConfig::default();
        let mut seen = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let slot: Slot = key.parse().map_err(de::Error::custom)?;
            if seen.contains(&slot) {
                return Err(de::Error::custom(format!("duplicate component key `{key}`")));
            }
            seen.push(slot);
            config.fill_slot(slot, &mut map)?;
        }
        Ok(config)
    }

    // An empty YAML document decodes as unit.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CompositeConfig::default())
    }
}

// ── CompositeReport ──────────────────────────────────────────────────

/// Per-slot results of applying a [`CompositeConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeReport {
    reports: BTreeMap<Slot, SetReport>,
    /// True iff at least one successfully applied component asked for a
    /// restart.
    pub restart_required: bool,
}

impl CompositeReport {
    /// Record a successful component result.
    pub fn record(&mut self, slot: Slot, report: SetReport) {
        self.restart_required |= report.restart_required;
        self.reports.insert(slot, report);
    }

    pub fn get(&self, slot: Slot) -> Option<&SetReport> {
        self.reports.get(&slot)
    }

    /// Reported slots in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SetReport)> {
        self.reports.iter().map(|(slot, report)| (*slot, report))
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Serialize for CompositeReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.reports.len() + 1))?;
        for (slot, report) in &self.reports {
            map.serialize_entry(&slot.wire_key(), report)?;
        }
        map.serialize_entry("restart_required", &self.restart_required)?;
        map.end()
    }
}
