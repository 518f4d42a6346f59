// ── Runtime connection settings ──
//
// What a transport needs to reach one device, plus the options that
// steer `Device::apply_config`. Never touches disk; `shelly-config`
// builds these from profiles.

use std::time::Duration;

use secrecy::SecretString;

/// Per-request timeout used when a profile does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for one device.
///
/// Consumed by whatever implements `shelly_api::ChannelFactory`; the
/// core itself only forwards them.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Hostname or IP, optionally with `:port`.
    pub host: String,
    pub username: String,
    /// `None` for devices without authentication.
    pub password: Option<SecretString>,
    /// Digest realm. Devices use their id; `None` means "learn it from
    /// the first challenge".
    pub realm: Option<String>,
    pub timeout: Duration,
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: shelly_api::DEFAULT_USER.to_owned(),
            password: None,
            realm: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Options for [`Device::apply_config`](crate::Device::apply_config).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Reboot the device when any applied component requires it.
    pub auto_reboot: bool,
}
