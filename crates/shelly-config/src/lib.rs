//! Shared configuration for Shelly device tools.
//!
//! TOML profiles, password resolution (env + keyring + plaintext),
//! composite document loading, logging setup, and translation to
//! `shelly_core::ConnectionSettings`.

pub mod document;
pub mod logging;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use shelly_core::{ApplyOptions, ConnectionSettings, DEFAULT_TIMEOUT};

pub use document::{DocumentFormat, load_document, parse_document, render_document};
pub use logging::LogFormat;

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "shelly-rpc";

/// Fallback password variable consulted after a profile's `password_env`.
pub const PASSWORD_ENV: &str = "SHELLY_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' is not defined")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub auto_reboot: bool,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            auto_reboot: false,
            log_format: LogFormat::default(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// A named device.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP, optionally with `:port`.
    pub host: String,

    /// Defaults to `admin`, the only user Gen2 firmware accepts.
    pub username: Option<String>,

    /// Plaintext password; prefer the keyring or `password_env`.
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Digest realm; the device id when unset.
    pub realm: Option<String>,

    /// Overrides `defaults.timeout`.
    pub timeout: Option<u64>,

    /// Overrides `defaults.auto_reboot`.
    pub auto_reboot: Option<bool>,
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name.or(self.default_profile.as_deref()).ok_or_else(|| {
            ConfigError::validation("profile", "no profile named and no default set")
        })?;
        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "shelly-rpc", "shelly").map_or_else(
        || PathBuf::from(".shelly").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Layer `path` over the defaults, then `SHELLY_` variables on top.
///
/// Nested keys use a double underscore: `SHELLY_DEFAULTS__TIMEOUT=5`. A
/// missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("SHELLY_")
                .split("__")
                .ignore(&["password", "log"]),
        );

    Ok(figment.extract()?)
}

/// Load config, falling back to defaults when it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the device password for a profile.
///
/// Order: the profile's `password_env` variable, `SHELLY_PASSWORD`, the
/// system keyring, then the plaintext `password`. `None` means the
/// device is expected to run without authentication.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::validation("keyring", e.to_string()))
}

// ── Translation to core settings ────────────────────────────────────

/// Build connection settings and apply options for one profile.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<(ConnectionSettings, ApplyOptions), ConfigError> {
    let host = profile.host.trim();
    if host.is_empty() {
        return Err(ConfigError::validation("host", "host is required"));
    }
    if host.contains("://") {
        return Err(ConfigError::validation(
            "host",
            format!("expected a host name or address, got '{host}'"),
        ));
    }

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::validation("timeout", "must be at least one second"));
    }

    let mut settings = ConnectionSettings::new(host);
    if let Some(ref username) = profile.username {
        settings.username.clone_from(username);
    }
    settings.password = resolve_password(profile, profile_name);
    settings.realm.clone_from(&profile.realm);
    settings.timeout = Duration::from_secs(timeout);

    let options = ApplyOptions {
        auto_reboot: profile.auto_reboot.unwrap_or(defaults.auto_reboot),
    };
    Ok((settings, options))
}
