// ── Core error types ──
//
// Errors surfaced by the component set and the orchestrator. The
// `From<shelly_api::Error>` impl translates envelope and channel failures
// into these variants so callers match on one type.

use std::fmt;

use shelly_api::ChannelError;
use thiserror::Error;

use crate::slot::Slot;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Device-reported failures ─────────────────────────────────────
    #[error("device error {code}: {message}")]
    Device { code: i64, message: String },

    // ── Protocol failures ────────────────────────────────────────────
    #[error("{method}: result is missing from response")]
    MissingResult { method: String },

    #[error("malformed response: {message}")]
    Malformed { message: String, body: String },

    // ── Caller input ─────────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Channel failures ─────────────────────────────────────────────
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Coarse classification used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    Protocol,
    Device,
    Validation,
    Channel,
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Device { .. } => ErrorKind::Device,
            Self::MissingResult { .. } | Self::Malformed { .. } => ErrorKind::Protocol,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Channel(_) => ErrorKind::Channel,
        }
    }

    /// Device error code, if the device rejected the call.
    pub fn device_code(&self) -> Option<i64> {
        match self {
            Self::Device { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Channel(ChannelError::Cancelled))
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shelly_api::Error> for CoreError {
    fn from(err: shelly_api::Error) -> Self {
        match err {
            shelly_api::Error::Device { code, message } => Self::Device { code, message },
            shelly_api::Error::MissingResult { method } => Self::MissingResult { method },
            shelly_api::Error::Deserialization { message, body } => {
                Self::Malformed { message, body }
            }
            shelly_api::Error::Serialization(e) => Self::Malformed {
                message: format!("cannot encode parameters: {e}"),
                body: String::new(),
            },
            shelly_api::Error::Channel(e) => Self::Channel(e),
            shelly_api::Error::Validation { field, reason } => Self::Validation { field, reason },
        }
    }
}

// ── Aggregate error ──────────────────────────────────────────────────

/// What a failure is attributed to: a document slot, or the reboot that
/// follows a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Slot(Slot),
    Reboot,
}

impl From<Slot> for Target {
    fn from(slot: Slot) -> Self {
        Self::Slot(slot)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(slot) => slot.fmt(f),
            Self::Reboot => f.write_str("Reboot"),
        }
    }
}

/// One failed component attempt.
#[derive(Debug, Clone)]
pub struct ComponentFailure {
    pub target: Target,
    pub error: CoreError,
}

impl fmt::Display for ComponentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.error)
    }
}

/// Ordered failures from one multi-component operation. Empty means every
/// attempted component succeeded.
#[derive(Debug, Clone, Default)]
pub struct AggregateError {
    failures: Vec<ComponentFailure>,
}

impl AggregateError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: impl Into<Target>, error: CoreError) {
        self.failures.push(ComponentFailure {
            target: target.into(),
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentFailure> {
        self.failures.iter()
    }

    /// Failure recorded for `target`, if any.
    pub fn get(&self, target: impl Into<Target>) -> Option<&CoreError> {
        let target = target.into();
        self.failures
            .iter()
            .find(|f| f.target == target)
            .map(|f| &f.error)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a ComponentFailure;
    type IntoIter = std::slice::Iter<'a, ComponentFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
