use thiserror::Error;

use crate::channel::ChannelError;

/// Top-level error type for the `shelly-api` crate.
///
/// Covers every failure mode of a single RPC round trip: the channel
/// failing, the device refusing the request, or the device answering
/// with something that does not fit the envelope. `shelly-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Device ──────────────────────────────────────────────────────
    /// The device answered with an `error` object.
    #[error("device error {code}: {message}")]
    Device { code: i64, message: String },

    // ── Protocol ────────────────────────────────────────────────────
    /// Neither `error` nor `result` was present in the response.
    #[error("{method}: result is missing from response")]
    MissingResult { method: String },

    /// Response bytes did not decode, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request parameters could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Channel ─────────────────────────────────────────────────────
    /// Transport-level failure reported by the RPC channel.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    // ── Local validation ────────────────────────────────────────────
    /// A precondition failed before any request was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl Error {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the device explicitly rejected the request.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::Device { .. })
    }

    /// Returns `true` if the response did not fit the RPC envelope.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::MissingResult { .. } | Self::Deserialization { .. } | Self::Serialization(_)
        )
    }

    /// Returns `true` if the failure came from the channel and a later
    /// attempt on a fresh connection might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Channel(e) => e.is_transient(),
            _ => false,
        }
    }

    /// The device-reported error code, if the device rejected the call.
    pub fn device_code(&self) -> Option<i64> {
        match self {
            Self::Device { code, .. } => Some(*code),
            _ => None,
        }
    }
}
