// RPC channel seam
//
// The transport (connection setup, framing, digest challenge) lives
// outside this crate. Implementors hand out request/response handles;
// the component facade owns at most one handle at a time and never
// retries. Correlation of responses by request `id` is the handle's job.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::rpc::Request;

/// Transport-level failure reported by an RPC channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// No response arrived within the channel's deadline.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The connection to the device dropped.
    #[error("channel disconnected: {0}")]
    Disconnected(String),

    /// The caller's cancellation token fired while the request was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// The handle was already closed.
    #[error("channel handle is closed")]
    Closed,

    /// Any other transport failure (connect refused, TLS, auth challenge).
    #[error("channel error: {0}")]
    Other(String),
}

impl ChannelError {
    /// Returns `true` if a fresh connection might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Disconnected(_))
    }
}

/// One request/response handle on an RPC channel.
///
/// Implementations must allow at most one request in flight per handle.
/// `cancel` is the caller's token, passed through untouched.
#[async_trait]
pub trait RpcHandle: Send + Sync {
    /// Send a request and wait for the correlated response bytes.
    async fn send(&self, cancel: &CancellationToken, request: &Request)
    -> Result<Bytes, ChannelError>;

    /// Release the handle. Called at most once by the facade.
    async fn close(&self);
}

/// Hands out fresh handles. Typically one per component client.
pub trait ChannelFactory: Send + Sync {
    fn new_handle(&self) -> Arc<dyn RpcHandle>;
}
