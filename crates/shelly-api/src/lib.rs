// shelly-api: JSON-RPC plumbing for Shelly Gen2 devices
//
// Envelopes, the channel seam, the per-component facade, and credential
// normalization. The wire transport itself is supplied by the caller
// through `ChannelFactory`.

pub mod auth;
pub mod channel;
pub mod component;
pub mod error;
pub mod fakes;
pub mod rpc;

pub use auth::{AuthParams, DEFAULT_USER};
pub use channel::{ChannelError, ChannelFactory, RpcHandle};
pub use component::{ComponentClient, Reply, to_params};
pub use error::Error;
pub use rpc::{AuthResponse, Request, Response, RpcError, SetReport, SetResult};

// Re-exported so implementors of `RpcHandle` need not depend on it directly.
pub use tokio_util::sync::CancellationToken;
