// Component client facade
//
// One `ComponentClient` per device component (`Sys`, `WiFi`, `Switch`, ...).
// Each call is exactly one request/response round trip on a handle that
// is created lazily and cached until `close()`. Envelope unwrapping lives
// here so the typed component wrappers in `shelly-core` only deal with
// their own parameter and result shapes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::channel::{ChannelError, ChannelFactory, RpcHandle};
use crate::error::Error;
use crate::rpc::{Request, Response, SetReport, SetResult};

/// Unwrapped reply: the answering device id plus the decoded result.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub src: String,
    pub result: T,
}

enum HandleSlot {
    Idle,
    Open(Arc<dyn RpcHandle>),
    Closed,
}

/// Typed single-round-trip access to one device component.
pub struct ComponentClient {
    component: &'static str,
    factory: Arc<dyn ChannelFactory>,
    /// Guards lazy creation so concurrent first calls share one handle.
    handle: Mutex<HandleSlot>,
    next_id: AtomicU64,
}

impl ComponentClient {
    pub fn new(component: &'static str, factory: Arc<dyn ChannelFactory>) -> Self {
        Self {
            component,
            factory,
            handle: Mutex::new(HandleSlot::Idle),
            next_id: AtomicU64::new(1),
        }
    }

    /// Component name used as the method prefix, e.g. `"Switch"`.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Fully qualified method name, e.g. `"Switch.SetConfig"`.
    pub fn method(&self, action: &str) -> String {
        format!("{}.{action}", self.component)
    }

    /// Whether a handle has been obtained and not yet closed.
    pub async fn is_open(&self) -> bool {
        matches!(*self.handle.lock().await, HandleSlot::Open(_))
    }

    async fn handle(&self) -> Result<Arc<dyn RpcHandle>, ChannelError> {
        let mut slot = self.handle.lock().await;
        match &*slot {
            HandleSlot::Open(handle) => Ok(Arc::clone(handle)),
            HandleSlot::Closed => Err(ChannelError::Closed),
            HandleSlot::Idle => {
                debug!(component = self.component, "opening channel handle");
                let handle = self.factory.new_handle();
                *slot = HandleSlot::Open(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    /// Release the handle. Idempotent; a no-op if no handle was ever opened.
    pub async fn close(&self) {
        let mut slot = self.handle.lock().await;
        if let HandleSlot::Open(handle) = &*slot {
            let handle = Arc::clone(handle);
            *slot = HandleSlot::Closed;
            debug!(component = self.component, "closing channel handle");
            handle.close().await;
        }
    }

    async fn round_trip<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<Response<R>, Error> {
        let method = self.method(action);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request {
            id,
            method,
            params,
            auth: None,
        };

        let handle = self.handle().await?;
        debug!(method = %request.method, id, "sending request");
        let bytes = handle.send(cancel, &request).await?;
        trace!(method = %request.method, len = bytes.len(), "received response");

        let response: Response<R> = serde_json::from_slice(&bytes).map_err(|e| {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            Error::Deserialization {
                message: format!("{}: {e}", request.method),
                body,
            }
        })?;

        if let Some(err) = response.error {
            return Err(Error::Device {
                code: err.code,
                message: err.message,
            });
        }

        Ok(response)
    }

    /// Call `<Component>.<action>` and require a `result` in the reply.
    pub async fn request<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<Reply<R>, Error> {
        let response = self.round_trip::<R>(cancel, action, params).await?;
        let result = response.result.ok_or_else(|| Error::MissingResult {
            method: self.method(action),
        })?;
        Ok(Reply {
            src: response.src,
            result,
        })
    }

    /// Call `<Component>.<action>` for replies whose result may be absent
    /// (`Reboot`, `Set`, `Toggle`).
    pub async fn execute<R: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<Reply<Option<R>>, Error> {
        let response = self.round_trip::<R>(cancel, action, params).await?;
        Ok(Reply {
            src: response.src,
            result: response.result,
        })
    }

    /// `<Component>.SetConfig` with pre-built parameters.
    pub async fn set_config(
        &self,
        cancel: &CancellationToken,
        params: serde_json::Value,
    ) -> Result<SetReport, Error> {
        let reply = self
            .request::<SetResult>(cancel, "SetConfig", Some(params))
            .await?;
        Ok(SetReport {
            src: reply.src,
            restart_required: reply.result.restart_required,
        })
    }
}

/// Encode typed parameters into the request `params` value.
pub fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<serde_json::Value, Error> {
    Ok(serde_json::to_value(params)?)
}
