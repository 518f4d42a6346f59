//! In-memory RPC channel for tests.
//!
//! [`ScriptedChannel`] records every request in send order and answers
//! from per-method scripts. Methods without a script answer with an
//! empty `result` object, which decodes as a successful `SetConfig` that
//! does not require a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::channel::{ChannelError, ChannelFactory, RpcHandle};
use crate::rpc::Request;

/// How the fake answers one request.
#[derive(Debug, Clone)]
pub enum Script {
    /// `{ "result": <value> }`
    Result(serde_json::Value),
    /// `{ "error": { "code", "message" } }`
    DeviceError { code: i64, message: String },
    /// Envelope with neither `result` nor `error`.
    Empty,
    /// Fail at the channel level.
    Fail(ChannelError),
    /// Reply with these exact bytes.
    Raw(Bytes),
}

impl Script {
    /// Successful `SetConfig` reply.
    pub fn restart(restart_required: bool) -> Self {
        Self::Result(json!({ "restart_required": restart_required }))
    }

    pub fn device_error(code: i64, message: impl Into<String>) -> Self {
        Self::DeviceError {
            code,
            message: message.into(),
        }
    }
}

#[derive(Default)]
struct State {
    persistent: HashMap<String, Script>,
    queued: HashMap<String, VecDeque<Script>>,
    calls: Vec<Request>,
}

struct Shared {
    src: String,
    state: Mutex<State>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Channel factory whose handles all share one script book and call log.
#[derive(Clone)]
pub struct ScriptedChannel {
    shared: Arc<Shared>,
}

impl Default for ScriptedChannel {
    fn default() -> Self {
        Self::new("shellyplus1-a8032ab12345")
    }
}

impl ScriptedChannel {
    /// `src` is reported as the answering device id.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                src: src.into(),
                state: Mutex::new(State::default()),
                opened: AtomicUsize::new(0),
                closed: AtomicUsize::new(0),
            }),
        }
    }

    /// Answer every call to `method` with `script`.
    pub fn on(&self, method: &str, script: Script) -> &Self {
        self.shared.state().persistent.insert(method.into(), script);
        self
    }

    /// Answer the next call to `method` with `script`, ahead of any
    /// persistent script.
    pub fn once(&self, method: &str, script: Script) -> &Self {
        self.shared
            .state()
            .queued
            .entry(method.into())
            .or_default()
            .push_back(script);
        self
    }

    /// Every request sent so far, in order.
    pub fn calls(&self) -> Vec<Request> {
        self.shared.state().calls.clone()
    }

    /// Method names of every request sent so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.shared
            .state()
            .calls
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }

    /// Number of handles handed out.
    pub fn handles_opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Number of handles closed.
    pub fn handles_closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Shareable factory view for device clients.
    pub fn factory(&self) -> Arc<dyn ChannelFactory> {
        Arc::new(self.clone())
    }
}

impl ChannelFactory for ScriptedChannel {
    fn new_handle(&self) -> Arc<dyn RpcHandle> {
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        Arc::new(ScriptedHandle {
            shared: Arc::clone(&self.shared),
            closed: AtomicBool::new(false),
        })
    }
}

struct ScriptedHandle {
    shared: Arc<Shared>,
    closed: AtomicBool,
}

#[async_trait]
impl RpcHandle for ScriptedHandle {
    async fn send(
        &self,
        cancel: &CancellationToken,
        request: &Request,
    ) -> Result<Bytes, ChannelError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }

        let script = {
            let mut state = self.shared.state();
            state.calls.push(request.clone());
            let queued = state
                .queued
                .get_mut(&request.method)
                .and_then(VecDeque::pop_front);
            queued.or_else(|| state.persistent.get(&request.method).cloned())
        };

        if cancel.is_cancelled() {
            return Err(ChannelError::Cancelled);
        }

        let body = match script.unwrap_or_else(|| Script::Result(json!({}))) {
            Script::Result(result) => json!({
                "id": request.id,
                "src": self.shared.src,
                "result": result,
            }),
            Script::DeviceError { code, message } => json!({
                "id": request.id,
                "src": self.shared.src,
                "error": { "code": code, "message": message },
            }),
            Script::Empty => json!({ "id": request.id, "src": self.shared.src }),
            Script::Fail(err) => return Err(err),
            Script::Raw(bytes) => return Ok(bytes),
        };

        serde_json::to_vec(&body)
            .map(Bytes::from)
            .map_err(|e| ChannelError::Other(e.to_string()))
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.shared.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
