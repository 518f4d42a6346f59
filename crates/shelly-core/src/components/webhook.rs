// ── Webhook registry client ──

use std::sync::Arc;

use serde::Serialize;
use shelly_api::{CancellationToken, ChannelFactory, ComponentClient, to_params};

use crate::error::CoreError;
use crate::model::{HookList, HookParams, HookRevision, SupportedEvents};

pub struct WebhookClient {
    inner: ComponentClient,
}

#[derive(Serialize)]
struct HookId {
    id: u32,
}

impl WebhookClient {
    pub fn new(factory: Arc<dyn ChannelFactory>) -> Self {
        Self {
            inner: ComponentClient::new("Webhook", factory),
        }
    }

    /// Events hooks can subscribe to, with their attributes.
    pub async fn list_supported(
        &self,
        cancel: &CancellationToken,
    ) -> Result<SupportedEvents, CoreError> {
        let reply = self.inner.request(cancel, "ListSupported", None).await?;
        Ok(reply.result)
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<HookList, CoreError> {
        let reply = self.inner.request(cancel, "List", None).await?;
        Ok(reply.result)
    }

    /// Register a hook. `cid`, `event` and at least one URL are required.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        params: &HookParams,
    ) -> Result<HookRevision, CoreError> {
        if params.event.as_deref().is_none_or(str::is_empty) {
            return Err(CoreError::validation("event", "a hook needs an event"));
        }
        if params.cid.is_none() {
            return Err(CoreError::validation("cid", "a hook needs a component id"));
        }
        if params.urls.as_ref().is_none_or(Vec::is_empty) {
            return Err(CoreError::validation("urls", "a hook needs at least one url"));
        }
        let reply = self
            .inner
            .request(cancel, "Create", Some(to_params(params)?))
            .await?;
        Ok(reply.result)
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        params: &HookParams,
    ) -> Result<HookRevision, CoreError> {
        if params.id.is_none() {
            return Err(CoreError::validation("id", "updating a hook requires its id"));
        }
        let reply = self
            .inner
            .request(cancel, "Update", Some(to_params(params)?))
            .await?;
        Ok(reply.result)
    }

    pub async fn delete(&self, cancel: &CancellationToken, id: u32) -> Result<HookRevision, CoreError> {
        let reply = self
            .inner
            .request(cancel, "Delete", Some(to_params(&HookId { id })?))
            .await?;
        Ok(reply.result)
    }

    pub async fn delete_all(&self, cancel: &CancellationToken) -> Result<HookRevision, CoreError> {
        let reply = self.inner.request(cancel, "DeleteAll", None).await?;
        Ok(reply.result)
    }

    pub fn rpc(&self) -> &ComponentClient {
        &self.inner
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }
}
