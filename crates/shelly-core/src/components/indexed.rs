// ── Repeatable component clients ──
//
// Switch, Light and Input exist as numbered instances. Every call carries
// the instance `id`; `SetConfig` sends `{ "id": n, "config": {...} }`.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shelly_api::{CancellationToken, ChannelFactory, ComponentClient, SetReport, to_params};

use super::single::ConfigParams;
use crate::error::CoreError;
use crate::model::{
    InputConfig, InputStatus, LightConfig, LightStatus, SwitchConfig, SwitchStatus, SwitchToggle,
};

#[derive(Serialize)]
struct IdParams {
    id: usize,
}

/// Client for a repeatable component with config type `C` and status `S`.
pub struct IndexedClient<C, S> {
    inner: ComponentClient,
    _types: PhantomData<fn() -> (C, S)>,
}

impl<C, S> IndexedClient<C, S>
where
    C: Serialize + DeserializeOwned,
    S: DeserializeOwned,
{
    pub fn new(component: &'static str, factory: Arc<dyn ChannelFactory>) -> Self {
        Self {
            inner: ComponentClient::new(component, factory),
            _types: PhantomData,
        }
    }

    pub async fn get_config(&self, cancel: &CancellationToken, id: usize) -> Result<C, CoreError> {
        let params = to_params(&IdParams { id })?;
        let reply = self.inner.request(cancel, "GetConfig", Some(params)).await?;
        Ok(reply.result)
    }

    pub async fn get_status(&self, cancel: &CancellationToken, id: usize) -> Result<S, CoreError> {
        let params = to_params(&IdParams { id })?;
        let reply = self.inner.request(cancel, "GetStatus", Some(params)).await?;
        Ok(reply.result)
    }

    pub async fn set_config(
        &self,
        cancel: &CancellationToken,
        id: usize,
        config: &C,
    ) -> Result<SetReport, CoreError> {
        let params = to_params(&ConfigParams {
            id: Some(id),
            config,
        })?;
        Ok(self.inner.set_config(cancel, params).await?)
    }

    /// Flip the output of instance `id`. Not every kind supports it.
    async fn toggle_output(
        &self,
        cancel: &CancellationToken,
        id: usize,
    ) -> Result<Option<SwitchToggle>, CoreError> {
        let params = to_params(&IdParams { id })?;
        let reply = self.inner.execute(cancel, "Toggle", Some(params)).await?;
        Ok(reply.result)
    }

    pub fn rpc(&self) -> &ComponentClient {
        &self.inner
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }
}

pub type SwitchClient = IndexedClient<SwitchConfig, SwitchStatus>;
pub type LightClient = IndexedClient<LightConfig, LightStatus>;
pub type InputClient = IndexedClient<InputConfig, InputStatus>;

// ── Switch actions ───────────────────────────────────────────────────

#[derive(Serialize)]
struct SwitchSetParams {
    id: usize,
    on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    toggle_after: Option<f64>,
}

impl IndexedClient<SwitchConfig, SwitchStatus> {
    /// Turn the output on or off, optionally flipping back after
    /// `toggle_after` seconds. Returns the previous state when reported.
    pub async fn set(
        &self,
        cancel: &CancellationToken,
        id: usize,
        on: bool,
        toggle_after: Option<f64>,
    ) -> Result<Option<bool>, CoreError> {
        let params = to_params(&SwitchSetParams {
            id,
            on,
            toggle_after,
        })?;
        let reply = self
            .inner
            .execute::<SwitchToggle>(cancel, "Set", Some(params))
            .await?;
        Ok(reply.result.and_then(|r| r.was_on))
    }

    pub async fn toggle(
        &self,
        cancel: &CancellationToken,
        id: usize,
    ) -> Result<Option<bool>, CoreError> {
        Ok(self.toggle_output(cancel, id).await?.and_then(|r| r.was_on))
    }
}

// ── Light actions ────────────────────────────────────────────────────

/// Parameters of `Light.Set`. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LightSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_after: Option<f64>,
}

#[derive(Serialize)]
struct LightSetParams<'a> {
    id: usize,
    #[serde(flatten)]
    set: &'a LightSet,
}

impl IndexedClient<LightConfig, LightStatus> {
    pub async fn set(
        &self,
        cancel: &CancellationToken,
        id: usize,
        set: &LightSet,
    ) -> Result<(), CoreError> {
        let params = to_params(&LightSetParams { id, set })?;
        self.inner
            .execute::<serde_json::Value>(cancel, "Set", Some(params))
            .await?;
        Ok(())
    }

    pub async fn toggle(&self, cancel: &CancellationToken, id: usize) -> Result<(), CoreError> {
        self.toggle_output(cancel, id).await?;
        Ok(())
    }
}
