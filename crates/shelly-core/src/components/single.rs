// ── Singleton component clients ──
//
// Components with exactly one instance per device share the same
// `GetConfig` / `GetStatus` / `SetConfig` surface; only the component
// name and the document types differ.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shelly_api::{CancellationToken, ChannelFactory, ComponentClient, SetReport, to_params};

use crate::error::CoreError;
use crate::model::{
    ApClientList, BluetoothConfig, BluetoothStatus, CloudConfig, CloudStatus, EthernetConfig,
    EthernetStatus, MqttConfig, MqttStatus, SysConfig, SysStatus, WebsocketConfig,
    WebsocketStatus, WifiConfig, WifiNetwork, WifiScan, WifiStatus,
};

#[derive(Serialize)]
pub(crate) struct ConfigParams<'a, C> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub config: &'a C,
}

/// Client for a singleton component with config type `C` and status `S`.
pub struct ConfigClient<C, S> {
    inner: ComponentClient,
    _types: PhantomData<fn() -> (C, S)>,
}

impl<C, S> ConfigClient<C, S>
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

    pub async fn get_config(&self, cancel: &CancellationToken) -> Result<C, CoreError> {
        let reply = self.inner.request(cancel, "GetConfig", None).await?;
        Ok(reply.result)
    }

    pub async fn get_status(&self, cancel: &CancellationToken) -> Result<S, CoreError> {
        let reply = self.inner.request(cancel, "GetStatus", None).await?;
        Ok(reply.result)
    }

    pub async fn set_config(
        &self,
        cancel: &CancellationToken,
        config: &C,
    ) -> Result<SetReport, CoreError> {
        let params = to_params(&ConfigParams { id: None, config })?;
        Ok(self.inner.set_config(cancel, params).await?)
    }

    /// Underlying facade, for actions not modelled here.
    pub fn rpc(&self) -> &ComponentClient {
        &self.inner
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }
}

pub type SysClient = ConfigClient<SysConfig, SysStatus>;
pub type BluetoothClient = ConfigClient<BluetoothConfig, BluetoothStatus>;
pub type CloudClient = ConfigClient<CloudConfig, CloudStatus>;
pub type MqttClient = ConfigClient<MqttConfig, MqttStatus>;
pub type WebsocketClient = ConfigClient<WebsocketConfig, WebsocketStatus>;
pub type EthernetClient = ConfigClient<EthernetConfig, EthernetStatus>;
pub type WifiClient = ConfigClient<WifiConfig, WifiStatus>;

// ── WiFi extras ──────────────────────────────────────────────────────

impl ConfigClient<WifiConfig, WifiStatus> {
    /// Scan for nearby networks. Blocks for several seconds on the device.
    pub async fn scan(&self, cancel: &CancellationToken) -> Result<Vec<WifiNetwork>, CoreError> {
        let reply = self.inner.request::<WifiScan>(cancel, "Scan", None).await?;
        Ok(reply.result.results)
    }

    /// Clients attached to the device's own access point.
    pub async fn list_ap_clients(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ApClientList, CoreError> {
        let reply = self.inner.request(cancel, "ListAPClients", None).await?;
        Ok(reply.result)
    }
}
