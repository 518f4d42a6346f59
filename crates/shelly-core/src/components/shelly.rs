// ── Shelly service client ──
//
// Device-wide operations: identity, whole-device config and status,
// firmware updates, resets, TLS material, and authentication.

use std::sync::Arc;

use serde::Serialize;
use shelly_api::{
    AuthParams, CancellationToken, ChannelFactory, ComponentClient, DEFAULT_USER, SetReport,
    SetResult, to_params,
};
use tracing::debug;

use crate::composite::CompositeConfig;
use crate::error::CoreError;
use crate::model::{
    AvailableUpdates, DeviceInfo, DeviceStatus, MethodList, TlsDataParams, UpdateParams,
};

pub struct ShellyClient {
    inner: ComponentClient,
}

#[derive(Serialize)]
struct DeviceInfoParams {
    ident: bool,
}

impl ShellyClient {
    pub fn new(factory: Arc<dyn ChannelFactory>) -> Self {
        Self {
            inner: ComponentClient::new("Shelly", factory),
        }
    }

    // ── Identity and inventory ───────────────────────────────────────

    pub async fn get_device_info(&self, cancel: &CancellationToken) -> Result<DeviceInfo, CoreError> {
        let reply = self.inner.request(cancel, "GetDeviceInfo", None).await?;
        Ok(reply.result)
    }

    /// Device info including the provisioning fields (`key`, `batch`,
    /// `fw_sbits`).
    pub async fn get_device_identity(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DeviceInfo, CoreError> {
        let params = to_params(&DeviceInfoParams { ident: true })?;
        let reply = self
            .inner
            .request(cancel, "GetDeviceInfo", Some(params))
            .await?;
        Ok(reply.result)
    }

    /// Methods the current caller may invoke.
    pub async fn list_methods(&self, cancel: &CancellationToken) -> Result<Vec<String>, CoreError> {
        let reply = self
            .inner
            .request::<MethodList>(cancel, "ListMethods", None)
            .await?;
        Ok(reply.result.methods)
    }

    pub async fn get_status(&self, cancel: &CancellationToken) -> Result<DeviceStatus, CoreError> {
        let reply = self.inner.request(cancel, "GetStatus", None).await?;
        Ok(reply.result)
    }

    /// Whole-device configuration. Components this crate does not model
    /// are dropped.
    pub async fn get_config(&self, cancel: &CancellationToken) -> Result<CompositeConfig, CoreError> {
        let reply = self
            .inner
            .request::<serde_json::Value>(cancel, "GetConfig", None)
            .await?;
        CompositeConfig::from_device_config(reply.result).map_err(|e| CoreError::Malformed {
            message: format!("Shelly.GetConfig: {e}"),
            body: String::new(),
        })
    }

    // ── Firmware ─────────────────────────────────────────────────────

    pub async fn check_for_update(
        &self,
        cancel: &CancellationToken,
    ) -> Result<AvailableUpdates, CoreError> {
        let reply = self.inner.request(cancel, "CheckForUpdate", None).await?;
        Ok(reply.result)
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        params: &UpdateParams,
    ) -> Result<(), CoreError> {
        let params = to_params(params)?;
        self.inner
            .execute::<serde_json::Value>(cancel, "Update", Some(params))
            .await?;
        Ok(())
    }

    // ── Resets ───────────────────────────────────────────────────────

    pub async fn reboot(&self, cancel: &CancellationToken) -> Result<(), CoreError> {
        self.inner
            .execute::<serde_json::Value>(cancel, "Reboot", None)
            .await?;
        Ok(())
    }

    pub async fn factory_reset(&self, cancel: &CancellationToken) -> Result<(), CoreError> {
        self.inner
            .execute::<serde_json::Value>(cancel, "FactoryReset", None)
            .await?;
        Ok(())
    }

    pub async fn reset_wifi_config(&self, cancel: &CancellationToken) -> Result<(), CoreError> {
        self.inner
            .execute::<serde_json::Value>(cancel, "ResetWiFiConfig", None)
            .await?;
        Ok(())
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Set or clear the device password through `Shelly.SetAuth`.
    ///
    /// A missing or empty realm is filled from the device id and a missing
    /// user defaults to `admin`. A cleartext `ha1` is hashed before sending;
    /// an existing digest is sent in lowercase. `ha1: None` disables
    /// authentication.
    pub async fn set_auth(
        &self,
        cancel: &CancellationToken,
        mut params: AuthParams,
    ) -> Result<SetReport, CoreError> {
        if params.realm.as_deref().is_none_or(str::is_empty) {
            let info = self.get_device_info(cancel).await?;
            debug!(realm = %info.id, "using device id as auth realm");
            params.realm = Some(info.id);
        }
        if params.user.as_deref().is_none_or(str::is_empty) {
            params.user = Some(DEFAULT_USER.to_owned());
        }
        params.normalize()?;

        let reply = self
            .inner
            .request::<SetResult>(cancel, "SetAuth", Some(to_params(&params)?))
            .await?;
        Ok(SetReport {
            src: reply.src,
            restart_required: reply.result.restart_required,
        })
    }

    // ── TLS material ─────────────────────────────────────────────────

    pub async fn put_user_ca(
        &self,
        cancel: &CancellationToken,
        params: &TlsDataParams,
    ) -> Result<(), CoreError> {
        self.put_tls(cancel, "PutUserCA", params).await
    }

    pub async fn put_tls_client_cert(
        &self,
        cancel: &CancellationToken,
        params: &TlsDataParams,
    ) -> Result<(), CoreError> {
        self.put_tls(cancel, "PutTLSClientCert", params).await
    }

    pub async fn put_tls_client_key(
        &self,
        cancel: &CancellationToken,
        params: &TlsDataParams,
    ) -> Result<(), CoreError> {
        self.put_tls(cancel, "PutTLSClientKey", params).await
    }

    async fn put_tls(
        &self,
        cancel: &CancellationToken,
        action: &str,
        params: &TlsDataParams,
    ) -> Result<(), CoreError> {
        let params = to_params(params)?;
        self.inner
            .execute::<serde_json::Value>(cancel, action, Some(params))
            .await?;
        Ok(())
    }

    pub fn rpc(&self) -> &ComponentClient {
        &self.inner
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }
}
