// ── Configuration orchestrator ──
//
// Applies a `CompositeConfig` one component at a time, in dispatch order.
// A failing component is recorded and the walk continues; nothing is
// rolled back. Network components go last so a change to WiFi or
// Ethernet cannot cut the channel before the rest has been applied.

use shelly_api::{AuthParams, CancellationToken, SetReport};
use tracing::{debug, info, warn};

use crate::composite::{CompositeConfig, CompositeReport};
use crate::config::ApplyOptions;
use crate::device::Device;
use crate::error::{AggregateError, CoreError, Target};
use crate::model::Indexed;
use crate::slot::{Slot, SlotKind};

/// Result of applying a composite config: what succeeded and what failed.
#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    pub report: CompositeReport,
    /// Empty when every attempted component succeeded.
    pub errors: AggregateError,
    /// Set by [`Device::apply_config`] when it issued `Shelly.Reboot`.
    pub rebooted: bool,
}

impl ApplyOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn restart_required(&self) -> bool {
        self.report.restart_required
    }

    /// The report when nothing failed, otherwise the aggregate error.
    pub fn into_result(self) -> Result<CompositeReport, AggregateError> {
        self.errors.into_result().map(|()| self.report)
    }
}

/// Reject a repeatable config whose embedded id names another instance.
fn check_index<C: Indexed>(slot: Slot, config: &C) -> Result<(), CoreError> {
    let index = slot.index.unwrap_or_default();
    match config.id() {
        Some(id) if usize::try_from(id).ok() != Some(index) => Err(CoreError::validation(
            "id",
            format!("{slot} config carries id {id}"),
        )),
        _ => Ok(()),
    }
}

impl Device {
    /// Apply every present slot of `config`.
    ///
    /// Dispatch is sequential and never stops early. `restart_required`
    /// on the report is the OR over successful components. A cancelled
    /// token is handed to each remaining call; the channel decides
    /// whether those fail too.
    pub async fn set_config(
        &self,
        cancel: &CancellationToken,
        config: &CompositeConfig,
    ) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        for slot in config.slots() {
            debug!(%slot, "applying component config");
            match self.apply_slot(cancel, config, slot).await {
                Ok(report) => outcome.report.record(slot, report),
                Err(error) => {
                    warn!(%slot, %error, "component config failed");
                    outcome.errors.push(slot, error);
                }
            }
        }

        info!(
            applied = outcome.report.len(),
            failed = outcome.errors.len(),
            restart_required = outcome.report.restart_required,
            "configuration applied"
        );
        outcome
    }

    /// [`set_config`](Self::set_config), then act on `restart_required`:
    /// reboot when `auto_reboot` is set, otherwise warn. A failed reboot
    /// is recorded under `Reboot`.
    pub async fn apply_config(
        &self,
        cancel: &CancellationToken,
        config: &CompositeConfig,
        options: ApplyOptions,
    ) -> ApplyOutcome {
        let mut outcome = self.set_config(cancel, config).await;
        if !outcome.report.restart_required {
            return outcome;
        }

        if options.auto_reboot {
            info!("restart required, rebooting device");
            match self.shelly().reboot(cancel).await {
                Ok(()) => outcome.rebooted = true,
                Err(error) => {
                    warn!(%error, "reboot failed");
                    outcome.errors.push(Target::Reboot, error);
                }
            }
        } else {
            warn!("restart required for the new configuration to take effect");
        }
        outcome
    }

    async fn apply_slot(
        &self,
        cancel: &CancellationToken,
        config: &CompositeConfig,
        slot: Slot,
    ) -> Result<SetReport, CoreError> {
        let index = slot.index.unwrap_or_default();
        let missing = || CoreError::validation("slot", format!("{slot} is empty"));

        match slot.kind {
            SlotKind::Sys => {
                let c = config.sys.as_ref().ok_or_else(missing)?;
                self.sys().set_config(cancel, c).await
            }
            SlotKind::Ble => {
                let c = config.ble.as_ref().ok_or_else(missing)?;
                self.bluetooth().set_config(cancel, c).await
            }
            SlotKind::Cloud => {
                let c = config.cloud.as_ref().ok_or_else(missing)?;
                self.cloud().set_config(cancel, c).await
            }
            SlotKind::Mqtt => {
                let c = config.mqtt.as_ref().ok_or_else(missing)?;
                self.mqtt().set_config(cancel, c).await
            }
            SlotKind::Switch => {
                let c = config.switch.get(index).ok_or_else(missing)?;
                check_index(slot, c)?;
                self.switch().set_config(cancel, index, c).await
            }
            SlotKind::Light => {
                let c = config.light.get(index).ok_or_else(missing)?;
                check_index(slot, c)?;
                self.light().set_config(cancel, index, c).await
            }
            SlotKind::Input => {
                let c = config.input.get(index).ok_or_else(missing)?;
                check_index(slot, c)?;
                self.input().set_config(cancel, index, c).await
            }
            SlotKind::Ws => {
                let c = config.ws.as_ref().ok_or_else(missing)?;
                self.websocket().set_config(cancel, c).await
            }
            SlotKind::Auth => {
                let c = config.auth.as_ref().ok_or_else(missing)?;
                let params = AuthParams {
                    user: c.user.clone(),
                    realm: c.realm.clone(),
                    ha1: c.pass.clone(),
                };
                self.shelly().set_auth(cancel, params).await
            }
            SlotKind::Eth => {
                let c = config.eth.as_ref().ok_or_else(missing)?;
                self.ethernet().set_config(cancel, c).await
            }
            SlotKind::Wifi => {
                let c = config.wifi.as_ref().ok_or_else(missing)?;
                self.wifi().set_config(cancel, c).await
            }
        }
    }
}
