// shelly-core: Component catalog and configuration orchestration for Gen2 devices.
//
// Sits between `shelly-api` (envelopes and the channel seam) and whatever
// front end drives a device. `Device` hands out one typed client per
// component; `Device::set_config` applies a `CompositeConfig` in a fixed
// order and reports per-component outcomes.

pub mod components;
pub mod composite;
pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod sample;
pub mod slot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use composite::{CompositeConfig, CompositeReport, Slots};
pub use config::{ApplyOptions, ConnectionSettings, DEFAULT_TIMEOUT};
pub use device::Device;
pub use error::{AggregateError, ComponentFailure, CoreError, ErrorKind, Target};
pub use orchestrator::ApplyOutcome;
pub use sample::example_config;
pub use slot::{SLOT_CAPACITY, Slot, SlotKind, dispatch_order};

pub use shelly_api::{AuthParams, CancellationToken, SetReport};
