// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The active rendering device, as far as capability queries go.
use std::fmt::Formatter;

use crate::capabilities::catalogue::{Capability, CapabilityValue};
use crate::entry_point::EntryPoint;
use crate::imp;

/// Anything that can answer capability queries synchronously.
///
/// Returning `None` means the device does not support the capability.
pub trait DeviceQuery {
    fn query(&self, capability: &Capability) -> Option<CapabilityValue>;
}

///Cross-platform device
#[derive(Debug, Clone)]
pub struct Device(pub(crate) imp::Device);

#[derive(Debug)]
pub struct PickError(imp::Error);
impl std::fmt::Display for PickError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for PickError {}

impl Device {
    ///Pick the default device for the entry point
    pub async fn pick(entry_point: &EntryPoint) -> Result<Device, PickError> {
        imp::Device::pick(entry_point)
            .await
            .map(Device)
            .map_err(PickError)
    }

    /// Like [Self::pick], but drives the pick to completion on the calling thread.
    pub fn pick_blocking(entry_point: &EntryPoint) -> Result<Device, PickError> {
        test_executors::sleep_on(Self::pick(entry_point))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl DeviceQuery for Device {
    fn query(&self, capability: &Capability) -> Option<CapabilityValue> {
        self.0.query(capability.param, capability.kind)
    }
}
