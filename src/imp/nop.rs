// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Backend used when no GPU backend is compiled in.  The device it picks supports nothing.
use crate::capabilities::catalogue::{CapabilityKind, CapabilityValue};
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct EntryPoint;
impl EntryPoint {
    pub async fn new() -> Result<Self, Error> {
        Ok(EntryPoint)
    }
}

#[derive(Debug, Clone)]
pub struct Device;

impl Device {
    pub async fn pick(_entry_point: &crate::entry_point::EntryPoint) -> Result<Device, Error> {
        Ok(Device)
    }

    pub fn name(&self) -> &str {
        "nop"
    }

    pub fn query(&self, _param: u32, _kind: CapabilityKind) -> Option<CapabilityValue> {
        None
    }
}

#[derive(Debug)]
pub(crate) enum Error {}

impl Display for Error {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}
