// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
mod device;
mod entry_point;
mod error;

pub use device::Device;
pub use entry_point::EntryPoint;
pub(crate) use error::Error;
