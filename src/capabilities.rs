// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The device capability record.

Each context gets one record describing the device it renders with: about a hundred limits,
queried once, stored in an instance of the host's capability class, and read-only from then on.
*/

pub mod catalogue;
pub mod registry;

pub use catalogue::{CATALOGUE, Capability, CapabilityKind, CapabilityValue};
pub use registry::{CapabilityError, CapabilityRecord, build_capabilities};
