// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The host environment's object model.

Host classes declare an ordered list of named slots.  Host code reaches a slot by name, which costs
a lookup on every access.  The native layer resolves names to offsets once (see [crate::bindings])
and afterwards touches storage by offset only.
*/

mod class;
mod environment;
mod instance;

pub use class::{ConstructorError, HostClass};
pub use environment::{HostEnvironment, HostModule, ModuleRegistry};
pub use instance::{AttributeError, Instance, ReadOnlyError};
