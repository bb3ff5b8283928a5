/*! slots_and_limits is the native side of a host-language graphics binding.

The host package defines its resource classes (contexts, buffers, textures, programs...) as
classes with a fixed, ordered list of named slots.  The native layer needs to create and fill
instances of those classes quickly, and needs some of their fields to be read-only from host code.
This crate does that binding once, at module initialization, and then gets out of the way.

# Binding

Host attribute access goes by name.  That is fine for host code but too slow for a native
layer that populates thousands of objects, so each class is bound once:

| Step     | Module                             | Result                                      |
|----------|------------------------------------|---------------------------------------------|
| Inspect  | [bindings::inspector]              | the class's declared slot layout            |
| Bind     | [bindings::binder]                 | one [bindings::Field] (slot offset) per contracted field |
| Protect  | [bindings::protector]              | host writes to native-owned fields fail     |
| Lock     | [bindings::constructor]            | host construction fails; only the native factory makes instances |

A host class that drifted from what the native layer expects (a slot renamed, added, or removed)
fails to bind, and initialization reports which class and field, instead of
writing into the wrong slot later.

# Capabilities

Each context carries a capability record: roughly a hundred device limits, queried from the
device once, stored in an instance of the host's `Limits` class, and read-only from then on.
See [capabilities].  Capabilities the device does not report are stored as the host's `None`,
never as zero.

# Backends

Device queries go through [device::DeviceQuery].  The default `backend_wgpu` feature answers them
from a [wgpu](https://wgpu.rs) adapter; without it, every capability is unsupported.

# Initialization

[init::ensure_initialized] runs the whole sequence at most once per process.  Everything it
produces lives in an immutable [init::Module].
*/

pub mod bindings;
pub mod capabilities;
pub mod device;
mod entry_point;
pub mod host;
mod imp;
pub mod init;
pub mod value;

pub use device::{Device, DeviceQuery, PickError};
pub use entry_point::{EntryPoint, EntryPointError};
pub use init::{InitError, InitGuard, InitOptions, Module, ensure_initialized};
pub use value::Value;
