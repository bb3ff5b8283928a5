// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Makes bound fields read-only for host code.
//!
//! Protected fields mirror state the native layer caches (a buffer's size, a program's reflected
//! uniforms, the device limits).  Host assignment to them fails with
//! [ReadOnlyError](crate::host::ReadOnlyError); native writes through a
//! [Field](crate::bindings::Field) are unaffected.

use crate::host::{AttributeError, HostClass};

/// Protects the named slots of `class`.
///
/// All names are resolved before any slot is protected, so an unknown name leaves the class as
/// it was.
pub fn protect<'a>(
    class: &HostClass,
    slot_names: impl IntoIterator<Item = &'a str>,
) -> Result<(), AttributeError> {
    let indices = slot_names
        .into_iter()
        .map(|name| {
            class
                .slot_index(name)
                .ok_or_else(|| AttributeError::NoSuchAttribute {
                    class: class.name().to_string(),
                    name: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    for index in indices {
        class.protect_slot(index);
    }
    Ok(())
}

/// Protects every declared slot of `class`.
pub fn protect_all_slots(class: &HostClass) {
    for index in 0..class.slot_count() {
        class.protect_slot(index);
    }
}
