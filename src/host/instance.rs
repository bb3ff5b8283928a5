// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::host::HostClass;
use crate::value::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// An instance of a [`HostClass`].
///
/// Storage is a fixed-size record with one cell per declared slot.  Each cell has its own lock,
/// so a write either lands completely or not at all, and readers never see a torn value.
#[derive(Debug)]
pub struct Instance {
    class: Arc<HostClass>,
    slots: Box<[RwLock<Value>]>,
}

/// Host code assigned an attribute the native layer owns.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("attribute '{name}' of '{class}' objects is not writable")]
pub struct ReadOnlyError {
    pub class: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttributeError {
    #[error("'{class}' object has no attribute '{name}'")]
    NoSuchAttribute { class: String, name: String },
    #[error("'{class}' object attribute '{name}' is not set")]
    Unset { class: String, name: String },
    #[error(transparent)]
    ReadOnly(#[from] ReadOnlyError),
}

impl Instance {
    pub(crate) fn allocate(class: Arc<HostClass>) -> Self {
        let slots = (0..class.slot_count())
            .map(|_| RwLock::new(Value::Unset))
            .collect();
        Instance { class, slots }
    }

    pub fn class(&self) -> &Arc<HostClass> {
        &self.class
    }

    fn resolve(&self, name: &str) -> Result<usize, AttributeError> {
        self.class
            .slot_index(name)
            .ok_or_else(|| AttributeError::NoSuchAttribute {
                class: self.class.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Host-level read by attribute name.
    pub fn get_attr(&self, name: &str) -> Result<Value, AttributeError> {
        let index = self.resolve(name)?;
        let value = self.load(index);
        if value.is_unset() {
            return Err(AttributeError::Unset {
                class: self.class.name().to_string(),
                name: name.to_string(),
            });
        }
        Ok(value)
    }

    /// Host-level assignment by attribute name.
    ///
    /// Protected slots reject the write and keep their previous value.
    pub fn set_attr(&self, name: &str, value: Value) -> Result<(), AttributeError> {
        let index = self.resolve(name)?;
        if self.class.is_protected(index) {
            return Err(ReadOnlyError {
                class: self.class.name().to_string(),
                name: name.to_string(),
            }
            .into());
        }
        self.store(index, value);
        Ok(())
    }

    /// Native read by offset.
    pub(crate) fn load(&self, offset: usize) -> Value {
        self.slots[offset]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Native write by offset.  Not subject to protection.
    pub(crate) fn store(&self, offset: usize, value: Value) {
        *self.slots[offset]
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_class() -> Arc<HostClass> {
        HostClass::new("Buffer", ["_Buffer__mglo", "size", "extra"])
    }

    #[test]
    fn fresh_slots_are_unset() {
        let instance = buffer_class().instantiate().unwrap();
        assert_eq!(
            instance.get_attr("size"),
            Err(AttributeError::Unset {
                class: "Buffer".to_string(),
                name: "size".to_string()
            })
        );
    }

    #[test]
    fn host_roundtrip_by_name() {
        let instance = buffer_class().instantiate().unwrap();
        instance.set_attr("extra", Value::Int(5)).unwrap();
        assert_eq!(instance.get_attr("extra"), Ok(Value::Int(5)));
        assert_eq!(instance.load(2), Value::Int(5));
    }

    #[test]
    fn unknown_attribute() {
        let instance = buffer_class().instantiate().unwrap();
        assert!(matches!(
            instance.set_attr("mglo", Value::None),
            Err(AttributeError::NoSuchAttribute { .. })
        ));
    }

    #[test]
    fn protected_slot_keeps_value() {
        let class = buffer_class();
        let instance = class.instantiate().unwrap();
        instance.store(1, Value::Int(1024));
        class.protect_slot(1);

        let err = instance.set_attr("size", Value::Int(0)).unwrap_err();
        assert_eq!(
            err,
            AttributeError::ReadOnly(ReadOnlyError {
                class: "Buffer".to_string(),
                name: "size".to_string()
            })
        );
        assert_eq!(instance.get_attr("size"), Ok(Value::Int(1024)));

        //native path still writes
        instance.store(1, Value::Int(2048));
        assert_eq!(instance.get_attr("size"), Ok(Value::Int(2048)));
    }

    #[test]
    fn concurrent_rejected_writes_never_tear() {
        use std::thread;
        let class = buffer_class();
        let instance = class.instantiate().unwrap();
        instance.store(1, Value::pair_i64(640, 480));
        class.protect_slot(1);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let instance = instance.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(instance.set_attr("size", Value::pair_i64(i, i)).is_err());
                        assert_eq!(instance.get_attr("size"), Ok(Value::pair_i64(640, 480)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
