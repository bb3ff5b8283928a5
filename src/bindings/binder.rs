// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Resolves contracted field names to slot offsets.

Discovery happens once, here.  Everything downstream reads and writes instances through the
resulting [Field]s, by offset, and never looks a name up again.  Native code trusts those
offsets unconditionally, so a binding is either total and exact or it does not exist.
*/

use crate::bindings::contract::{ClassContract, FieldSpec};
use crate::bindings::inspector::SlotTable;
use crate::host::{HostClass, Instance};
use crate::value::Value;
use std::sync::Arc;

/// The native contract and the host class have drifted apart.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindingError {
    #[error("class '{class}' does not declare slot '{slot}' for field '{field}'")]
    MissingField {
        class: String,
        field: &'static str,
        slot: String,
    },
    #[error(
        "class '{class}' declares {declared} slots but {expected} are expected (undeclared: {undeclared:?})"
    )]
    SlotCountMismatch {
        class: String,
        declared: usize,
        expected: usize,
        undeclared: Vec<String>,
    },
}

/// A [Field] was used on an instance of a class it was not resolved for.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("field of another class used on a '{class}' instance")]
pub struct ForeignFieldError {
    pub class: String,
}

/// A resolved slot of a bound class.
///
/// Holding a `Field` is the capability to write that slot from native code, regardless of any
/// protection host code is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    //HostClass::id of the owner
    owner: u64,
    offset: usize,
}

impl Field {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn belongs_to(&self, class: &HostClass) -> bool {
        self.owner == class.id()
    }

    fn check(&self, instance: &Instance) -> Result<(), ForeignFieldError> {
        if self.belongs_to(instance.class()) {
            Ok(())
        } else {
            Err(ForeignFieldError {
                class: instance.class().name().to_string(),
            })
        }
    }

    /// Native read.
    pub fn read(&self, instance: &Instance) -> Result<Value, ForeignFieldError> {
        self.check(instance)?;
        Ok(instance.load(self.offset))
    }

    /// Native write, bypassing host-level protection.
    pub fn write(&self, instance: &Instance, value: Value) -> Result<(), ForeignFieldError> {
        self.check(instance)?;
        instance.store(self.offset, value);
        Ok(())
    }
}

/// The name-to-offset map of one bound class.  Immutable once built.
#[derive(Debug, Clone)]
pub struct SlotBinding {
    class: Arc<HostClass>,
    //contract order
    entries: Vec<(FieldSpec, Field)>,
}

impl SlotBinding {
    pub fn class(&self) -> &Arc<HostClass> {
        &self.class
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<Field> {
        self.entries
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(_, field)| *field)
    }

    pub fn offset(&self, name: &str) -> Option<usize> {
        self.field(name).map(|f| f.offset)
    }

    /// `(logical name, field)` pairs, in contract order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Field)> + '_ {
        self.entries.iter().map(|(spec, field)| (spec.name(), *field))
    }

    /// Slot names of the contract's protected fields.
    pub(crate) fn protected_slot_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(spec, _)| spec.is_protected())
            .map(|(spec, _)| spec.slot_name(self.class.name()))
            .collect()
    }
}

/// Binds `contract` against `class`, whose layout was read into `table`.
///
/// Every contracted field must resolve, and the class must declare nothing else.
pub fn bind(
    class: &Arc<HostClass>,
    table: &SlotTable,
    contract: &ClassContract,
) -> Result<SlotBinding, BindingError> {
    let owner = class.id();
    let mut entries = Vec::with_capacity(contract.len());
    for spec in contract.fields() {
        let slot = spec.slot_name(table.class());
        let offset = table
            .position(&slot)
            .ok_or_else(|| BindingError::MissingField {
                class: table.class().to_string(),
                field: spec.name(),
                slot: slot.clone(),
            })?;
        entries.push((*spec, Field { owner, offset }));
    }
    if table.len() != contract.len() {
        let undeclared = table
            .names()
            .iter()
            .enumerate()
            .filter(|(i, _)| entries.iter().all(|(_, f)| f.offset != *i))
            .map(|(_, n)| n.clone())
            .collect();
        return Err(BindingError::SlotCountMismatch {
            class: table.class().to_string(),
            declared: table.len(),
            expected: contract.len(),
            undeclared,
        });
    }
    Ok(SlotBinding {
        class: class.clone(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::contract::{ClassKind, FieldSpec};
    use crate::bindings::inspector::inspect;

    fn plain_contract() -> ClassContract {
        ClassContract::new(
            "Buffer",
            [
                FieldSpec::public("mglo"),
                FieldSpec::public("size").protected(),
                FieldSpec::public("extra"),
            ],
        )
    }

    fn bind_class(class: &Arc<HostClass>, contract: &ClassContract) -> Result<SlotBinding, BindingError> {
        bind(class, &inspect(class).unwrap(), contract)
    }

    #[test]
    fn offsets_follow_declaration_order() {
        let class = HostClass::new("Buffer", ["extra", "mglo", "size"]);
        let binding = bind_class(&class, &plain_contract()).unwrap();
        assert_eq!(binding.offset("mglo"), Some(1));
        assert_eq!(binding.offset("size"), Some(2));
        assert_eq!(binding.offset("extra"), Some(0));
        assert_eq!(binding.len(), 3);
    }

    #[test]
    fn every_permutation_addresses_the_same_field() {
        let orders = [
            ["mglo", "size", "extra"],
            ["mglo", "extra", "size"],
            ["size", "mglo", "extra"],
            ["size", "extra", "mglo"],
            ["extra", "mglo", "size"],
            ["extra", "size", "mglo"],
        ];
        for order in orders {
            let class = HostClass::new("Buffer", order);
            let binding = bind_class(&class, &plain_contract()).unwrap();
            let instance = class.instantiate().unwrap();
            binding.field("mglo").unwrap().write(&instance, Value::Handle(7)).unwrap();
            binding.field("size").unwrap().write(&instance, Value::Int(64)).unwrap();
            binding.field("extra").unwrap().write(&instance, Value::None).unwrap();

            assert_eq!(instance.get_attr("mglo"), Ok(Value::Handle(7)), "{order:?}");
            assert_eq!(instance.get_attr("size"), Ok(Value::Int(64)), "{order:?}");
            assert_eq!(instance.get_attr("extra"), Ok(Value::None), "{order:?}");
        }
    }

    #[test]
    fn missing_field_fails() {
        let class = HostClass::new("Buffer", ["mglo", "extra"]);
        assert_eq!(
            bind_class(&class, &plain_contract()).unwrap_err(),
            BindingError::MissingField {
                class: "Buffer".to_string(),
                field: "size",
                slot: "size".to_string()
            }
        );
    }

    #[test]
    fn missing_field_fails_even_with_matching_count() {
        let class = HostClass::new("Buffer", ["mglo", "extra", "bytes"]);
        assert!(matches!(
            bind_class(&class, &plain_contract()),
            Err(BindingError::MissingField { field: "size", .. })
        ));
    }

    #[test]
    fn extra_slot_fails() {
        let class = HostClass::new("Buffer", ["mglo", "size", "extra", "__weakref__"]);
        assert_eq!(
            bind_class(&class, &plain_contract()).unwrap_err(),
            BindingError::SlotCountMismatch {
                class: "Buffer".to_string(),
                declared: 4,
                expected: 3,
                undeclared: vec!["__weakref__".to_string()],
            }
        );
    }

    #[test]
    fn private_fields_use_mangled_slots() {
        let class = HostClass::new("Buffer", ["_Buffer__mglo", "size", "extra"]);
        let binding = bind_class(&class, &ClassKind::Buffer.contract()).unwrap();
        assert_eq!(binding.offset("mglo"), Some(0));
        assert_eq!(binding.protected_slot_names(), ["size"]);

        //unmangled name is drift
        let class = HostClass::new("Buffer", ["mglo", "size", "extra"]);
        assert!(matches!(
            bind_class(&class, &ClassKind::Buffer.contract()),
            Err(BindingError::MissingField { field: "mglo", .. })
        ));
    }

    #[test]
    fn foreign_field_is_rejected() {
        let a = HostClass::new("Buffer", ["mglo", "size", "extra"]);
        let b = HostClass::new("Buffer", ["mglo", "size", "extra"]);
        let binding = bind_class(&a, &plain_contract()).unwrap();
        let instance = b.instantiate().unwrap();
        assert_eq!(
            binding.field("size").unwrap().read(&instance),
            Err(ForeignFieldError {
                class: "Buffer".to_string()
            })
        );
        assert!(binding.field("size").unwrap().write(&instance, Value::Int(1)).is_err());
        //rejected write left the slot untouched
        assert!(matches!(
            instance.get_attr("size"),
            Err(crate::host::AttributeError::Unset { .. })
        ));
    }

    #[test]
    fn field_outliving_its_class_matches_nothing() {
        let stale = {
            let class = HostClass::new("Buffer", ["mglo", "size", "extra"]);
            let binding = bind_class(&class, &plain_contract()).unwrap();
            binding.field("extra").unwrap()
        };
        //allocations after the drop may land at the old address
        for _ in 0..64 {
            let other = HostClass::new("Other", ["x", "y", "z"]);
            let instance = other.instantiate().unwrap();
            assert!(stale.write(&instance, Value::Int(99)).is_err());
            assert!(stale.read(&instance).is_err());
            assert!(instance.get_attr("z").is_err());

            let short = HostClass::new("Short", ["x"]);
            let instance = short.instantiate().unwrap();
            assert!(stale.write(&instance, Value::Int(99)).is_err());
        }
    }
}
