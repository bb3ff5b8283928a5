// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Takes instance construction away from host code.
//!
//! Once a class's constructor is removed, [InstanceBuilder] is the only way to produce
//! instances, and it only hands out instances whose every slot has been populated.

use crate::bindings::binder::{Field, SlotBinding};
use crate::host::{HostClass, Instance};
use crate::value::Value;
use std::sync::Arc;

pub fn remove_constructor(class: &HostClass) {
    class.remove_constructor();
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FactoryError {
    #[error("'{class}' instance is missing fields {missing:?}")]
    Incomplete {
        class: String,
        missing: Vec<&'static str>,
    },
    #[error("field does not belong to class '{class}'")]
    ForeignField { class: String },
}

/// Native factory for a bound class.
#[derive(Debug)]
pub struct InstanceBuilder<'a> {
    binding: &'a SlotBinding,
    values: Vec<Value>,
}

impl SlotBinding {
    pub fn builder(&self) -> InstanceBuilder<'_> {
        InstanceBuilder {
            binding: self,
            values: vec![Value::Unset; self.len()],
        }
    }
}

impl InstanceBuilder<'_> {
    pub fn set(&mut self, field: Field, value: Value) -> Result<&mut Self, FactoryError> {
        if !field.belongs_to(self.binding.class()) {
            return Err(FactoryError::ForeignField {
                class: self.binding.class().name().to_string(),
            });
        }
        self.values[field.offset()] = value;
        Ok(self)
    }

    /// Produces the instance, provided every slot was set.
    pub fn finish(self) -> Result<Arc<Instance>, FactoryError> {
        let missing: Vec<&'static str> = self
            .binding
            .fields()
            .filter(|(_, field)| self.values[field.offset()].is_unset())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(FactoryError::Incomplete {
                class: self.binding.class().name().to_string(),
                missing,
            });
        }
        let instance = Instance::allocate(self.binding.class().clone());
        for (offset, value) in self.values.into_iter().enumerate() {
            instance.store(offset, value);
        }
        Ok(Arc::new(instance))
    }
}
