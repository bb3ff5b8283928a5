// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Reads the declared slot layout of a host class.

use crate::host::{HostClass, HostModule};
use std::sync::Arc;

/// A class's slot names, in declaration order, as read at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    class: String,
    names: Vec<String>,
}

impl SlotTable {
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Zero-based position of the slot called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// The host module's shape is not what the native layer was built against.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("host module '{module}' does not define class '{class}'")]
    MissingClass { module: String, class: String },
    #[error("class '{class}' has no inspectable slot layout")]
    NoLayout { class: String },
}

pub fn inspect(class: &HostClass) -> Result<SlotTable, SchemaError> {
    let layout = class.layout().ok_or_else(|| SchemaError::NoLayout {
        class: class.name().to_string(),
    })?;
    Ok(SlotTable {
        class: class.name().to_string(),
        names: layout.to_vec(),
    })
}

/// Finds `name` in `module` and inspects it.
pub fn inspect_in(
    module: &HostModule,
    name: &str,
) -> Result<(Arc<HostClass>, SlotTable), SchemaError> {
    let class = module
        .class(name)
        .ok_or_else(|| SchemaError::MissingClass {
            module: module.name().to_string(),
            class: name.to_string(),
        })?;
    let table = inspect(class)?;
    Ok((class.clone(), table))
}
