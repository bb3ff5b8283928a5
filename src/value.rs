// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Dynamically typed values as the host environment stores them in slots.

use crate::host::Instance;
use std::sync::Arc;

/// A host value.
///
/// Every slot of a freshly allocated [`Instance`] starts out [`Value::Unset`].  Host code can never
/// observe an unset slot as a value; reading one is an attribute error.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The slot has never been written.
    #[default]
    Unset,
    /// The host's null value.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    /// An opaque handle to a native-side object, such as a buffer or a texture.
    Handle(u64),
    /// Another host instance.
    Object(Arc<Instance>),
}

impl Value {
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<Instance>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn pair_i64(a: i64, b: i64) -> Value {
        Value::Tuple(vec![Value::Int(a), Value::Int(b)])
    }

    pub fn pair_f64(a: f64, b: f64) -> Value {
        Value::Tuple(vec![Value::Float(a), Value::Float(b)])
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unset, Value::Unset) => true,
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            //instances compare by identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Arc<Instance>> for Value {
    fn from(value: Arc<Instance>) -> Self {
        Value::Object(value)
    }
}
