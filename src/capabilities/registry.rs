// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::{FactoryError, SlotBinding};
use crate::capabilities::catalogue::CATALOGUE;
use crate::device::DeviceQuery;
use crate::host::Instance;
use crate::value::Value;
use std::sync::Arc;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CapabilityError {
    #[error("capability '{0}' has no slot in the bound class")]
    MissingSlot(&'static str),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

/// A populated, immutable capability record.
///
/// Reads go to the stored instance.  The device is never asked again.
#[derive(Debug, Clone)]
pub struct CapabilityRecord {
    binding: SlotBinding,
    instance: Arc<Instance>,
    unsupported: Vec<&'static str>,
}

impl CapabilityRecord {
    /// The host-visible instance.  Every slot is protected.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// The stored value, or `None` if `name` is not a catalogued capability.
    ///
    /// Capabilities the device does not support read as [Value::None].
    pub fn get(&self, name: &str) -> Option<Value> {
        self.binding
            .field(name)
            .and_then(|field| field.read(&self.instance).ok())
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_float()
    }

    /// A two-element capability, widened to floats.
    pub fn range(&self, name: &str) -> Option<[f64; 2]> {
        match self.get(name)? {
            Value::Tuple(items) => match items.as_slice() {
                [a, b] => Some([a.as_float()?, b.as_float()?]),
                _ => None,
            },
            _ => None,
        }
    }

    /// Every capability in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Value)> + '_ {
        self.binding
            .fields()
            .filter_map(|(name, field)| Some((name, field.read(&self.instance).ok()?)))
    }

    /// Capabilities the device did not report.
    pub fn unsupported(&self) -> &[&'static str] {
        &self.unsupported
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.binding.field(name).is_some() && !self.unsupported.contains(&name)
    }
}

/**
Queries `device` for every catalogued capability and stores the answers in a new instance of the
bound capability class.

The instance only comes into existence once every field is populated.  A capability the device
does not report, or reports in the wrong shape, is stored as [Value::None] so it can't be
mistaken for a reported zero.
*/
pub fn build_capabilities(
    binding: &SlotBinding,
    device: &dyn DeviceQuery,
) -> Result<CapabilityRecord, CapabilityError> {
    let mut builder = binding.builder();
    let mut unsupported = Vec::new();
    for capability in CATALOGUE {
        let field = binding
            .field(capability.name)
            .ok_or(CapabilityError::MissingSlot(capability.name))?;
        let value = match device.query(capability) {
            Some(v) if v.fits(capability.kind) => Value::from(v),
            Some(v) => {
                logwise::warn_sync!(
                    "capability {name} reported as {value}, expected {kind}",
                    name = logwise::privacy::LogIt(capability.name),
                    value = logwise::privacy::LogIt(&v),
                    kind = logwise::privacy::LogIt(&capability.kind)
                );
                unsupported.push(capability.name);
                Value::None
            }
            None => {
                unsupported.push(capability.name);
                Value::None
            }
        };
        builder.set(field, value)?;
    }
    let instance = builder.finish()?;
    if !unsupported.is_empty() {
        logwise::warn_sync!(
            "device does not report {count} capabilities: {names}",
            count = unsupported.len(),
            names = logwise::privacy::LogIt(&unsupported)
        );
    }
    Ok(CapabilityRecord {
        binding: binding.clone(),
        instance,
        unsupported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::protector::protect_all_slots;
    use crate::bindings::{ClassKind, binder::bind, inspector::inspect};
    use crate::capabilities::catalogue::{Capability, CapabilityKind, CapabilityValue};
    use crate::host::{AttributeError, HostClass};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Reports a fixed table and counts how often each capability is asked for.
    struct ScriptedDevice {
        answers: HashMap<&'static str, CapabilityValue>,
        asked: Mutex<HashMap<&'static str, usize>>,
    }

    impl ScriptedDevice {
        fn new(answers: impl IntoIterator<Item = (&'static str, CapabilityValue)>) -> Self {
            ScriptedDevice {
                answers: answers.into_iter().collect(),
                asked: Mutex::new(HashMap::new()),
            }
        }
    }

    impl DeviceQuery for ScriptedDevice {
        fn query(&self, capability: &Capability) -> Option<CapabilityValue> {
            *self.asked.lock().unwrap().entry(capability.name).or_default() += 1;
            self.answers.get(capability.name).copied()
        }
    }

    fn limits_binding() -> SlotBinding {
        //declared in reverse to make sure nothing depends on catalogue order
        let class = HostClass::new("Limits", CATALOGUE.iter().rev().map(|c| c.name));
        let binding = bind(&class, &inspect(&class).unwrap(), &ClassKind::Limits.contract()).unwrap();
        protect_all_slots(&class);
        binding
    }

    #[test]
    fn populates_every_field_once() {
        let device = ScriptedDevice::new([
            ("max_texture_size", CapabilityValue::Int(16384)),
            ("max_color_attachments", CapabilityValue::Int(8)),
            ("viewport_bounds_range", CapabilityValue::IntRange([-32768, 32767])),
            ("point_size_range", CapabilityValue::FloatRange([1.0, 2047.0])),
        ]);
        let record = build_capabilities(&limits_binding(), &device).unwrap();

        assert_eq!(record.int("max_texture_size"), Some(16384));
        assert_eq!(record.int("max_color_attachments"), Some(8));
        assert_eq!(
            record.get("viewport_bounds_range"),
            Some(Value::pair_i64(-32768, 32767))
        );
        assert_eq!(
            record.get("point_size_range"),
            Some(Value::pair_f64(1.0, 2047.0))
        );
        assert_eq!(record.range("viewport_bounds_range"), Some([-32768.0, 32767.0]));
        assert_eq!(record.range("max_texture_size"), None);

        //reading again never reaches the device
        for _ in 0..3 {
            assert_eq!(record.int("max_texture_size"), Some(16384));
            assert_eq!(record.iter().count(), CATALOGUE.len());
        }
        let asked = device.asked.lock().unwrap();
        assert_eq!(asked.len(), CATALOGUE.len());
        assert!(asked.values().all(|&n| n == 1));
    }

    #[test]
    fn unsupported_is_not_zero() {
        let device = ScriptedDevice::new([("max_samples", CapabilityValue::Int(0))]);
        let record = build_capabilities(&limits_binding(), &device).unwrap();
        assert_eq!(record.get("max_samples"), Some(Value::Int(0)));
        assert!(record.is_supported("max_samples"));
        assert_eq!(record.get("max_draw_buffers"), Some(Value::None));
        assert!(!record.is_supported("max_draw_buffers"));
        assert_eq!(record.unsupported().len(), CATALOGUE.len() - 1);
        assert_eq!(record.get("not_a_capability"), None);
    }

    #[test]
    fn wrong_shape_is_unsupported() {
        let device =
            ScriptedDevice::new([("max_viewport_dims", CapabilityValue::Float(4096.0))]);
        let record = build_capabilities(&limits_binding(), &device).unwrap();
        assert_eq!(record.get("max_viewport_dims"), Some(Value::None));
        assert!(record.unsupported().contains(&"max_viewport_dims"));
        assert_eq!(
            crate::capabilities::catalogue::lookup("max_viewport_dims").map(|c| c.kind),
            Some(CapabilityKind::IntRange)
        );
    }

    #[test]
    fn host_cannot_overwrite() {
        let device = ScriptedDevice::new([("max_texture_size", CapabilityValue::Int(4096))]);
        let record = build_capabilities(&limits_binding(), &device).unwrap();
        let err = record
            .instance()
            .set_attr("max_texture_size", Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, AttributeError::ReadOnly(_)));
        assert_eq!(record.int("max_texture_size"), Some(4096));
    }

    #[test]
    fn binding_without_catalogue_slot() {
        let class = HostClass::new("Buffer", ["mglo", "size", "extra"]);
        let contract = crate::bindings::ClassContract::new(
            "Buffer",
            [
                crate::bindings::FieldSpec::public("mglo"),
                crate::bindings::FieldSpec::public("size"),
                crate::bindings::FieldSpec::public("extra"),
            ],
        );
        let binding = bind(&class, &inspect(&class).unwrap(), &contract).unwrap();
        let device = ScriptedDevice::new([]);
        assert_eq!(
            build_capabilities(&binding, &device).unwrap_err(),
            CapabilityError::MissingSlot("point_size_range")
        );
    }
}
