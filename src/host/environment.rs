// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::host::HostClass;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A module loaded in the host environment.
#[derive(Debug)]
pub struct HostModule {
    name: String,
    classes: HashMap<String, Arc<HostClass>>,
    attributes: HashMap<String, Value>,
}

impl HostModule {
    pub fn new(name: impl Into<String>) -> Self {
        HostModule {
            name: name.into(),
            classes: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Adds a class, keyed by its name.
    pub fn with_class(mut self, class: Arc<HostClass>) -> Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    /// Adds a plain module attribute (a function, an exception type, a constant...).
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self, name: &str) -> Option<&Arc<HostClass>> {
        self.classes.get(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// The host's module system, as seen by the native layer.
pub trait HostEnvironment {
    /// Imports a module by its dotted name, or `None` when the host cannot provide it.
    fn import(&self, name: &str) -> Option<Arc<HostModule>>;
}

/// A fixed set of modules, registered up front.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<HostModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: HostModule) -> Arc<HostModule> {
        let module = Arc::new(module);
        self.modules
            .insert(module.name().to_string(), module.clone());
        module
    }
}

impl HostEnvironment for ModuleRegistry {
    fn import(&self, name: &str) -> Option<Arc<HostModule>> {
        self.modules.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_registered() {
        let mut registry = ModuleRegistry::new();
        registry.register(
            HostModule::new("moderngl")
                .with_class(HostClass::new("Scope", ["_Scope__mglo", "extra"]))
                .with_attribute("Error", Value::Str("Error".into())),
        );
        let module = registry.import("moderngl").unwrap();
        assert!(module.class("Scope").is_some());
        assert!(module.class("Query").is_none());
        assert_eq!(module.attribute("Error"), Some(&Value::Str("Error".into())));
        assert!(registry.import("numpy").is_none());
    }
}
