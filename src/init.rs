// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! One-time module initialization.

[InitGuard] runs the whole binding sequence at most once:

1. import the host module (mandatory) and probe the optional adapters,
2. inspect and bind every contracted class,
3. protect the bound fields and remove the host constructors,
4. build the capability record for the active device,
5. freeze the result into a [Module].

Every class is bound before any class is modified, so a binding failure leaves the host module
exactly as it was.  A failed pass is final for the guard: later calls report the failure and
do not retry.  The one exception is a host module that cannot be imported yet, which leaves the
guard uninitialized so a later call can try again.
*/

use crate::bindings::constructor::remove_constructor;
use crate::bindings::inspector::inspect_in;
use crate::bindings::protector::{protect, protect_all_slots};
use crate::bindings::{BindingError, ClassKind, SchemaError, SlotBinding, binder::bind};
use crate::capabilities::{CapabilityError, CapabilityRecord, build_capabilities};
use crate::device::DeviceQuery;
use crate::host::{AttributeError, HostEnvironment, HostModule};
use crate::value::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// Names of the host modules the init pass imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// The package defining the bound classes.  Mandatory.
    pub host_module: String,
    /// Numeric-array adapter.  Optional.
    pub numeric_adapter: String,
    /// Image decoder.  Optional.
    pub image_decoder: String,
    /// Host-side debugger, only probed with the `debugger` feature.
    pub debugger: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        InitOptions {
            host_module: "moderngl".to_string(),
            numeric_adapter: "numpy".to_string(),
            image_decoder: "PIL.Image".to_string(),
            debugger: "moderngl_debugger".to_string(),
        }
    }
}

/// Which optional host modules were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleFlags {
    pub numeric_adapter: bool,
    pub image_decoder: bool,
    pub debugger: bool,
}

/// Host objects the native layer calls back into.  Each is `None` if the host doesn't provide it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostHooks {
    /// Exception type for native errors.
    pub error: Option<Value>,
    pub compiler_error: Option<Value>,
    pub linker_error: Option<Value>,
    /// Parses vertex format strings.
    pub split_format: Option<Value>,
    /// The numeric-array adapter's `frombuffer`.
    pub frombuffer: Option<Value>,
    /// The image decoder's `Image` class.
    pub image: Option<Value>,
}

#[derive(Debug, thiserror::Error, Clone)]
#[non_exhaustive]
pub enum InitError {
    #[error("host module '{module}' is not available")]
    HostModuleMissing { module: String },
    #[error("host schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("binding: {0}")]
    Binding(#[from] BindingError),
    #[error("protecting bound fields: {0}")]
    Protect(#[from] AttributeError),
    #[error("capability record: {0}")]
    Capabilities(#[from] CapabilityError),
    #[error("initialization failed earlier: {0}")]
    PreviouslyFailed(Box<InitError>),
}

/// Everything the init pass produced.  Immutable and shared.
#[derive(Debug)]
pub struct Module {
    //ClassKind order
    bindings: Vec<SlotBinding>,
    capabilities: CapabilityRecord,
    flags: ModuleFlags,
    hooks: HostHooks,
}

impl Module {
    pub fn binding(&self, kind: ClassKind) -> &SlotBinding {
        &self.bindings[kind.index()]
    }

    /// The capability record of the device present at initialization.
    pub fn capabilities(&self) -> &CapabilityRecord {
        &self.capabilities
    }

    pub fn flags(&self) -> ModuleFlags {
        self.flags
    }

    pub fn hooks(&self) -> &HostHooks {
        &self.hooks
    }

    /// Builds a capability record for another context's device.
    pub fn build_capabilities(
        &self,
        device: &dyn DeviceQuery,
    ) -> Result<CapabilityRecord, CapabilityError> {
        build_capabilities(self.binding(ClassKind::Limits), device)
    }
}

#[derive(Debug)]
enum State {
    Uninitialized,
    Initialized(Arc<Module>),
    Failed(InitError),
}

/// The `Uninitialized -> Initialized` state machine.
///
/// Concurrent callers block until the first pass has finished, so nobody observes a
/// partially initialized module.
#[derive(Debug)]
pub struct InitGuard {
    state: Mutex<State>,
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InitGuard {
    pub const fn new() -> Self {
        InitGuard {
            state: Mutex::new(State::Uninitialized),
        }
    }

    pub fn ensure_initialized(
        &self,
        host: &dyn HostEnvironment,
        device: &dyn DeviceQuery,
        options: &InitOptions,
    ) -> Result<Arc<Module>, InitError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            State::Initialized(module) => return Ok(module.clone()),
            State::Failed(e) => return Err(InitError::PreviouslyFailed(Box::new(e.clone()))),
            State::Uninitialized => {}
        }
        match initialize(host, device, options) {
            Ok(module) => {
                let module = Arc::new(module);
                *state = State::Initialized(module.clone());
                Ok(module)
            }
            //nothing was touched yet; the next call imports again
            Err(e @ InitError::HostModuleMissing { .. }) => {
                logwise::warn_sync!(
                    "module initialization deferred: {err}",
                    err = logwise::privacy::LogIt(&e)
                );
                Err(e)
            }
            Err(e) => {
                logwise::error_sync!(
                    "module initialization failed: {err}",
                    err = logwise::privacy::LogIt(&e)
                );
                *state = State::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// The initialized module, if initialization has completed.
    pub fn module(&self) -> Option<Arc<Module>> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            State::Initialized(module) => Some(module.clone()),
            _ => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.module().is_some()
    }
}

static MODULE: InitGuard = InitGuard::new();

/// Initializes the process-wide module with default [InitOptions].
pub fn ensure_initialized(
    host: &dyn HostEnvironment,
    device: &dyn DeviceQuery,
) -> Result<Arc<Module>, InitError> {
    MODULE.ensure_initialized(host, device, &InitOptions::default())
}

/// The process-wide module, if [ensure_initialized] has succeeded.
pub fn module() -> Option<Arc<Module>> {
    MODULE.module()
}

fn probe(host: &dyn HostEnvironment, name: &str) -> Option<Arc<HostModule>> {
    let module = host.import(name);
    if module.is_none() {
        logwise::info_sync!(
            "optional module {name} not available",
            name = name.to_string()
        );
    }
    module
}

fn initialize(
    host: &dyn HostEnvironment,
    device: &dyn DeviceQuery,
    options: &InitOptions,
) -> Result<Module, InitError> {
    let host_module =
        host.import(&options.host_module)
            .ok_or_else(|| InitError::HostModuleMissing {
                module: options.host_module.clone(),
            })?;

    let numeric_adapter = probe(host, &options.numeric_adapter);
    let image_decoder = probe(host, &options.image_decoder);
    #[cfg(feature = "debugger")]
    let debugger = probe(host, &options.debugger).is_some();
    #[cfg(not(feature = "debugger"))]
    let debugger = false;

    let flags = ModuleFlags {
        numeric_adapter: numeric_adapter.is_some(),
        image_decoder: image_decoder.is_some(),
        debugger,
    };
    let hooks = HostHooks {
        error: host_module.attribute("Error").cloned(),
        compiler_error: host_module.attribute("_compiler_error").cloned(),
        linker_error: host_module.attribute("_linker_error").cloned(),
        split_format: host_module.attribute("_split_format").cloned(),
        frombuffer: numeric_adapter.and_then(|m| m.attribute("frombuffer").cloned()),
        image: image_decoder.and_then(|m| m.attribute("Image").cloned()),
    };

    let mut bindings = Vec::with_capacity(ClassKind::ALL.len());
    for kind in ClassKind::ALL {
        let contract = kind.contract();
        let (class, table) = inspect_in(&host_module, contract.class())?;
        let binding = bind(&class, &table, &contract)?;
        logwise::info_sync!(
            "bound {class} ({count} slots)",
            class = contract.class(),
            count = binding.len()
        );
        bindings.push((contract, binding));
    }

    for (contract, binding) in &bindings {
        if contract.is_fully_protected() {
            protect_all_slots(binding.class());
        } else {
            let names = binding.protected_slot_names();
            protect(binding.class(), names.iter().map(String::as_str))?;
        }
        remove_constructor(binding.class());
    }
    let bindings: Vec<SlotBinding> = bindings.into_iter().map(|(_, b)| b).collect();

    let capabilities = build_capabilities(&bindings[ClassKind::Limits.index()], device)?;
    logwise::info_sync!(
        "module initialized; {unsupported} capabilities unsupported",
        unsupported = capabilities.unsupported().len()
    );

    Ok(Module {
        bindings,
        capabilities,
        flags,
        hooks,
    })
}
