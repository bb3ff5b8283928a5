// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Binds host classes to the native layer.

Binding a class runs four steps, in order:

1. [inspector::inspect] reads the class's declared slot layout,
2. [binder::bind] resolves each contracted field to a slot offset and checks the layout holds
   exactly the contracted fields,
3. [protector::protect] makes the native-owned fields read-only for host code,
4. [constructor::remove_constructor] leaves the native factory as the only way to make instances.
*/

pub mod binder;
pub mod constructor;
pub mod contract;
pub mod inspector;
pub mod protector;

pub use binder::{BindingError, Field, ForeignFieldError, SlotBinding};
pub use constructor::{FactoryError, InstanceBuilder};
pub use contract::{ClassContract, ClassKind, FieldSpec};
pub use inspector::{SchemaError, SlotTable};
