//! Scripting-facing attribute model: the dynamic field tagged union and
//! the host that carries class schemas and per-entity attribute state.

mod field;
mod host;

pub use field::{DynamicField, FieldKind, FieldValue};
pub use host::{ScriptClass, ScriptHost, ScriptInstance};
