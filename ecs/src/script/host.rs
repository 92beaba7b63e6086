//! Script runtime attribute state.
//!
//! The actual script-language embedding lives outside this crate; what the
//! engine needs from it is attribute state — which attributes a script
//! class declares, and the current values of those attributes on each
//! running entity. [`ScriptHost`] carries exactly that and is passed
//! explicitly wherever it is needed (the serializer takes it by
//! reference), never held as ambient global state.

use std::collections::HashMap;

use uuid::Uuid;

use super::field::{DynamicField, FieldValue};

/// Declared attribute schema of a script class, keyed by source path.
#[derive(Debug, Clone, Default)]
pub struct ScriptClass {
    pub path: String,
    /// Declared attributes with their default values.
    pub defaults: Vec<DynamicField>,
}

impl ScriptClass {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            defaults: Vec::new(),
        }
    }

    pub fn with_default(mut self, field: DynamicField) -> Self {
        self.defaults.push(field);
        self
    }
}

/// Per-entity attribute table of a running script.
#[derive(Debug, Clone, Default)]
pub struct ScriptInstance {
    pub class_path: String,
    pub attributes: Vec<DynamicField>,
}

impl ScriptInstance {
    pub fn attribute(&self, name: &str) -> Option<&DynamicField> {
        self.attributes.iter().find(|field| field.name == name)
    }

    /// Overwrites a matching attribute or appends, mirroring the
    /// serializer's merge-by-name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.attributes.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(DynamicField::new(name, value)),
        }
    }
}

/// Registry of script classes and per-entity attribute instances.
///
/// Classes are registered by the embedding layer; instances are created
/// when a scene starts running. Instances are keyed by entity UUID so
/// identity survives reloads.
#[derive(Debug, Default)]
pub struct ScriptHost {
    classes: HashMap<String, ScriptClass>,
    instances: HashMap<Uuid, ScriptInstance>,
}

impl ScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    // --- classes ---

    pub fn register_class(&mut self, class: ScriptClass) {
        log::info!(
            "registered script class '{}' ({} attributes)",
            class.path,
            class.defaults.len()
        );
        self.classes.insert(class.path.clone(), class);
    }

    pub fn class(&self, path: &str) -> Option<&ScriptClass> {
        self.classes.get(path)
    }

    // --- instances ---

    /// Creates the attribute instance for `uuid` from the class defaults.
    ///
    /// An unknown class path yields an empty instance with a warning —
    /// the document may still merge attributes into it.
    pub fn instantiate(&mut self, uuid: Uuid, class_path: &str) -> &mut ScriptInstance {
        let attributes = match self.classes.get(class_path) {
            Some(class) => class.defaults.clone(),
            None => {
                log::warn!("no script class registered for '{class_path}'");
                Vec::new()
            }
        };
        let instance = self.instances.entry(uuid).or_default();
        instance.class_path = class_path.to_owned();
        instance.attributes = attributes;
        instance
    }

    pub fn instance(&self, uuid: &Uuid) -> Option<&ScriptInstance> {
        self.instances.get(uuid)
    }

    pub fn instance_mut(&mut self, uuid: &Uuid) -> Option<&mut ScriptInstance> {
        self.instances.get_mut(uuid)
    }

    /// Current value of a named attribute on an entity's instance.
    /// `None` for unknown UUIDs or names, never a panic.
    pub fn attribute(&self, uuid: &Uuid, name: &str) -> Option<&FieldValue> {
        Some(&self.instances.get(uuid)?.attribute(name)?.value)
    }

    /// Sets a named attribute on an entity's instance
    /// (overwrite-or-append). Returns false if no instance exists for
    /// `uuid`.
    pub fn set_attribute(&mut self, uuid: &Uuid, name: &str, value: FieldValue) -> bool {
        match self.instances.get_mut(uuid) {
            Some(instance) => {
                instance.set_attribute(name, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_instance(&mut self, uuid: &Uuid) -> Option<ScriptInstance> {
        self.instances.remove(uuid)
    }

    pub fn clear_instances(&mut self) {
        self.instances.clear();
    }
}
