use crate::script::{DynamicField, FieldValue};

/// Attaches a scripted behavior to an entity.
///
/// `attributes` is the ordered list of script-exposed fields for this
/// entity. Order is whatever the runtime currently holds — scene
/// documents key attributes by name, so ordering is not preserved across
/// save/load cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Workspace-relative path of the script source.
    pub path: String,
    pub attributes: Vec<DynamicField>,
}

impl Script {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&DynamicField> {
        self.attributes.iter().find(|field| field.name == name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut DynamicField> {
        self.attributes.iter_mut().find(|field| field.name == name)
    }

    /// Merge-by-name: overwrites the value of an existing attribute with
    /// the same name, or appends the field. Sibling attributes are left
    /// untouched.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.attribute_mut(&name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(DynamicField::new(name, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_attribute_appends_new() {
        let mut script = Script::new("player.py");
        script.set_attribute("health", FieldValue::Int(100));

        assert_eq!(script.attributes.len(), 1);
        assert_eq!(
            script.attribute("health").unwrap().value,
            FieldValue::Int(100)
        );
    }

    #[test]
    fn set_attribute_overwrites_matching_name() {
        let mut script = Script::new("player.py");
        script.set_attribute("health", FieldValue::Int(100));
        script.set_attribute("speed", FieldValue::Float(2.0));
        script.set_attribute("health", FieldValue::Int(50));

        assert_eq!(script.attributes.len(), 2);
        assert_eq!(
            script.attribute("health").unwrap().value,
            FieldValue::Int(50)
        );
        // Sibling untouched
        assert_eq!(
            script.attribute("speed").unwrap().value,
            FieldValue::Float(2.0)
        );
    }

    #[test]
    fn unknown_attribute_is_none() {
        let script = Script::new("player.py");
        assert!(script.attribute("missing").is_none());
    }
}
