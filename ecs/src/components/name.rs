/// Display name for an entity.
///
/// Mandatory on every entity; the serializer also uses the Name column as
/// its enumeration anchor when walking a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Name::default().as_str().is_empty());
    }

    #[test]
    fn display() {
        let name = Name::new("Player");
        assert_eq!(format!("{name}"), "Player");
    }
}
