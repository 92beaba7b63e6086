use crate::components::Name;
use crate::entity::Entity;
use crate::registry::Registry;

/// A named entity collection — the unit the serializer saves and loads.
#[derive(Default)]
pub struct Scene {
    name: String,
    registry: Registry,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Registry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Creates an entity with the given display name.
    pub fn create_entity(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.registry.create_entity();
        if let Some(component) = self.registry.get_mut::<Name>(entity) {
            component.0 = name.into();
        }
        entity
    }

    /// Destroys all entities.
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_entity_sets_name() {
        let mut scene = Scene::new("test");
        let entity = scene.create_entity("Player");
        assert_eq!(
            scene.registry().get::<Name>(entity).unwrap().as_str(),
            "Player"
        );
    }

    #[test]
    fn clear_destroys_entities() {
        let mut scene = Scene::new("test");
        scene.create_entity("A");
        scene.create_entity("B");
        scene.clear();
        assert_eq!(scene.registry().entity_count(), 0);
    }
}
