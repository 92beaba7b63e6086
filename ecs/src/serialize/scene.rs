//! Scene document serializer.
//!
//! Walks every entity in a scene and emits the JSON scene document, or
//! parses a document and rebuilds the scene, re-resolving assets through
//! the injected [`AssetServer`] and seeding script attributes from the
//! injected [`ScriptHost`]. Both directions run to completion on the
//! calling thread; the only hard failures are "open failed" and "parse
//! failed" — everything inside a document is recovered locally.

use std::path::Path;

use calluna_core::AssetServer;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::components::{
    Camera, Light, LightKind, MeshRenderer, Name, ProjectionType, Script, SpriteRenderer,
    Transform,
};
use crate::entity::Entity;
use crate::scene::Scene;
use crate::script::ScriptHost;

use super::error::SceneError;
use super::field::{decode_field, encode_field};
use super::value::{
    decode_vec3, decode_vec4, encode_vec3, encode_vec4, get_f32, get_i32, get_i64, get_string,
};

/// Serializes scenes to the JSON document format and back.
///
/// Holds its collaborators by reference: the asset server for
/// texture/mesh path resolution and the script host for class attribute
/// schemas. The workspace root travels inside the asset server.
pub struct SceneSerializer<'a> {
    assets: &'a AssetServer,
    host: &'a ScriptHost,
}

impl<'a> SceneSerializer<'a> {
    pub fn new(assets: &'a AssetServer, host: &'a ScriptHost) -> Self {
        Self { assets, host }
    }

    // --- serialize ---

    /// Writes the scene document to `path`.
    pub fn save(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let text = self.serialize_to_string(scene)?;
        std::fs::write(path, text).map_err(|err| {
            log::error!("could not write scene to '{}': {err}", path.display());
            SceneError::Io(err)
        })?;
        log::info!(
            "saved scene '{}' ({} entities) to '{}'",
            scene.name(),
            scene.registry().entity_count(),
            path.display()
        );
        Ok(())
    }

    /// Renders the scene document as pretty-printed JSON text (used by
    /// the editor for undo snapshots and the document view).
    pub fn serialize_to_string(&self, scene: &Scene) -> Result<String, SceneError> {
        let registry = scene.registry();
        let mut root = Map::new();

        for entity in registry.entities_with::<Name>() {
            let Some(uuid) = registry.uuid(entity) else {
                continue;
            };
            root.insert(uuid.to_string(), self.encode_entity(scene, entity));
        }

        Ok(serde_json::to_string_pretty(&Value::Object(root))?)
    }

    fn encode_entity(&self, scene: &Scene, entity: Entity) -> Value {
        let registry = scene.registry();
        let mut node = Map::new();

        // Mandatory components
        if let Some(name) = registry.get::<Name>(entity) {
            node.insert("name".into(), Value::from(name.as_str()));
        }
        if let Some(transform) = registry.get::<Transform>(entity) {
            let mut tree = Map::new();
            tree.insert("position".into(), encode_vec3(transform.position));
            tree.insert("rotation".into(), encode_vec3(transform.rotation));
            tree.insert("scale".into(), encode_vec3(transform.scale));
            node.insert("transform".into(), Value::Object(tree));
        }

        if let Some(sprite) = registry.get::<SpriteRenderer>(entity) {
            let mut tree = Map::new();
            tree.insert("color".into(), encode_vec4(sprite.color));
            tree.insert("texture".into(), Value::from(self.texture_path(&sprite.texture)));
            tree.insert("tillingFactor".into(), Value::from(sprite.tilling_factor));
            tree.insert("zIndex".into(), Value::from(sprite.z_index));
            node.insert("spriteRenderer".into(), Value::Object(tree));
        }

        if let Some(mesh) = registry.get::<MeshRenderer>(entity) {
            let mut tree = Map::new();
            tree.insert("path".into(), Value::from(mesh.path.as_str()));
            tree.insert("texture".into(), Value::from(self.texture_path(&mesh.texture)));
            node.insert("meshRenderer".into(), Value::Object(tree));
        }

        if let Some(camera) = registry.get::<Camera>(entity) {
            let mut tree = Map::new();
            tree.insert("type".into(), Value::from(camera.projection.index()));
            tree.insert("perspectiveFov".into(), Value::from(camera.perspective.fov));
            tree.insert("perspectiveNear".into(), Value::from(camera.perspective.near));
            tree.insert("perspectiveFar".into(), Value::from(camera.perspective.far));
            tree.insert("orthoSize".into(), Value::from(camera.orthographic.size));
            tree.insert("orthoNear".into(), Value::from(camera.orthographic.near));
            tree.insert("orthoFar".into(), Value::from(camera.orthographic.far));
            node.insert("camera".into(), Value::Object(tree));
        }

        if let Some(light) = registry.get::<Light>(entity) {
            let mut tree = Map::new();
            tree.insert("type".into(), Value::from(light.kind.index()));
            tree.insert("color".into(), encode_vec3(light.color));
            tree.insert("range".into(), Value::from(light.range));
            tree.insert("angle".into(), Value::from(light.angle));
            tree.insert("smoothness".into(), Value::from(light.smoothness));
            node.insert("light".into(), Value::Object(tree));
        }

        if let Some(script) = registry.get::<Script>(entity) {
            let mut tree = Map::new();
            tree.insert("path".into(), Value::from(script.path.as_str()));
            let mut attributes = Map::new();
            for field in &script.attributes {
                // Dict/Unserializable fields write no key at all
                if let Some(encoded) = encode_field(field) {
                    attributes.insert(field.name.clone(), encoded);
                }
            }
            tree.insert("attributes".into(), Value::Object(attributes));
            node.insert("behavior".into(), Value::Object(tree));
        }

        Value::Object(node)
    }

    /// Workspace-relative path of a loaded texture, or `""` for none.
    fn texture_path(&self, texture: &Option<std::sync::Arc<calluna_core::Texture2D>>) -> String {
        texture
            .as_ref()
            .map(|texture| self.assets.relative_path(texture.path()))
            .unwrap_or_default()
    }

    // --- deserialize ---

    /// Reads and applies the scene document at `path`.
    pub fn load(&self, scene: &mut Scene, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            log::error!("could not open scene '{}': {err}", path.display());
            SceneError::Io(err)
        })?;
        self.deserialize_from_str(scene, &text)?;
        log::info!(
            "loaded scene from '{}' ({} entities)",
            path.display(),
            scene.registry().entity_count()
        );
        Ok(())
    }

    /// Parses document text and rebuilds the scene from it.
    ///
    /// On a parse failure the scene is left untouched. On success the
    /// scene is cleared first, then repopulated entity by entity; a
    /// malformed UUID key costs that entity its persisted identity (a
    /// fresh UUID is substituted with a warning) but never aborts the
    /// rest of the document.
    pub fn deserialize_from_str(&self, scene: &mut Scene, text: &str) -> Result<(), SceneError> {
        let root: Value = serde_json::from_str(text).map_err(|err| {
            log::error!("could not parse scene document: {err}");
            SceneError::Parse(err)
        })?;
        let Some(entities) = root.as_object() else {
            log::error!("scene document root is not an object");
            return Err(SceneError::InvalidRoot);
        };

        scene.clear();

        for (key, node) in entities {
            let entity = match Uuid::parse_str(key) {
                Ok(uuid) => scene.registry_mut().create_entity_with_uuid(uuid),
                Err(err) => {
                    log::warn!("entity with invalid UUID '{key}' ({err}), assigning a fresh one");
                    scene.registry_mut().create_entity()
                }
            };
            self.decode_entity(scene, entity, node);
        }
        Ok(())
    }

    fn decode_entity(&self, scene: &mut Scene, entity: Entity, node: &Value) {
        let registry = scene.registry_mut();

        if let Some(name) = registry.get_mut::<Name>(entity) {
            name.0 = get_string(node, "name");
        }

        if let Some(transform) = registry.get_mut::<Transform>(entity) {
            let tree = node.get("transform").unwrap_or(&Value::Null);
            transform.position = decode_vec3(tree.get("position").unwrap_or(&Value::Null));
            transform.rotation = decode_vec3(tree.get("rotation").unwrap_or(&Value::Null));
            transform.scale = decode_vec3(tree.get("scale").unwrap_or(&Value::Null));
        }

        if let Some(tree) = node.get("spriteRenderer") {
            let texture = self.load_texture(tree);
            let sprite = registry.add::<SpriteRenderer>(entity);
            sprite.color = decode_vec4(tree.get("color").unwrap_or(&Value::Null));
            sprite.texture = texture;
            sprite.tilling_factor = get_f32(tree, "tillingFactor");
            sprite.z_index = get_i32(tree, "zIndex");
        }

        if let Some(tree) = node.get("meshRenderer") {
            let texture = self.load_texture(tree);
            let path = get_string(tree, "path");
            let mesh = if path.is_empty() {
                None
            } else {
                self.assets.load_mesh(&path)
            };
            let renderer = registry.add::<MeshRenderer>(entity);
            renderer.path = path;
            renderer.texture = texture;
            renderer.mesh = mesh;
        }

        if let Some(tree) = node.get("camera") {
            let camera = registry.add::<Camera>(entity);
            camera.projection = ProjectionType::from_index(get_i64(tree, "type"));
            camera.perspective.fov = get_f32(tree, "perspectiveFov");
            camera.perspective.near = get_f32(tree, "perspectiveNear");
            camera.perspective.far = get_f32(tree, "perspectiveFar");
            camera.orthographic.size = get_f32(tree, "orthoSize");
            camera.orthographic.near = get_f32(tree, "orthoNear");
            camera.orthographic.far = get_f32(tree, "orthoFar");
        }

        if let Some(tree) = node.get("light") {
            let light = registry.add::<Light>(entity);
            light.kind = LightKind::from_index(get_i64(tree, "type"));
            light.color = decode_vec3(tree.get("color").unwrap_or(&Value::Null));
            light.range = get_f32(tree, "range");
            light.angle = get_f32(tree, "angle");
            light.smoothness = get_f32(tree, "smoothness");
        }

        if let Some(tree) = node.get("behavior") {
            let path = get_string(tree, "path");

            // Seed the attribute list from the class schema when the host
            // knows this script, then merge document fields in by name.
            // Document attributes missing from the current class schema
            // are appended, not dropped.
            let mut script = Script::new(path);
            if let Some(class) = self.host.class(&script.path) {
                script.attributes = class.defaults.clone();
            }
            if let Some(attributes) = tree.get("attributes").and_then(Value::as_object) {
                for (name, field_node) in attributes {
                    if let Some(field) = decode_field(name, field_node) {
                        script.set_attribute(field.name, field.value);
                    }
                }
            }
            registry.insert(entity, script);
        }
    }

    /// The shared `texture` key of sprite/mesh renderer nodes: an empty
    /// path means "no texture" and skips the asset server entirely; a
    /// path that fails to load leaves the reference unset.
    fn load_texture(&self, tree: &Value) -> Option<std::sync::Arc<calluna_core::Texture2D>> {
        let path = get_string(tree, "texture");
        if path.is_empty() {
            None
        } else {
            self.assets.load_texture(&path)
        }
    }
}
