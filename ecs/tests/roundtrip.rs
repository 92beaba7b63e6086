//! Scene document round-trip scenarios.

use std::path::PathBuf;

use calluna_core::AssetServer;
use calluna_ecs::{
    Camera, DynamicField, FieldKind, FieldValue, Light, LightKind, MeshRenderer, Name,
    ProjectionType, Scene, SceneSerializer, Script, ScriptClass, ScriptHost, SpriteRenderer,
    Transform,
};
use glam::{Vec3, Vec4};
use uuid::Uuid;

fn temp_workspace(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "calluna-roundtrip-{tag}-{}-{}",
        std::process::id(),
        Uuid::new_v4()
    ));
    std::fs::create_dir_all(&root).unwrap();
    root
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// ---------------------------------------------------------------------------
// Full scene round-trip
// ---------------------------------------------------------------------------

#[test]
fn full_scene_round_trips() {
    let root = temp_workspace("full");
    let assets = AssetServer::new(&root);
    let mut host = ScriptHost::new();
    host.register_class(ScriptClass::new("guard.py"));

    let mut scene = Scene::new("level1");
    let target = scene.create_entity("Target");
    let target_uuid = scene.registry().uuid(target).unwrap();

    let hero = scene.create_entity("Hero");
    {
        let registry = scene.registry_mut();
        *registry.get_mut::<Transform>(hero).unwrap() = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let sprite = registry.add::<SpriteRenderer>(hero);
        sprite.color = Vec4::new(0.9, 0.5, 0.25, 1.0);
        sprite.tilling_factor = 3.0;
        sprite.z_index = -2;

        let camera = registry.add::<Camera>(hero);
        camera.projection = ProjectionType::Orthographic;
        camera.orthographic.size = 12.5;

        let light = registry.add::<Light>(hero);
        light.kind = LightKind::Spot;
        light.color = Vec3::new(1.0, 0.8, 0.6);
        light.range = 22.0;
        light.angle = 0.7;
        light.smoothness = 0.4;

        let mut script = Script::new("guard.py");
        script.set_attribute("health", FieldValue::Int(75));
        script.set_attribute("speed", FieldValue::Float(4.25));
        script.set_attribute("title", FieldValue::String("captain".into()));
        script.set_attribute("home", FieldValue::Vector3(Vec3::new(5.0, 0.0, -5.0)));
        script.set_attribute(
            "waypoints",
            FieldValue::List {
                element: FieldKind::Int,
                items: vec![FieldValue::Int(1), FieldValue::Int(2)],
            },
        );
        script.set_attribute("target", FieldValue::EntityRef(target_uuid.to_string()));
        registry.insert(hero, script);
    }
    let hero_uuid = scene.registry().uuid(hero).unwrap();

    let serializer = SceneSerializer::new(&assets, &host);
    let text = serializer.serialize_to_string(&scene).unwrap();

    let mut loaded = Scene::new("reloaded");
    serializer.deserialize_from_str(&mut loaded, &text).unwrap();

    let registry = loaded.registry();
    assert_eq!(registry.entity_count(), 2);

    let hero = registry.entity_by_uuid(&hero_uuid).unwrap();
    assert_eq!(registry.get::<Name>(hero).unwrap().as_str(), "Hero");

    let transform = registry.get::<Transform>(hero).unwrap();
    assert!((transform.position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    assert!((transform.rotation - Vec3::new(0.1, 0.2, 0.3)).length() < 1e-6);
    assert!((transform.scale - Vec3::splat(2.0)).length() < 1e-6);

    let sprite = registry.get::<SpriteRenderer>(hero).unwrap();
    assert!((sprite.color - Vec4::new(0.9, 0.5, 0.25, 1.0)).length() < 1e-6);
    assert!(close(sprite.tilling_factor, 3.0));
    assert_eq!(sprite.z_index, -2);
    assert!(sprite.texture.is_none());

    let camera = registry.get::<Camera>(hero).unwrap();
    assert_eq!(camera.projection, ProjectionType::Orthographic);
    assert!(close(camera.orthographic.size, 12.5));

    let light = registry.get::<Light>(hero).unwrap();
    assert_eq!(light.kind, LightKind::Spot);
    assert!(close(light.range, 22.0));
    assert!(close(light.angle, 0.7));
    assert!(close(light.smoothness, 0.4));

    // Attribute order is not guaranteed — compare as name→value pairs
    let script = registry.get::<Script>(hero).unwrap();
    assert_eq!(script.path, "guard.py");
    assert_eq!(script.attribute("health").unwrap().value, FieldValue::Int(75));
    assert_eq!(
        script.attribute("speed").unwrap().value,
        FieldValue::Float(4.25)
    );
    assert_eq!(
        script.attribute("title").unwrap().value,
        FieldValue::String("captain".into())
    );
    assert_eq!(
        script.attribute("home").unwrap().value,
        FieldValue::Vector3(Vec3::new(5.0, 0.0, -5.0))
    );
    assert_eq!(
        script.attribute("waypoints").unwrap().value,
        FieldValue::List {
            element: FieldKind::Int,
            items: vec![FieldValue::Int(1), FieldValue::Int(2)],
        }
    );
    assert_eq!(
        script.attribute("target").unwrap().value,
        FieldValue::EntityRef(target_uuid.to_string())
    );

    // The reference still resolves after the reload
    let target = registry.entity_by_uuid(&target_uuid).unwrap();
    assert_eq!(registry.get::<Name>(target).unwrap().as_str(), "Target");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn save_and_load_through_file() {
    let root = temp_workspace("file");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let mut scene = Scene::new("disk");
    let entity = scene.create_entity("OnDisk");
    let uuid = scene.registry().uuid(entity).unwrap();

    let path = root.join("scene.json");
    serializer.save(&scene, &path).unwrap();

    let mut loaded = Scene::new("fresh");
    serializer.load(&mut loaded, &path).unwrap();
    assert!(loaded.registry().entity_by_uuid(&uuid).is_some());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn load_missing_file_is_io_error() {
    let root = temp_workspace("nofile");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let mut scene = Scene::new("untouched");
    scene.create_entity("Survivor");
    assert!(serializer.load(&mut scene, root.join("absent.json")).is_err());
    // Failure before parse leaves the scene untouched
    assert_eq!(scene.registry().entity_count(), 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn parse_failure_leaves_scene_untouched() {
    let root = temp_workspace("parse");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let mut scene = Scene::new("untouched");
    scene.create_entity("Survivor");

    assert!(serializer
        .deserialize_from_str(&mut scene, "{ not json")
        .is_err());
    assert!(serializer.deserialize_from_str(&mut scene, "[1, 2]").is_err());
    assert_eq!(scene.registry().entity_count(), 1);

    std::fs::remove_dir_all(&root).ok();
}

// ---------------------------------------------------------------------------
// UUID fallback
// ---------------------------------------------------------------------------

#[test]
fn malformed_uuid_key_gets_fresh_identity() {
    let root = temp_workspace("uuid");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let mut document = serde_json::Map::new();
    document.insert(
        "not-a-uuid".to_string(),
        serde_json::json!({
            "name": "Orphan",
            "transform": {
                "position": { "x": 9.0, "y": 0.0, "z": 0.0 },
                "rotation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
            }
        }),
    );
    let valid: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
    for (index, uuid) in valid.iter().enumerate() {
        document.insert(
            uuid.to_string(),
            serde_json::json!({
                "name": format!("Entity{index}"),
                "transform": {
                    "position": { "x": index as f32, "y": 0.0, "z": 0.0 },
                    "rotation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
                }
            }),
        );
    }
    let text = serde_json::to_string(&document).unwrap();

    let mut scene = Scene::new("recovered");
    serializer.deserialize_from_str(&mut scene, &text).unwrap();

    // The malformed key did not abort the remaining entities
    let registry = scene.registry();
    assert_eq!(registry.entity_count(), 11);
    for uuid in &valid {
        assert!(registry.entity_by_uuid(uuid).is_some());
    }

    // The orphan is fully populated under a fresh UUID
    let orphan = registry
        .iter_entities()
        .find(|e| registry.get::<Name>(*e).map(Name::as_str) == Some("Orphan"))
        .expect("orphan entity should exist");
    let transform = registry.get::<Transform>(orphan).unwrap();
    assert!(close(transform.position.x, 9.0));
    assert!(!valid.contains(&registry.uuid(orphan).unwrap()));

    std::fs::remove_dir_all(&root).ok();
}

// ---------------------------------------------------------------------------
// Script attribute merge
// ---------------------------------------------------------------------------

#[test]
fn behavior_attributes_merge_by_name() {
    let root = temp_workspace("merge");
    let assets = AssetServer::new(&root);
    let mut host = ScriptHost::new();
    host.register_class(
        ScriptClass::new("npc.py")
            .with_default(DynamicField::new("health", FieldValue::Int(100)))
            .with_default(DynamicField::new("speed", FieldValue::Float(1.0))),
    );
    let serializer = SceneSerializer::new(&assets, &host);

    let uuid = Uuid::new_v4();
    let text = serde_json::json!({
        (uuid.to_string()): {
            "name": "Npc",
            "transform": {
                "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "rotation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
            },
            "behavior": {
                "path": "npc.py",
                "attributes": {
                    "health": { "type": 0, "value": 40 },
                    "legacy_flag": { "type": 0, "value": 1 }
                }
            }
        }
    })
    .to_string();

    let mut scene = Scene::new("merge");
    serializer.deserialize_from_str(&mut scene, &text).unwrap();

    let entity = scene.registry().entity_by_uuid(&uuid).unwrap();
    let script = scene.registry().get::<Script>(entity).unwrap();

    // Overwritten in place
    assert_eq!(script.attribute("health").unwrap().value, FieldValue::Int(40));
    // Sibling schema attribute untouched by the merge
    assert_eq!(
        script.attribute("speed").unwrap().value,
        FieldValue::Float(1.0)
    );
    // Attribute absent from the class schema is appended
    assert_eq!(
        script.attribute("legacy_flag").unwrap().value,
        FieldValue::Int(1)
    );
    assert_eq!(script.attributes.len(), 3);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn dict_attribute_writes_no_key() {
    let root = temp_workspace("dict");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let mut scene = Scene::new("dict");
    let entity = scene.create_entity("WithDict");
    let mut script = Script::new("dict.py");
    script.set_attribute("table", FieldValue::Dict);
    script.set_attribute("kept", FieldValue::Int(1));
    scene.registry_mut().insert(entity, script);

    let text = serializer.serialize_to_string(&scene).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    let uuid = scene.registry().uuid(entity).unwrap().to_string();
    let attributes = document[&uuid]["behavior"]["attributes"].as_object().unwrap();

    assert!(attributes.contains_key("kept"));
    assert!(!attributes.contains_key("table"));

    // Decoding a Dict-tagged node populates nothing either
    let mut loaded = Scene::new("loaded");
    let doctored = serde_json::json!({
        (uuid.clone()): {
            "name": "WithDict",
            "transform": document[&uuid]["transform"],
            "behavior": {
                "path": "dict.py",
                "attributes": {
                    "kept": { "type": 0, "value": 1 },
                    "table": { "type": 4, "value": { "a": 1 } }
                }
            }
        }
    })
    .to_string();
    serializer.deserialize_from_str(&mut loaded, &doctored).unwrap();
    let entity = loaded.registry().entities_with::<Script>()[0];
    let script = loaded.registry().get::<Script>(entity).unwrap();
    assert!(script.attribute("table").is_none());
    assert_eq!(script.attribute("kept").unwrap().value, FieldValue::Int(1));

    std::fs::remove_dir_all(&root).ok();
}

// ---------------------------------------------------------------------------
// Asset resolution
// ---------------------------------------------------------------------------

#[test]
fn unloadable_texture_leaves_reference_unset() {
    let root = temp_workspace("texfall");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let uuid = Uuid::new_v4();
    let text = serde_json::json!({
        (uuid.to_string()): {
            "name": "Sprite",
            "transform": {
                "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "rotation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "scale": { "x": 1.0, "y": 1.0, "z": 1.0 }
            },
            "spriteRenderer": {
                "color": { "x": 1.0, "y": 1.0, "z": 1.0, "w": 1.0 },
                "texture": "textures/definitely-missing.png",
                "tillingFactor": 2.0,
                "zIndex": 1
            }
        }
    })
    .to_string();

    let mut scene = Scene::new("texfall");
    serializer.deserialize_from_str(&mut scene, &text).unwrap();

    let entity = scene.registry().entity_by_uuid(&uuid).unwrap();
    let sprite = scene.registry().get::<SpriteRenderer>(entity).unwrap();
    assert!(sprite.texture.is_none());
    // The rest of the component is still populated
    assert!(close(sprite.tilling_factor, 2.0));
    assert_eq!(sprite.z_index, 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn texture_and_mesh_paths_resolve_against_workspace_root() {
    let root = temp_workspace("assets");
    std::fs::create_dir_all(root.join("sprites")).unwrap();
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]));
    img.save(root.join("sprites/crate.png")).unwrap();
    std::fs::write(
        root.join("box.obj"),
        "o Box\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
    )
    .unwrap();

    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    // Build a scene whose sprite/mesh reference workspace assets
    let mut scene = Scene::new("assets");
    let entity = scene.create_entity("Crate");
    {
        let registry = scene.registry_mut();
        let sprite = registry.add::<SpriteRenderer>(entity);
        sprite.texture = assets.load_texture("sprites/crate.png");
        let mesh = registry.add::<MeshRenderer>(entity);
        mesh.path = "box.obj".into();
        mesh.mesh = assets.load_mesh("box.obj");
    }

    let text = serializer.serialize_to_string(&scene).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    let uuid = scene.registry().uuid(entity).unwrap().to_string();
    // Relative path, not absolute, and never pixel data
    assert_eq!(
        document[&uuid]["spriteRenderer"]["texture"],
        serde_json::json!("sprites/crate.png")
    );
    assert_eq!(document[&uuid]["meshRenderer"]["path"], serde_json::json!("box.obj"));

    let mut loaded = Scene::new("loaded");
    serializer.deserialize_from_str(&mut loaded, &text).unwrap();
    let entity = loaded.registry().entities_with::<MeshRenderer>()[0];
    let renderer = loaded.registry().get::<MeshRenderer>(entity).unwrap();
    assert!(renderer.mesh.is_some());
    let sprite = loaded.registry().get::<SpriteRenderer>(entity).unwrap();
    assert!(sprite.texture.is_some());

    std::fs::remove_dir_all(&root).ok();
}

// ---------------------------------------------------------------------------
// Concrete minimal scenario
// ---------------------------------------------------------------------------

#[test]
fn minimal_entity_has_exactly_name_and_transform() {
    let root = temp_workspace("minimal");
    let assets = AssetServer::new(&root);
    let host = ScriptHost::new();
    let serializer = SceneSerializer::new(&assets, &host);

    let uuid = Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap();
    let mut scene = Scene::new("minimal");
    let entity = scene.registry_mut().create_entity_with_uuid(uuid);
    scene
        .registry_mut()
        .get_mut::<Transform>(entity)
        .unwrap()
        .position = Vec3::new(1.0, 2.0, 3.0);

    let text = serializer.serialize_to_string(&scene).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    let node = document[uuid.to_string()].as_object().unwrap();
    assert_eq!(node.len(), 2);
    assert!(node.contains_key("name"));
    assert!(node.contains_key("transform"));

    let mut loaded = Scene::new("loaded");
    serializer.deserialize_from_str(&mut loaded, &text).unwrap();
    let registry = loaded.registry();
    let entity = registry.entity_by_uuid(&uuid).unwrap();
    assert!(close(
        registry.get::<Transform>(entity).unwrap().position.y,
        2.0
    ));
    assert!(!registry.has::<SpriteRenderer>(entity));
    assert!(!registry.has::<MeshRenderer>(entity));
    assert!(!registry.has::<Camera>(entity));
    assert!(!registry.has::<Light>(entity));
    assert!(!registry.has::<Script>(entity));

    std::fs::remove_dir_all(&root).ok();
}
