//! Headless demo: builds a scene covering every component and dynamic
//! field kind, saves it, reloads it into a fresh scene, and drives a
//! script attribute through the host.
//!
//! Run with `cargo run -p calluna-sandbox`; the workspace (assets and the
//! scene document) is created under the system temp directory.

use std::f32::consts::FRAC_PI_6;
use std::path::{Path, PathBuf};

use calluna_core::AssetServer;
use calluna_ecs::{
    Camera, FieldValue, Light, LightKind, MeshRenderer, Name, ProjectionType, Scene,
    SceneSerializer, Script, ScriptClass, ScriptHost, SpriteRenderer, Transform,
};
use glam::{Vec3, Vec4};

const ROTATOR_CLASS: &str = "scripts/rotator.py";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("sandbox failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let workspace = prepare_workspace()?;
    log::info!("workspace at '{}'", workspace.display());

    let assets = AssetServer::new(&workspace);
    let mut host = ScriptHost::new();
    host.register_class(
        ScriptClass::new(ROTATOR_CLASS)
            .with_default(calluna_ecs::DynamicField::new("speed", FieldValue::Float(1.0)))
            .with_default(calluna_ecs::DynamicField::new(
                "axis",
                FieldValue::Vector3(Vec3::Y),
            ))
            .with_default(calluna_ecs::DynamicField::new(
                "label",
                FieldValue::String(String::new()),
            )),
    );

    let scene = build_scene(&assets);
    let scene_path = workspace.join("demo_scene.json");

    {
        let serializer = SceneSerializer::new(&assets, &host);
        serializer.save(&scene, &scene_path)?;
    }

    // Reload into a fresh scene, as the editor or a runtime would
    let mut reloaded = Scene::new("demo");
    {
        let serializer = SceneSerializer::new(&assets, &host);
        serializer.load(&mut reloaded, &scene_path)?;
    }
    log::info!(
        "reloaded {} of {} entities",
        reloaded.registry().entity_count(),
        scene.registry().entity_count()
    );

    // Spin up script instances for every scripted entity and poke one
    // attribute through the host
    let scripted: Vec<_> = reloaded
        .registry()
        .entities_with::<Script>()
        .into_iter()
        .filter_map(|entity| {
            let script = reloaded.registry().get::<Script>(entity)?;
            Some((entity, reloaded.registry().uuid(entity)?, script.path.clone()))
        })
        .collect();
    for (_, uuid, path) in &scripted {
        host.instantiate(*uuid, path);
    }
    for (_, uuid, _) in &scripted {
        if host.set_attribute(uuid, "speed", FieldValue::Float(4.0)) {
            log::info!("set speed=4.0 on instance {uuid}");
        }
    }

    print_summary(&reloaded, &host);
    Ok(())
}

// --- demo workspace ---

/// Creates the asset workspace: a checkerboard texture and a unit quad.
fn prepare_workspace() -> std::io::Result<PathBuf> {
    let root = std::env::temp_dir().join("calluna-sandbox");
    std::fs::create_dir_all(root.join("textures"))?;
    std::fs::create_dir_all(root.join("meshes"))?;

    let checker = image::RgbaImage::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba([148, 98, 170, 255])
        } else {
            image::Rgba([28, 29, 37, 255])
        }
    });
    checker
        .save(root.join("textures/checker.png"))
        .map_err(std::io::Error::other)?;

    std::fs::write(root.join("meshes/quad.obj"), QUAD_OBJ)?;
    Ok(root)
}

const QUAD_OBJ: &str = "\
o Quad
v -0.5 -0.5 0.0
v 0.5 -0.5 0.0
v 0.5 0.5 0.0
v -0.5 0.5 0.0
vn 0.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

// --- scene construction ---

fn build_scene(assets: &AssetServer) -> Scene {
    let mut scene = Scene::new("demo");

    let camera = scene.create_entity("Main Camera");
    scene.registry_mut().insert(
        camera,
        Transform {
            position: Vec3::new(0.0, 2.0, 8.0),
            rotation: Vec3::new(-FRAC_PI_6, 0.0, 0.0),
            scale: Vec3::ONE,
        },
    );
    scene.registry_mut().insert(
        camera,
        Camera {
            projection: ProjectionType::Perspective,
            ..Default::default()
        },
    );

    let sun = scene.create_entity("Sun");
    scene.registry_mut().insert(
        sun,
        Light {
            kind: LightKind::Directional,
            color: Vec3::new(1.0, 0.95, 0.85),
            ..Default::default()
        },
    );

    let lamp = scene.create_entity("Lamp");
    scene.registry_mut().insert(
        lamp,
        Light {
            kind: LightKind::Point,
            color: Vec3::new(0.6, 0.7, 1.0),
            range: 15.0,
            ..Default::default()
        },
    );

    let sprite = scene.create_entity("Checker Sprite");
    scene.registry_mut().insert(
        sprite,
        SpriteRenderer {
            color: Vec4::new(1.0, 1.0, 1.0, 0.9),
            texture: assets.load_texture("textures/checker.png"),
            tilling_factor: 2.0,
            z_index: 1,
        },
    );

    let quad = scene.create_entity("Quad");
    scene.registry_mut().insert(
        quad,
        MeshRenderer {
            path: "meshes/quad.obj".into(),
            texture: assets.load_texture("textures/checker.png"),
            mesh: assets.load_mesh("meshes/quad.obj"),
        },
    );

    let rotator = scene.create_entity("Rotator");
    let mut script = Script::new(ROTATOR_CLASS);
    script.set_attribute("speed", FieldValue::Float(2.5));
    script.set_attribute("label", FieldValue::String("spinning quad".into()));
    script.set_attribute("axis", FieldValue::Vector3(Vec3::new(0.0, 1.0, 0.0)));
    script.set_attribute("count", FieldValue::Int(3));
    script.set_attribute(
        "waypoints",
        FieldValue::List {
            element: calluna_ecs::FieldKind::Vector3,
            items: vec![
                FieldValue::Vector3(Vec3::new(-2.0, 0.0, 0.0)),
                FieldValue::Vector3(Vec3::new(2.0, 0.0, 0.0)),
                FieldValue::Vector3(Vec3::new(0.0, 0.0, 2.0)),
            ],
        },
    );
    if let Some(target) = scene.registry().uuid(quad) {
        script.set_attribute("target", FieldValue::EntityRef(target.to_string()));
    }
    // Dropped on save; included to show the codec skipping it
    script.set_attribute("scratch", FieldValue::Dict);
    scene.registry_mut().insert(rotator, script);

    scene
}

// --- reporting ---

fn print_summary(scene: &Scene, host: &ScriptHost) {
    let registry = scene.registry();
    for entity in registry.entities_with::<Name>() {
        let Some(name) = registry.get::<Name>(entity) else {
            continue;
        };
        let mut parts = Vec::new();
        if registry.has::<Camera>(entity) {
            parts.push("camera");
        }
        if registry.has::<Light>(entity) {
            parts.push("light");
        }
        if registry.has::<SpriteRenderer>(entity) {
            parts.push("sprite");
        }
        if registry.has::<MeshRenderer>(entity) {
            parts.push("mesh");
        }
        if registry.has::<Script>(entity) {
            parts.push("script");
        }
        log::info!("entity '{}' [{}]", name.as_str(), parts.join(", "));

        if let Some(script) = registry.get::<Script>(entity) {
            for field in &script.attributes {
                log::info!("    {} ({:?}) = {:?}", field.name, field.kind(), field.value);
            }
            if let Some(uuid) = registry.uuid(entity) {
                if let Some(speed) = host.attribute(&uuid, "speed") {
                    log::info!("    host speed = {speed:?}");
                }
            }
        }
    }
    describe_target(scene);
}

/// Resolves the demo's entity reference the way a script runtime would.
fn describe_target(scene: &Scene) {
    let registry = scene.registry();
    for entity in registry.entities_with::<Script>() {
        let Some(script) = registry.get::<Script>(entity) else {
            continue;
        };
        let Some(field) = script.attribute("target") else {
            continue;
        };
        if let FieldValue::EntityRef(raw) = &field.value {
            let resolved = uuid::Uuid::parse_str(raw)
                .ok()
                .and_then(|uuid| registry.entity_by_uuid(&uuid))
                .and_then(|target| registry.get::<Name>(target))
                .map(|name| name.as_str().to_owned());
            match resolved {
                Some(name) => log::info!("target resolves to '{name}'"),
                None => log::warn!("target '{raw}' is dangling"),
            }
        }
    }
}
