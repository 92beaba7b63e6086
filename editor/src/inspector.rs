//! Inspector panel — per-component sections for the selected entity.
//!
//! Components are edited copy-out/write-back: the section works on a
//! clone and commits it only when a widget reports a change, which keeps
//! registry borrows simple and makes "changed this frame" explicit for
//! the undo machinery.

use calluna_core::AssetServer;
use calluna_ecs::{
    Camera, Entity, FieldValue, Light, LightKind, MeshRenderer, Name, ProjectionType, Scene,
    Script, ScriptHost, SpriteRenderer, Transform,
};
use glam::Vec3;
use uuid::Uuid;

/// Renders the inspector for `entity`. Returns true if any component was
/// modified this frame.
pub fn show_inspector(
    ui: &mut egui::Ui,
    scene: &mut Scene,
    assets: &AssetServer,
    host: &mut ScriptHost,
    entity: Entity,
) -> bool {
    if !scene.registry().is_alive(entity) {
        ui.label("No entity selected");
        return false;
    }

    let mut changed = false;

    changed |= name_section(ui, scene, entity);
    changed |= transform_section(ui, scene, entity);
    changed |= sprite_section(ui, scene, assets, entity);
    changed |= mesh_section(ui, scene, assets, entity);
    changed |= camera_section(ui, scene, entity);
    changed |= light_section(ui, scene, entity);
    changed |= script_section(ui, scene, host, entity);

    ui.separator();
    changed |= add_component_menu(ui, scene, entity);

    changed
}

// --- mandatory sections ---

fn name_section(ui: &mut egui::Ui, scene: &mut Scene, entity: Entity) -> bool {
    let registry = scene.registry_mut();
    let Some(name) = registry.get_mut::<Name>(entity) else {
        return false;
    };
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Name");
        changed = ui.text_edit_singleline(&mut name.0).changed();
    });
    if let Some(uuid) = scene.registry().uuid(entity) {
        ui.label(
            egui::RichText::new(uuid.to_string())
                .monospace()
                .small()
                .color(crate::theme::TEXT_MUTED),
        );
    }
    ui.separator();
    changed
}

fn transform_section(ui: &mut egui::Ui, scene: &mut Scene, entity: Entity) -> bool {
    let Some(mut transform) = scene.registry().get::<Transform>(entity).copied() else {
        return false;
    };
    let mut changed = false;

    egui::CollapsingHeader::new("Transform")
        .default_open(true)
        .show(ui, |ui| {
            changed |= vec3_row(ui, "Position", &mut transform.position, 0.05);

            // Rotation is stored in radians, displayed in degrees
            let mut degrees = Vec3::new(
                transform.rotation.x.to_degrees(),
                transform.rotation.y.to_degrees(),
                transform.rotation.z.to_degrees(),
            );
            if vec3_row(ui, "Rotation", &mut degrees, 0.5) {
                transform.rotation = Vec3::new(
                    degrees.x.to_radians(),
                    degrees.y.to_radians(),
                    degrees.z.to_radians(),
                );
                changed = true;
            }

            changed |= vec3_row(ui, "Scale", &mut transform.scale, 0.05);
        });

    if changed {
        scene.registry_mut().insert(entity, transform);
    }
    changed
}

// --- optional component sections ---

/// Reset/Remove row shared by the optional component sections.
enum SectionAction {
    None,
    Reset,
    Remove,
}

fn section_actions(ui: &mut egui::Ui) -> SectionAction {
    let mut action = SectionAction::None;
    ui.horizontal(|ui| {
        if ui.small_button("Reset").clicked() {
            action = SectionAction::Reset;
        }
        if ui.small_button("Remove").clicked() {
            action = SectionAction::Remove;
        }
    });
    action
}

fn sprite_section(
    ui: &mut egui::Ui,
    scene: &mut Scene,
    assets: &AssetServer,
    entity: Entity,
) -> bool {
    let Some(mut sprite) = scene.registry().get::<SpriteRenderer>(entity).cloned() else {
        return false;
    };
    let mut changed = false;
    let mut action = SectionAction::None;

    egui::CollapsingHeader::new("Sprite Renderer")
        .default_open(true)
        .show(ui, |ui| {
            action = section_actions(ui);

            let mut color = sprite.color.to_array();
            ui.horizontal(|ui| {
                ui.label("Color");
                if ui.color_edit_button_rgba_unmultiplied(&mut color).changed() {
                    sprite.color = color.into();
                    changed = true;
                }
            });

            changed |= texture_row(ui, assets, &mut sprite.texture);

            ui.horizontal(|ui| {
                ui.label("Tiling Factor");
                changed |= ui
                    .add(egui::DragValue::new(&mut sprite.tilling_factor).speed(0.05))
                    .changed();
            });
            ui.horizontal(|ui| {
                ui.label("Z Index");
                changed |= ui
                    .add(egui::DragValue::new(&mut sprite.z_index))
                    .changed();
            });
        });

    apply_section::<SpriteRenderer>(scene, entity, action, changed, sprite)
}

fn mesh_section(
    ui: &mut egui::Ui,
    scene: &mut Scene,
    assets: &AssetServer,
    entity: Entity,
) -> bool {
    let Some(mut mesh) = scene.registry().get::<MeshRenderer>(entity).cloned() else {
        return false;
    };
    let mut changed = false;
    let mut action = SectionAction::None;

    egui::CollapsingHeader::new("Mesh Renderer")
        .default_open(true)
        .show(ui, |ui| {
            action = section_actions(ui);

            ui.horizontal(|ui| {
                ui.label("Mesh");
                let label = if mesh.path.is_empty() {
                    "(none)".to_owned()
                } else {
                    mesh.path.clone()
                };
                ui.label(egui::RichText::new(label).monospace());
                if ui.button("Load…").clicked() {
                    if let Some(picked) = rfd::FileDialog::new()
                        .add_filter("Wavefront OBJ", &["obj"])
                        .set_directory(assets.root())
                        .pick_file()
                    {
                        let relative = assets.relative_path(&picked);
                        mesh.mesh = assets.load_mesh(&relative);
                        if mesh.mesh.is_some() {
                            mesh.path = relative;
                        }
                        changed = true;
                    }
                }
            });
            if let Some(geometry) = &mesh.mesh {
                ui.label(
                    egui::RichText::new(format!(
                        "{} submeshes, {} triangles",
                        geometry.submeshes().len(),
                        geometry.triangle_count()
                    ))
                    .small()
                    .color(crate::theme::TEXT_MUTED),
                );
            }

            changed |= texture_row(ui, assets, &mut mesh.texture);
        });

    apply_section::<MeshRenderer>(scene, entity, action, changed, mesh)
}

fn camera_section(ui: &mut egui::Ui, scene: &mut Scene, entity: Entity) -> bool {
    let Some(mut camera) = scene.registry().get::<Camera>(entity).copied() else {
        return false;
    };
    let mut changed = false;
    let mut action = SectionAction::None;

    egui::CollapsingHeader::new("Camera")
        .default_open(true)
        .show(ui, |ui| {
            action = section_actions(ui);

            egui::ComboBox::from_label("Projection")
                .selected_text(match camera.projection {
                    ProjectionType::Perspective => "Perspective",
                    ProjectionType::Orthographic => "Orthographic",
                })
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(
                            &mut camera.projection,
                            ProjectionType::Perspective,
                            "Perspective",
                        )
                        .changed();
                    changed |= ui
                        .selectable_value(
                            &mut camera.projection,
                            ProjectionType::Orthographic,
                            "Orthographic",
                        )
                        .changed();
                });

            match camera.projection {
                ProjectionType::Perspective => {
                    let mut fov = camera.perspective.fov.to_degrees();
                    if drag_row(ui, "Fov", &mut fov, 0.5) {
                        camera.perspective.fov = fov.to_radians();
                        changed = true;
                    }
                    changed |= drag_row(ui, "Near", &mut camera.perspective.near, 0.05);
                    changed |= drag_row(ui, "Far", &mut camera.perspective.far, 1.0);
                }
                ProjectionType::Orthographic => {
                    changed |= drag_row(ui, "Size", &mut camera.orthographic.size, 0.05);
                    changed |= drag_row(ui, "Near", &mut camera.orthographic.near, 0.05);
                    changed |= drag_row(ui, "Far", &mut camera.orthographic.far, 0.05);
                }
            }
        });

    apply_section::<Camera>(scene, entity, action, changed, camera)
}

fn light_section(ui: &mut egui::Ui, scene: &mut Scene, entity: Entity) -> bool {
    let Some(mut light) = scene.registry().get::<Light>(entity).copied() else {
        return false;
    };
    let mut changed = false;
    let mut action = SectionAction::None;

    egui::CollapsingHeader::new("Light")
        .default_open(true)
        .show(ui, |ui| {
            action = section_actions(ui);

            egui::ComboBox::from_label("Kind")
                .selected_text(match light.kind {
                    LightKind::Directional => "Directional",
                    LightKind::Point => "Point",
                    LightKind::Spot => "Spot",
                })
                .show_ui(ui, |ui| {
                    for (kind, label) in [
                        (LightKind::Directional, "Directional"),
                        (LightKind::Point, "Point"),
                        (LightKind::Spot, "Spot"),
                    ] {
                        changed |= ui.selectable_value(&mut light.kind, kind, label).changed();
                    }
                });

            let mut color = light.color.to_array();
            ui.horizontal(|ui| {
                ui.label("Color");
                if ui.color_edit_button_rgb(&mut color).changed() {
                    light.color = color.into();
                    changed = true;
                }
            });

            if light.kind != LightKind::Directional {
                changed |= drag_row(ui, "Range", &mut light.range, 0.05);
            }
            if light.kind == LightKind::Spot {
                changed |= drag_row(ui, "Angle", &mut light.angle, 0.01);
                changed |= drag_row(ui, "Smoothness", &mut light.smoothness, 0.01);
            }
        });

    apply_section::<Light>(scene, entity, action, changed, light)
}

fn script_section(
    ui: &mut egui::Ui,
    scene: &mut Scene,
    host: &mut ScriptHost,
    entity: Entity,
) -> bool {
    let Some(mut script) = scene.registry().get::<Script>(entity).cloned() else {
        return false;
    };
    let mut changed = false;
    let mut action = SectionAction::None;

    egui::CollapsingHeader::new("Script")
        .default_open(true)
        .show(ui, |ui| {
            action = section_actions(ui);

            ui.horizontal(|ui| {
                ui.label("Path");
                changed |= ui.text_edit_singleline(&mut script.path).changed();
            });
            ui.separator();

            for field in &mut script.attributes {
                let edited = field_widget(ui, scene, &field.name.clone(), &mut field.value);
                if edited {
                    changed = true;
                    // Mirror the edit into the running instance, if any
                    if let Some(uuid) = scene.registry().uuid(entity) {
                        host.set_attribute(&uuid, &field.name, field.value.clone());
                    }
                }
            }
        });

    apply_section::<Script>(scene, entity, action, changed, script)
}

/// One widget per dynamic field, dispatched on its kind.
fn field_widget(ui: &mut egui::Ui, scene: &Scene, name: &str, value: &mut FieldValue) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(name);
        match value {
            FieldValue::Int(v) => {
                changed = ui.add(egui::DragValue::new(v)).changed();
            }
            FieldValue::Float(v) => {
                changed = ui.add(egui::DragValue::new(v).speed(0.05)).changed();
            }
            FieldValue::String(v) => {
                changed = ui.text_edit_singleline(v).changed();
            }
            FieldValue::List { element, items } => {
                ui.label(
                    egui::RichText::new(format!("[{} × {:?}]", items.len(), element))
                        .color(crate::theme::TEXT_MUTED),
                );
            }
            FieldValue::Dict => {
                ui.label(egui::RichText::new("{dict}").color(crate::theme::TEXT_MUTED));
            }
            FieldValue::EntityRef(uuid_text) => {
                changed = ui.text_edit_singleline(uuid_text).changed();
                // Resolve for display only; dangling references are fine
                let resolved = Uuid::parse_str(uuid_text)
                    .ok()
                    .and_then(|uuid| scene.registry().entity_by_uuid(&uuid))
                    .and_then(|target| scene.registry().get::<Name>(target))
                    .map(|name| name.as_str().to_owned());
                match resolved {
                    Some(target) => {
                        ui.label(
                            egui::RichText::new(format!("→ {target}"))
                                .color(crate::theme::SUCCESS),
                        );
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("→ (dangling)")
                                .color(crate::theme::WARNING),
                        );
                    }
                }
            }
            FieldValue::Vector2(v) => {
                changed |= ui.add(egui::DragValue::new(&mut v.x).speed(0.05)).changed();
                changed |= ui.add(egui::DragValue::new(&mut v.y).speed(0.05)).changed();
            }
            FieldValue::Vector3(v) => {
                for axis in [&mut v.x, &mut v.y, &mut v.z] {
                    changed |= ui.add(egui::DragValue::new(axis).speed(0.05)).changed();
                }
            }
            FieldValue::Vector4(v) => {
                for i in 0..4 {
                    changed |= ui.add(egui::DragValue::new(&mut v[i]).speed(0.05)).changed();
                }
            }
            FieldValue::Unserializable => {
                ui.label(egui::RichText::new("(unserializable)").color(crate::theme::TEXT_MUTED));
            }
        }
    });
    changed
}

// --- shared rows ---

fn vec3_row(ui: &mut egui::Ui, label: &str, value: &mut Vec3, speed: f64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        for (prefix, axis) in [("x", &mut value.x), ("y", &mut value.y), ("z", &mut value.z)] {
            changed |= ui
                .add(
                    egui::DragValue::new(axis)
                        .speed(speed)
                        .prefix(format!("{prefix}: ")),
                )
                .changed();
        }
    });
    changed
}

fn drag_row(ui: &mut egui::Ui, label: &str, value: &mut f32, speed: f64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        changed = ui.add(egui::DragValue::new(value).speed(speed)).changed();
    });
    changed
}

fn texture_row(
    ui: &mut egui::Ui,
    assets: &AssetServer,
    texture: &mut Option<std::sync::Arc<calluna_core::Texture2D>>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Texture");
        let label = texture
            .as_ref()
            .map(|texture| assets.relative_path(texture.path()))
            .unwrap_or_else(|| "(none)".to_owned());
        ui.label(egui::RichText::new(label).monospace());

        if ui.button("Load…").clicked() {
            if let Some(picked) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg"])
                .set_directory(assets.root())
                .pick_file()
            {
                let relative = assets.relative_path(&picked);
                if let Some(loaded) = assets.load_texture(&relative) {
                    *texture = Some(loaded);
                    changed = true;
                }
            }
        }
        if texture.is_some() && ui.button("Clear").clicked() {
            *texture = None;
            changed = true;
        }
    });
    changed
}

/// Commits the section result: remove, reset to default, or write back
/// the edited copy. Returns whether the scene changed.
fn apply_section<T: calluna_ecs::Component + Default>(
    scene: &mut Scene,
    entity: Entity,
    action: SectionAction,
    changed: bool,
    edited: T,
) -> bool {
    match action {
        SectionAction::Remove => {
            scene.registry_mut().remove::<T>(entity);
            true
        }
        SectionAction::Reset => {
            scene.registry_mut().insert(entity, T::default());
            true
        }
        SectionAction::None => {
            if changed {
                scene.registry_mut().insert(entity, edited);
            }
            changed
        }
    }
}

/// "Add Component" menu listing only components the entity lacks.
fn add_component_menu(ui: &mut egui::Ui, scene: &mut Scene, entity: Entity) -> bool {
    let mut changed = false;
    ui.menu_button("Add Component", |ui| {
        let registry = scene.registry_mut();
        if !registry.has::<SpriteRenderer>(entity) && ui.button("Sprite Renderer").clicked() {
            registry.add::<SpriteRenderer>(entity);
            changed = true;
            ui.close();
        }
        if !registry.has::<MeshRenderer>(entity) && ui.button("Mesh Renderer").clicked() {
            registry.add::<MeshRenderer>(entity);
            changed = true;
            ui.close();
        }
        if !registry.has::<Camera>(entity) && ui.button("Camera").clicked() {
            registry.add::<Camera>(entity);
            changed = true;
            ui.close();
        }
        if !registry.has::<Light>(entity) && ui.button("Light").clicked() {
            registry.add::<Light>(entity);
            changed = true;
            ui.close();
        }
        if !registry.has::<Script>(entity) && ui.button("Script").clicked() {
            registry.add::<Script>(entity);
            changed = true;
            ui.close();
        }
    });
    changed
}
