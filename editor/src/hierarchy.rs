//! Scene hierarchy panel — a flat entity list with selection.

use calluna_ecs::{Entity, Name, Scene};

/// What the hierarchy asks the app to do this frame. Mutations are
/// returned instead of applied so the app can snapshot undo state first.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyAction {
    CreateEntity,
    DestroyEntity(Entity),
}

/// Renders the entity list and returns a requested mutation, if any.
pub fn show_hierarchy(
    ui: &mut egui::Ui,
    scene: &Scene,
    selected: &mut Option<Entity>,
    filter: &mut String,
) -> Option<HierarchyAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label("Filter:");
        ui.text_edit_singleline(filter);
    });
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("+ Entity").clicked() {
            action = Some(HierarchyAction::CreateEntity);
        }
        let destroy = ui.add_enabled(selected.is_some(), egui::Button::new("− Destroy"));
        if destroy.clicked() {
            if let Some(entity) = *selected {
                action = Some(HierarchyAction::DestroyEntity(entity));
            }
        }
    });
    ui.separator();

    let registry = scene.registry();
    ui.label(
        egui::RichText::new(format!("Entities: {}", registry.entity_count()))
            .color(crate::theme::TEXT_MUTED),
    );
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for entity in registry.entities_with::<Name>() {
                let label = registry
                    .get::<Name>(entity)
                    .map(|name| name.as_str().to_owned())
                    .unwrap_or_else(|| entity.to_string());
                let label = if label.is_empty() {
                    entity.to_string()
                } else {
                    label
                };

                if !filter.is_empty() && !label.to_lowercase().contains(&filter.to_lowercase()) {
                    continue;
                }

                let is_selected = *selected == Some(entity);
                if ui.selectable_label(is_selected, &label).clicked() {
                    *selected = if is_selected { None } else { Some(entity) };
                }
            }
        });

    action
}
