//! The editor application shell: menu bar, toolbar, hierarchy and
//! inspector panels, and the central scene document view.

use std::path::PathBuf;

use calluna_core::AssetServer;
use calluna_ecs::{Entity, Scene, SceneSerializer, ScriptHost};

use crate::hierarchy::{self, HierarchyAction};
use crate::history::SnapshotHistory;
use crate::inspector;
use crate::project::ProjectConfig;

const SCENE_FILTER: (&str, &[&str]) = ("Calluna scene", &["json"]);

pub struct CallunaApp {
    scene: Scene,
    assets: AssetServer,
    host: ScriptHost,
    history: SnapshotHistory,

    scene_path: Option<PathBuf>,
    project: ProjectConfig,

    selected: Option<Entity>,
    filter: String,
    /// True while the previous frame also edited the scene, so a drag
    /// produces one undo step instead of one per frame.
    edit_streak: bool,
    status: String,
}

impl CallunaApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        crate::theme::apply(&cc.egui_ctx);

        let project_file = std::path::Path::new("project.toml");
        let project = match ProjectConfig::load_or_default(project_file) {
            Ok(project) => project,
            Err(err) => {
                log::error!("could not load project file: {err}");
                ProjectConfig::default()
            }
        };
        let assets = AssetServer::new(project.asset_root(project_file));

        Self {
            scene: Scene::new("Untitled"),
            assets,
            host: ScriptHost::default(),
            history: SnapshotHistory::default(),
            scene_path: None,
            project,
            selected: None,
            filter: String::new(),
            edit_streak: false,
            status: String::new(),
        }
    }

    // --- scene document helpers ---

    /// Serializes the current scene, or `None` (with an error log) if
    /// serialization failed.
    fn document(&self) -> Option<String> {
        let serializer = SceneSerializer::new(&self.assets, &self.host);
        match serializer.serialize_to_string(&self.scene) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("could not serialize scene: {err}");
                None
            }
        }
    }

    fn restore(&mut self, document: &str) {
        let serializer = SceneSerializer::new(&self.assets, &self.host);
        if let Err(err) = serializer.deserialize_from_str(&mut self.scene, document) {
            log::error!("could not restore scene snapshot: {err}");
        }
        // Entity handles do not survive a reload
        self.selected = None;
    }

    // --- file actions ---

    fn new_scene(&mut self) {
        self.scene = Scene::new("Untitled");
        self.scene_path = None;
        self.selected = None;
        self.history.clear();
        self.host.clear_instances();
        self.status = "New scene".into();
    }

    fn open_scene(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(SCENE_FILTER.0, SCENE_FILTER.1)
            .set_directory(self.assets.root())
            .pick_file()
        else {
            return;
        };

        let serializer = SceneSerializer::new(&self.assets, &self.host);
        match serializer.load(&mut self.scene, &path) {
            Ok(()) => {
                if let Some(stem) = path.file_stem() {
                    self.scene.set_name(stem.to_string_lossy().into_owned());
                }
                self.status = format!("Opened {}", path.display());
                self.scene_path = Some(path);
                self.selected = None;
                self.history.clear();
            }
            Err(err) => {
                self.status = format!("Open failed: {err}");
                log::error!("could not open '{}': {err}", path.display());
            }
        }
    }

    fn save_scene(&mut self) {
        match &self.scene_path {
            Some(path) => {
                let path = path.clone();
                self.save_to(path);
            }
            None => self.save_scene_as(),
        }
    }

    fn save_scene_as(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(SCENE_FILTER.0, SCENE_FILTER.1)
            .set_directory(self.assets.root())
            .set_file_name(format!("{}.json", self.scene.name()))
            .save_file()
        else {
            return;
        };
        self.save_to(path);
    }

    fn save_to(&mut self, path: PathBuf) {
        let serializer = SceneSerializer::new(&self.assets, &self.host);
        match serializer.save(&self.scene, &path) {
            Ok(()) => {
                self.status = format!("Saved {}", path.display());
                self.scene_path = Some(path);
            }
            Err(err) => {
                self.status = format!("Save failed: {err}");
            }
        }
    }

    // --- undo/redo ---

    fn undo(&mut self) {
        let Some(current) = self.document() else {
            return;
        };
        if let Some(snapshot) = self.history.undo(current) {
            self.restore(&snapshot);
            self.status = "Undo".into();
        }
    }

    fn redo(&mut self) {
        let Some(current) = self.document() else {
            return;
        };
        if let Some(snapshot) = self.history.redo(current) {
            self.restore(&snapshot);
            self.status = "Redo".into();
        }
    }
}

impl eframe::App for CallunaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Snapshot of the scene as it is *before* this frame's edits; it
        // feeds both the document view and the undo stack.
        let document = self.document().unwrap_or_default();

        // Keyboard shortcuts
        let undo_shortcut =
            egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
        let redo_shortcut = egui::KeyboardShortcut::new(
            egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
            egui::Key::Z,
        );
        let save_shortcut =
            egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
        if ctx.input_mut(|input| input.consume_shortcut(&undo_shortcut)) {
            self.undo();
        }
        if ctx.input_mut(|input| input.consume_shortcut(&redo_shortcut)) {
            self.redo();
        }
        if ctx.input_mut(|input| input.consume_shortcut(&save_shortcut)) {
            self.save_scene();
        }

        // --- menu bar ---
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Scene").clicked() {
                        self.new_scene();
                        ui.close();
                    }
                    if ui.button("Open…").clicked() {
                        self.open_scene();
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add(egui::Button::new("Save").shortcut_text("Ctrl+S"))
                        .clicked()
                    {
                        self.save_scene();
                        ui.close();
                    }
                    if ui.button("Save As…").clicked() {
                        self.save_scene_as();
                        ui.close();
                    }
                });
                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(
                            self.history.can_undo(),
                            egui::Button::new("Undo").shortcut_text("Ctrl+Z"),
                        )
                        .clicked()
                    {
                        self.undo();
                        ui.close();
                    }
                    if ui
                        .add_enabled(
                            self.history.can_redo(),
                            egui::Button::new("Redo").shortcut_text("Ctrl+Shift+Z"),
                        )
                        .clicked()
                    {
                        self.redo();
                        ui.close();
                    }
                });
            });
        });

        // --- toolbar ---
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.history.can_undo(), egui::Button::new("⟲ Undo"))
                    .clicked()
                {
                    self.undo();
                }
                if ui
                    .add_enabled(self.history.can_redo(), egui::Button::new("⟳ Redo"))
                    .clicked()
                {
                    self.redo();
                }
                ui.separator();

                let mut name = self.scene.name().to_owned();
                if ui.text_edit_singleline(&mut name).changed() {
                    self.scene.set_name(name);
                }
                if let Some(path) = &self.scene_path {
                    ui.label(
                        egui::RichText::new(path.display().to_string())
                            .small()
                            .color(crate::theme::TEXT_MUTED),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.status)
                            .small()
                            .color(crate::theme::TEXT_MUTED),
                    );
                    ui.label(
                        egui::RichText::new(&self.project.project.name)
                            .small()
                            .color(crate::theme::ACCENT),
                    );
                });
            });
        });

        // --- panels ---
        let mut scene_changed = false;

        egui::SidePanel::left("hierarchy")
            .default_width(220.0)
            .show(ctx, |ui| {
                let action =
                    hierarchy::show_hierarchy(ui, &self.scene, &mut self.selected, &mut self.filter);
                if let Some(action) = action {
                    self.history.push(document.clone());
                    match action {
                        HierarchyAction::CreateEntity => {
                            let entity = self.scene.create_entity("New Entity");
                            self.selected = Some(entity);
                        }
                        HierarchyAction::DestroyEntity(entity) => {
                            if let Some(uuid) = self.scene.registry().uuid(entity) {
                                self.host.remove_instance(&uuid);
                            }
                            self.scene.registry_mut().destroy(entity);
                            if self.selected == Some(entity) {
                                self.selected = None;
                            }
                        }
                    }
                }
            });

        egui::SidePanel::right("inspector")
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.selected {
                        Some(entity) => {
                            scene_changed |= inspector::show_inspector(
                                ui,
                                &mut self.scene,
                                &self.assets,
                                &mut self.host,
                                entity,
                            );
                        }
                        None => {
                            ui.label("No entity selected");
                        }
                    });
            });

        // Coalesce continuous edits (drags) into one undo step
        if scene_changed {
            if !self.edit_streak {
                self.history.push(document.clone());
            }
            self.edit_streak = true;
        } else {
            self.edit_streak = false;
        }

        // --- document view ---
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Scene document")
                    .strong()
                    .color(crate::theme::TEXT_PRIMARY),
            );
            ui.separator();
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // Read-only: edits go through the panels
                    let mut text = document.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }
}
