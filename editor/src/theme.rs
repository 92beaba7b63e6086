//! Editor color theme — dark surfaces with a heather accent.

use egui::{Color32, Stroke};

pub const ACCENT: Color32 = Color32::from_rgb(148, 98, 170);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(168, 116, 190);
pub const ACCENT_PRESSED: Color32 = Color32::from_rgb(122, 80, 142);

pub const BG: Color32 = Color32::from_rgb(15, 15, 19);
pub const PANEL: Color32 = Color32::from_rgb(21, 22, 28);
pub const WIDGET: Color32 = Color32::from_rgb(28, 29, 37);
pub const WIDGET_HOVER: Color32 = Color32::from_rgb(36, 37, 47);
pub const BORDER: Color32 = Color32::from_rgb(52, 53, 66);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(233, 234, 240);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(124, 128, 144);

pub const SELECTION: Color32 = Color32::from_rgb(52, 36, 60);
pub const SUCCESS: Color32 = Color32::from_rgb(96, 170, 120);
pub const WARNING: Color32 = Color32::from_rgb(224, 180, 100);
pub const ERROR: Color32 = Color32::from_rgb(216, 92, 92);

fn widget(fill: Color32, stroke: Color32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke::new(1.0, stroke),
        fg_stroke: Stroke::new(1.0, TEXT_PRIMARY),
        corner_radius: egui::CornerRadius::same(3),
        expansion: 0.0,
    }
}

/// Apply the theme to an egui context.
pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let v = &mut style.visuals;
    *v = egui::Visuals::dark();

    v.window_fill = PANEL;
    v.panel_fill = PANEL;
    v.extreme_bg_color = BG;
    v.faint_bg_color = WIDGET;
    v.code_bg_color = BG;
    v.window_corner_radius = egui::CornerRadius::same(4);
    v.window_stroke = Stroke::new(1.0, BORDER);

    v.widgets.noninteractive = widget(PANEL, BORDER);
    v.widgets.inactive = widget(WIDGET, BORDER);
    v.widgets.hovered = widget(WIDGET_HOVER, ACCENT_HOVER);
    v.widgets.active = widget(ACCENT_PRESSED, ACCENT);
    v.widgets.open = widget(WIDGET_HOVER, ACCENT);

    v.selection.bg_fill = SELECTION;
    v.selection.stroke = Stroke::new(1.0, ACCENT);
    v.hyperlink_color = ACCENT_HOVER;

    v.override_text_color = Some(TEXT_PRIMARY);
    v.warn_fg_color = WARNING;
    v.error_fg_color = ERROR;

    ctx.set_style(style);
}
