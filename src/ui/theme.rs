use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_TRACK: Color32 = Color32::from_rgb(20, 22, 28);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_STATUS: Color32 = Color32::from_rgb(22, 22, 30);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const DATE_MARKER: Color32 = Color32::from_rgb(120, 200, 150);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const LABEL_ROW_HEIGHT: f32 = 40.0;
pub const DATE_FIELD_WIDTH: f32 = 120.0;
pub const CALENDAR_CELL: f32 = 32.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_title() -> FontId {
    FontId::proportional(20.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_label_time() -> FontId {
    FontId::monospace(10.5)
}

pub fn font_label_date() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD; // TextEdit bg

    let widgets = [
        (&mut visuals.widgets.noninteractive, BG_PANEL, BORDER_SUBTLE),
        (&mut visuals.widgets.inactive, Color32::from_rgb(42, 44, 56), BORDER_SUBTLE),
        (&mut visuals.widgets.hovered, Color32::from_rgb(52, 54, 68), ACCENT),
        (&mut visuals.widgets.active, Color32::from_rgb(60, 62, 76), ACCENT),
        (&mut visuals.widgets.open, Color32::from_rgb(50, 52, 66), ACCENT),
    ];
    for (widget, fill, stroke) in widgets {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.bg_stroke = Stroke::new(1.0, stroke);
        widget.rounding = Rounding::same(4.0);
    }

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
