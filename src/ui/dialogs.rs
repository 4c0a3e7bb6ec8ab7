use crate::app::ActivityLogApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the timeline settings dialog, editing a draft copy until applied.
pub fn show_settings_dialog(app: &mut ActivityLogApp, ctx: &Context) {
    let Some(mut draft) = app.settings_draft.take() else {
        return;
    };
    let mut keep_open = true;
    let mut apply = false;
    let mut save = false;

    Window::new(RichText::new("Timeline Settings").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            let timeline = &mut draft.timeline;
            egui::Grid::new("timeline_settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Segment width").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut timeline.segment_width)
                            .range(0.5..=32.0)
                            .speed(0.1)
                            .suffix(" px"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Min zoom").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut timeline.min_zoom)
                            .range(0.05..=1.0)
                            .speed(0.01),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Max zoom").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut timeline.max_zoom)
                            .range(1.0..=50.0)
                            .speed(0.1),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Track height").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut timeline.track_height)
                            .range(20.0..=200.0)
                            .suffix(" px"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Segment colour").color(theme::TEXT_SECONDARY));
                    ui.color_edit_button_srgba(&mut timeline.segment_color);
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let apply_btn = egui::Button::new(RichText::new("Apply").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], apply_btn).clicked() {
                    apply = true;
                    keep_open = false;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Save")).clicked() {
                    apply = true;
                    save = true;
                    keep_open = false;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    keep_open = false;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        keep_open = false;
    }

    if apply {
        app.apply_settings(draft.clone());
    }
    if save {
        app.save_settings();
    }
    if keep_open {
        app.settings_draft = Some(draft);
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut ActivityLogApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Activity Log").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag the track to pan, scroll to zoom.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
