use crate::app::ActivityLogApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut ActivityLogApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Scroll ↑").clicked() {
                app.timeline.viewport.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Scroll ↓").clicked() {
                app.timeline.viewport.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Reset View").clicked() {
                app.reset_view();
                ui.close_menu();
            }
            if ui.button("  Clear Dates").clicked() {
                app.clear_range();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Settings  ").font(theme::font_menu()), |ui| {
            if ui.button("  Timeline...").clicked() {
                app.open_settings_dialog();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });
    });
}
