use std::path::PathBuf;

use crate::config::AppSettings;
use crate::io;
use crate::model::DateRangeState;
use crate::ui;
use crate::ui::range_input::{RangeInputAction, RangeInputPair};
use crate::ui::timeline_view::{TimelineStats, TimelineView};

/// Main application state.
pub struct ActivityLogApp {
    pub date_range: DateRangeState,
    pub range_input: RangeInputPair,
    pub timeline: TimelineView,

    // Settings
    pub settings: AppSettings,
    pub settings_path: Option<PathBuf>,
    pub settings_draft: Option<AppSettings>,

    // Dialog state
    pub show_about: bool,

    // Status message
    pub status_message: String,
    last_stats: Option<TimelineStats>,
}

impl ActivityLogApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let (settings, settings_path) = io::settings::load_or_default();
        Self::with_settings(settings, settings_path)
    }

    pub fn with_settings(settings: AppSettings, settings_path: Option<PathBuf>) -> Self {
        Self {
            date_range: DateRangeState::default(),
            range_input: RangeInputPair::default(),
            timeline: TimelineView::new(settings.timeline.clone()),
            settings,
            settings_path,
            settings_draft: None,
            show_about: false,
            status_message: "Pick a date range".to_string(),
            last_stats: None,
        }
    }

    // --- Range ---

    pub fn apply_range_action(&mut self, action: RangeInputAction) {
        match action {
            RangeInputAction::FromDateChanged(date) => self.date_range.set_from(date),
            RangeInputAction::ToDateChanged(date) => self.date_range.set_to(date),
        }
        self.status_message = match self.date_range.bounds() {
            Some((start, end)) if start > end => "Start date is after end date".to_string(),
            Some((start, end)) => format!(
                "Showing {} → {}",
                start.format("%b %-d, %Y"),
                end.format("%b %-d, %Y")
            ),
            None => "Pick a date range".to_string(),
        };
    }

    pub fn clear_range(&mut self) {
        self.date_range = DateRangeState::default();
        self.status_message = "Dates cleared".to_string();
    }

    // --- View ---

    pub fn reset_view(&mut self) {
        self.timeline.viewport.reset();
        self.status_message = "View reset".to_string();
    }

    // --- Settings ---

    pub fn open_settings_dialog(&mut self) {
        self.settings_draft = Some(self.settings.clone());
    }

    pub fn apply_settings(&mut self, mut settings: AppSettings) {
        settings.timeline.sanitize();
        self.timeline.apply_settings(settings.timeline.clone());
        self.settings = settings;
        self.status_message = "Settings applied".to_string();
    }

    pub fn save_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            self.status_message = "No settings location available".to_string();
            return;
        };
        match io::save_settings(&self.settings, &path) {
            Ok(()) => self.status_message = "Settings saved".to_string(),
            Err(e) => {
                log::warn!("{e}");
                self.status_message = format!("Error saving settings: {}", e);
            }
        }
    }

    fn status_summary(&self) -> String {
        match self.last_stats {
            Some(stats) => format!(
                "Segments: {} · Visible: {} · Labels: {} · Zoom: {:.0}%",
                stats.segments,
                stats.visible,
                stats.labels,
                stats.zoom * 100.0
            ),
            None => format!("Zoom: {:.0}%", self.timeline.viewport.zoom_level * 100.0),
        }
    }
}

impl eframe::App for ActivityLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.status_summary())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: range inputs above the timeline
        let mut range_actions = Vec::new();
        let central_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(16.0));
        egui::CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Activity Log")
                    .font(ui::theme::font_title())
                    .strong(),
            );
            ui.add_space(8.0);
            range_actions = self.range_input.show(&self.date_range, ui);
            ui.add_space(16.0);
            self.last_stats = self.timeline.show(&self.date_range, ui);
        });
        for action in range_actions {
            self.apply_range_action(action);
        }

        // Dialogs
        if self.settings_draft.is_some() {
            ui::dialogs::show_settings_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> ActivityLogApp {
        ActivityLogApp::with_settings(AppSettings::default(), None)
    }

    #[test]
    fn range_actions_update_both_ends() {
        let mut app = app();
        app.apply_range_action(RangeInputAction::FromDateChanged("01/01/2024".into()));
        assert!(app.date_range.bounds().is_none());
        app.apply_range_action(RangeInputAction::ToDateChanged("01/31/2024".into()));
        assert!(app.date_range.bounds().is_some());
        assert!(app.status_message.starts_with("Showing Jan 1, 2024"));
    }

    #[test]
    fn applied_settings_reach_the_viewport() {
        let mut app = app();
        let mut settings = AppSettings::default();
        settings.timeline.max_zoom = 4.0;
        app.timeline.viewport.zoom_level = 8.0;
        app.apply_settings(settings);
        assert_eq!(app.timeline.viewport.settings().max_zoom, 4.0);
        assert_eq!(app.timeline.viewport.zoom_level, 4.0);
    }

    #[test]
    fn save_without_location_reports_in_status() {
        let mut app = app();
        app.save_settings();
        assert_eq!(app.status_message, "No settings location available");
    }

    #[test]
    fn save_writes_to_settings_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut app = ActivityLogApp::with_settings(AppSettings::default(), Some(path.clone()));
        app.save_settings();
        assert_eq!(app.status_message, "Settings saved");
        assert_eq!(io::settings::load_settings(&path).unwrap(), AppSettings::default());
    }
}
