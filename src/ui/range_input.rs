use crate::model::date_range::format_date;
use crate::model::DateRangeState;
use crate::ui::calendar_picker::CalendarPicker;
use crate::ui::theme;
use egui::{RichText, Ui};
use egui_phosphor::regular as icons;

/// Changes the range inputs request from their owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeInputAction {
    FromDateChanged(String),
    ToDateChanged(String),
}

/// The "from" / "to" field pair, each with its own optional picker.
///
/// The two pickers toggle independently, so both can be open at once.
#[derive(Debug, Default)]
pub struct RangeInputPair {
    from_picker: Option<CalendarPicker>,
    to_picker: Option<CalendarPicker>,
}

impl RangeInputPair {
    pub fn open_from(&mut self) {
        self.from_picker
            .get_or_insert_with(|| CalendarPicker::new("from-date"));
    }

    pub fn open_to(&mut self) {
        self.to_picker
            .get_or_insert_with(|| CalendarPicker::new("to-date"));
    }

    pub fn close_from(&mut self) {
        self.from_picker = None;
    }

    pub fn close_to(&mut self) {
        self.to_picker = None;
    }

    /// Render both fields and any open pickers.
    pub fn show(&mut self, range: &DateRangeState, ui: &mut Ui) -> Vec<RangeInputAction> {
        let mut actions = Vec::new();

        let (from_field, to_field) = ui
            .horizontal(|ui| {
                ui.label(RichText::new(icons::CALENDAR_BLANK).color(theme::TEXT_SECONDARY));
                let from_field = date_field(ui, &range.from, "04/17/2024");
                ui.label(RichText::new("to").color(theme::TEXT_SECONDARY));
                let to_field = date_field(ui, &range.to, "05/01/2024");
                (from_field, to_field)
            })
            .inner;

        if from_field.clicked() {
            self.open_from();
        }
        if to_field.clicked() {
            self.open_to();
        }

        let anchor_below = |field: &egui::Response| field.rect.left_bottom() + egui::vec2(0.0, 4.0);

        if let Some(picker) = self.from_picker.as_mut() {
            let response = picker.show(ui.ctx(), anchor_below(&from_field));
            if let Some(date) = response.selected {
                actions.push(RangeInputAction::FromDateChanged(date));
            }
            if response.close {
                self.close_from();
            }
        }
        if let Some(picker) = self.to_picker.as_mut() {
            let response = picker.show(ui.ctx(), anchor_below(&to_field));
            if let Some(date) = response.selected {
                actions.push(RangeInputAction::ToDateChanged(date));
            }
            if response.close {
                self.close_to();
            }
        }

        actions
    }
}

/// A read-only text field showing a formatted date.
fn date_field(ui: &mut Ui, value: &str, placeholder: &str) -> egui::Response {
    let display = format_date(value);
    let mut text: &str = &display;
    ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text(RichText::new(placeholder).color(theme::TEXT_DIM))
            .desired_width(theme::DATE_FIELD_WIDTH),
    )
}
