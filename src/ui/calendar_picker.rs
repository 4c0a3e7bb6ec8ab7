use crate::model::calendar::WEEKDAY_NAMES;
use crate::model::{CalendarCell, CalendarMonth};
use crate::ui::theme;
use egui::{Context, Id, Pos2, RichText};
use egui_phosphor::regular as icons;

/// What the picker asks of its owner after a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarResponse {
    /// A day was clicked, formatted `MM/DD/YYYY`.
    pub selected: Option<String>,
    /// The picker should be closed.
    pub close: bool,
}

/// A popup month grid. Dropping it is closing it; a new one starts at the
/// current month again.
#[derive(Debug, Clone)]
pub struct CalendarPicker {
    id: Id,
    month: CalendarMonth,
    just_opened: bool,
}

impl CalendarPicker {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(("calendar-picker", id_salt)),
            month: CalendarMonth::current(),
            just_opened: true,
        }
    }

    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    /// Selection followed by close, as a click on `day` produces.
    pub fn select_day(&self, day: u32) -> CalendarResponse {
        CalendarResponse {
            selected: Some(self.month.format_day(day)),
            close: true,
        }
    }

    /// Render the popup with its top-left corner at `anchor`.
    pub fn show(&mut self, ctx: &Context, anchor: Pos2) -> CalendarResponse {
        let mut picked_day = None;
        let mut navigate: Option<bool> = None;
        let month = self.month();

        let area = egui::Area::new(self.id)
            .order(egui::Order::Foreground)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(7.0 * theme::CALENDAR_CELL);

                    ui.horizontal(|ui| {
                        if ui.button(icons::CARET_LEFT).clicked() {
                            navigate = Some(false);
                        }
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button(icons::CARET_RIGHT).clicked() {
                                    navigate = Some(true);
                                }
                                ui.centered_and_justified(|ui| {
                                    ui.label(RichText::new(month.title()).strong());
                                });
                            },
                        );
                    });
                    ui.add_space(4.0);

                    egui::Grid::new(self.id.with("days"))
                        .num_columns(7)
                        .spacing([2.0, 2.0])
                        .min_col_width(theme::CALENDAR_CELL)
                        .show(ui, |ui| {
                            for name in WEEKDAY_NAMES {
                                ui.label(RichText::new(name).small().color(theme::TEXT_DIM));
                            }
                            ui.end_row();

                            for (i, cell) in month.cells().into_iter().enumerate() {
                                match cell {
                                    CalendarCell::Empty => {
                                        ui.label("");
                                    }
                                    CalendarCell::Day(day) => {
                                        let button =
                                            egui::Button::new(day.to_string()).frame(false);
                                        let size = [theme::CALENDAR_CELL, theme::CALENDAR_CELL - 8.0];
                                        if ui.add_sized(size, button).clicked() {
                                            picked_day = Some(day);
                                        }
                                    }
                                }
                                if i % 7 == 6 {
                                    ui.end_row();
                                }
                            }
                        });
                });
            });

        match navigate {
            Some(true) => self.next_month(),
            Some(false) => self.prev_month(),
            None => {}
        }

        let mut response = match picked_day {
            Some(day) => self.select_day(day),
            None => CalendarResponse::default(),
        };

        // The click that opened the picker lands outside it; ignore that one.
        let dismissed = !self.just_opened && area.response.clicked_elsewhere();
        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            response.close = true;
        }
        self.just_opened = false;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_on_current_month() {
        let picker = CalendarPicker::new("from");
        assert_eq!(picker.month(), CalendarMonth::current());
    }

    #[test]
    fn navigation_rolls_over_years() {
        let mut picker = CalendarPicker::new("nav");
        picker.month = CalendarMonth::new(2024, 1);
        picker.prev_month();
        assert_eq!(picker.month(), CalendarMonth::new(2023, 12));
        picker.next_month();
        picker.next_month();
        assert_eq!(picker.month(), CalendarMonth::new(2024, 2));
    }

    #[test]
    fn selecting_a_day_selects_then_closes() {
        let mut picker = CalendarPicker::new("select");
        picker.month = CalendarMonth::new(2024, 4);
        assert_eq!(
            picker.select_day(17),
            CalendarResponse {
                selected: Some("04/17/2024".to_string()),
                close: true,
            }
        );
    }

    #[test]
    fn first_frame_renders_without_closing() {
        let ctx = Context::default();
        let mut picker = CalendarPicker::new("frame");
        let mut response = CalendarResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = picker.show(ctx, Pos2::ZERO);
        });
        assert_eq!(response, CalendarResponse::default());
        assert!(!picker.just_opened);
    }

    fn frame(
        ctx: &Context,
        picker: &mut CalendarPicker,
        events: Vec<egui::Event>,
    ) -> CalendarResponse {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(1000.0, 600.0))),
            events,
            ..Default::default()
        };
        let mut response = CalendarResponse::default();
        let _ = ctx.run(input, |ctx| {
            response = picker.show(ctx, Pos2::new(20.0, 20.0));
        });
        response
    }

    fn primary(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn click(ctx: &Context, picker: &mut CalendarPicker, pos: Pos2) -> CalendarResponse {
        frame(ctx, picker, vec![egui::Event::PointerMoved(pos)]);
        let on_press = frame(ctx, picker, vec![primary(pos, true)]);
        assert!(!on_press.close);
        frame(ctx, picker, vec![primary(pos, false)])
    }

    #[test]
    fn click_inside_keeps_the_picker_open() {
        let ctx = Context::default();
        let mut picker = CalendarPicker::new("inside");
        frame(&ctx, &mut picker, Vec::new());
        assert_eq!(frame(&ctx, &mut picker, Vec::new()), CalendarResponse::default());

        // The popup frame margin, clear of every button.
        let area = ctx.memory(|m| m.area_rect(picker.id)).unwrap();
        let response = click(&ctx, &mut picker, area.min + egui::vec2(2.0, 2.0));
        assert_eq!(response, CalendarResponse::default());
    }

    #[test]
    fn click_outside_closes_without_selecting() {
        let ctx = Context::default();
        let mut picker = CalendarPicker::new("outside");
        frame(&ctx, &mut picker, Vec::new());
        assert_eq!(frame(&ctx, &mut picker, Vec::new()), CalendarResponse::default());

        let response = click(&ctx, &mut picker, Pos2::new(800.0, 500.0));
        assert_eq!(
            response,
            CalendarResponse {
                selected: None,
                close: true,
            }
        );
    }

    #[test]
    fn escape_closes() {
        let ctx = Context::default();
        let mut picker = CalendarPicker::new("escape");
        frame(&ctx, &mut picker, Vec::new());
        let response = frame(
            &ctx,
            &mut picker,
            vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
        );
        assert!(response.close);
        assert_eq!(response.selected, None);
    }
}
