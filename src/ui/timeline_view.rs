use crate::config::TimelineSettings;
use crate::model::memo::Memo;
use crate::model::segment::{IntensitySource, RandomIntensity, SeededIntensity};
use crate::model::{DateRangeState, Label, LabelKind, SegmentDataset, TimelineViewport};
use crate::ui::theme;
use chrono::NaiveDate;
use egui::{Align2, Context, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

type LabelKey = (NaiveDate, NaiveDate, f32, f64, f32);

/// Holds the window-wide pointer routing used while a drag is in progress.
///
/// While alive, pointer moves and releases are taken from anywhere in the
/// window instead of only over the track. Dropping it ends the routing.
pub struct PointerCapture {
    ctx: Context,
}

impl PointerCapture {
    fn acquire(ctx: &Context) -> Self {
        log::debug!("timeline pointer capture acquired");
        Self { ctx: ctx.clone() }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        log::debug!("timeline pointer capture released");
        self.ctx.request_repaint();
    }
}

/// Figures the status bar shows about the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineStats {
    pub segments: usize,
    pub visible: usize,
    pub labels: usize,
    pub zoom: f32,
}

/// The activity timeline widget: label row above a pannable, zoomable track.
pub struct TimelineView {
    pub viewport: TimelineViewport,
    dataset: SegmentDataset,
    labels: Memo<LabelKey, Vec<Label>>,
    capture: Option<PointerCapture>,
}

impl TimelineView {
    pub fn new(settings: TimelineSettings) -> Self {
        Self {
            dataset: SegmentDataset::new(intensity_source(&settings)),
            viewport: TimelineViewport::new(settings),
            labels: Memo::new(),
            capture: None,
        }
    }

    pub fn apply_settings(&mut self, settings: TimelineSettings) {
        if settings.intensity_seed != self.viewport.settings().intensity_seed {
            self.dataset = SegmentDataset::new(intensity_source(&settings));
        }
        self.viewport.set_settings(settings);
        self.labels.clear();
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Acquire or release the pointer capture to match the drag state.
    fn sync_capture(&mut self, ctx: &Context) {
        match (self.viewport.is_dragging(), self.capture.is_some()) {
            (true, false) => self.capture = Some(PointerCapture::acquire(ctx)),
            (false, true) => self.capture = None,
            _ => {}
        }
    }

    /// Render the timeline for `range`. Renders nothing and returns `None`
    /// while either end of the range is missing.
    pub fn show(&mut self, range: &DateRangeState, ui: &mut Ui) -> Option<TimelineStats> {
        let Some((start, end)) = range.bounds() else {
            self.viewport.pointer_up();
            self.sync_capture(ui.ctx());
            return None;
        };

        self.viewport.set_container_width(ui.available_width());
        let width = self.viewport.container_width;
        let track_height = self.viewport.settings().track_height;
        let color = self.viewport.settings().segment_color;

        let (labels_rect, _) =
            ui.allocate_exact_size(Vec2::new(width, theme::LABEL_ROW_HEIGHT), Sense::hover());
        let (track_rect, track_response) =
            ui.allocate_exact_size(Vec2::new(width, track_height), Sense::click_and_drag());

        self.handle_input(ui.ctx(), track_rect, &track_response);

        let segments = self.dataset.segments(start, end, color);
        let window = self.viewport.visible_window(segments.len());
        let viewport = &self.viewport;
        let key = (
            start,
            end,
            viewport.zoom_level,
            viewport.pan_offset,
            viewport.container_width,
        );
        let labels = self.labels.get_or_compute(key, |_| viewport.labels(start, end));

        let painter = ui.painter_at(labels_rect.union(track_rect));

        // Track
        painter.rect_filled(track_rect, 0.0, theme::BG_TRACK);
        for placed in window.place(segments) {
            let rect = Rect::from_min_size(
                Pos2::new(track_rect.left() + placed.left, track_rect.top()),
                Vec2::new(placed.width, track_rect.height()),
            );
            painter.rect_filled(
                rect,
                0.0,
                placed.segment.color.gamma_multiply(placed.segment.intensity),
            );
        }

        // Labels
        for label in labels.iter().filter(|l| l.opacity > 0.0) {
            draw_label(&painter, labels_rect, track_rect, label);
        }

        painter.line_segment(
            [track_rect.left_top(), track_rect.right_top()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        // Tooltip for the segment under the pointer
        if track_response.hovered() && !viewport.is_dragging() {
            let hovered = track_response
                .hover_pos()
                .and_then(|pos| viewport.segment_index_at(pos.x - track_rect.left(), segments.len()));
            if let Some(segment) = hovered.and_then(|index| segments.get(index)) {
                egui::show_tooltip_at_pointer(
                    ui.ctx(),
                    ui.layer_id(),
                    egui::Id::new("timeline-segment-tip"),
                    |ui| {
                        ui.strong(segment.date.format("%b %-d, %Y").to_string());
                        ui.label(segment.time());
                        ui.label(format!("Intensity: {:.0}%", segment.intensity * 100.0));
                    },
                );
            }
        }

        Some(TimelineStats {
            segments: segments.len(),
            visible: window.len(),
            labels: labels.len(),
            zoom: viewport.zoom_level,
        })
    }

    fn handle_input(&mut self, ctx: &Context, track: Rect, response: &Response) {
        let (hover, latest, pressed, released, primary_down) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
            )
        });
        // One zoom step per wheel notch, however many arrive in a frame.
        let wheel_steps: Vec<f32> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::MouseWheel { delta, .. } if delta.y != 0.0 => Some(delta.y),
                    _ => None,
                })
                .collect()
        });

        if self.is_capturing() {
            if let Some(pos) = latest {
                self.viewport.pointer_moved(pos.x - track.left());
            }
            if released || !primary_down {
                self.viewport.pointer_up();
            }
        } else if let Some(pos) = hover.filter(|p| track.contains(*p)) {
            self.viewport.pointer_moved(pos.x - track.left());
        }

        if response.hovered() && pressed {
            if let Some(pos) = hover {
                self.viewport.pointer_down(pos.x - track.left());
            }
        }

        if response.hovered() && !wheel_steps.is_empty() {
            // egui reports wheel-up as positive y.
            for delta_y in wheel_steps {
                self.viewport.wheel(-delta_y);
            }
            ctx.input_mut(|i| {
                i.raw_scroll_delta = Vec2::ZERO;
                i.smooth_scroll_delta = Vec2::ZERO;
            });
        }

        if self.viewport.is_dragging() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Grab);
        }

        self.sync_capture(ctx);
    }
}

fn intensity_source(settings: &TimelineSettings) -> Box<dyn IntensitySource> {
    match settings.intensity_seed {
        Some(seed) => Box::new(SeededIntensity::new(seed)),
        None => Box::new(RandomIntensity),
    }
}

fn draw_label(painter: &egui::Painter, labels_rect: Rect, track_rect: Rect, label: &Label) {
    let x = labels_rect.left() + label.left;
    let (tick, text_color) = match label.kind {
        LabelKind::DateMarker => (theme::DATE_MARKER, theme::DATE_MARKER),
        LabelKind::TimeMarker => (theme::GRID_LINE, theme::TEXT_SECONDARY),
    };

    painter.line_segment(
        [
            Pos2::new(x, labels_rect.bottom() - 6.0),
            Pos2::new(x, track_rect.bottom()),
        ],
        Stroke::new(1.0, tick.gamma_multiply(label.opacity)),
    );
    painter.text(
        Pos2::new(x + 3.0, labels_rect.top() + 2.0),
        Align2::LEFT_TOP,
        &label.time,
        theme::font_label_time(),
        text_color.gamma_multiply(label.opacity),
    );
    if !label.date.is_empty() {
        painter.text(
            Pos2::new(x + 3.0, labels_rect.top() + 16.0),
            Align2::LEFT_TOP,
            &label.date,
            theme::font_label_date(),
            theme::TEXT_PRIMARY.gamma_multiply(label.opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TimelineView {
        TimelineView::new(TimelineSettings {
            intensity_seed: Some(1),
            ..Default::default()
        })
    }

    fn render(view: &mut TimelineView, range: &DateRangeState) -> Option<TimelineStats> {
        frame(&Context::default(), view, range, Vec::new())
    }

    const SCREEN_WIDTH: f32 = 1000.0;

    /// Run one frame on `ctx` with the given input events.
    fn frame(
        ctx: &Context,
        view: &mut TimelineView,
        range: &DateRangeState,
        events: Vec<egui::Event>,
    ) -> Option<TimelineStats> {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(SCREEN_WIDTH, 600.0))),
            events,
            ..Default::default()
        };
        let mut stats = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                stats = view.show(range, ui);
            });
        });
        stats
    }

    fn one_day() -> DateRangeState {
        DateRangeState {
            from: "01/01/2024".into(),
            to: "01/01/2024".into(),
        }
    }

    /// Screen position of track-relative `x`, vertically inside the track.
    fn on_track(view: &TimelineView, x: f32) -> Pos2 {
        let margin = (SCREEN_WIDTH - view.viewport.container_width) / 2.0;
        let y = margin + theme::LABEL_ROW_HEIGHT + view.viewport.settings().track_height / 2.0;
        Pos2::new(margin + x, y)
    }

    fn wheel_up() -> egui::Event {
        egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: Vec2::new(0.0, 1.0),
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn primary(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Lay the widget out once and put the pointer over the track at `x`.
    fn hover_track(ctx: &Context, view: &mut TimelineView, range: &DateRangeState, x: f32) {
        frame(ctx, view, range, Vec::new());
        let pos = on_track(view, x);
        frame(ctx, view, range, vec![egui::Event::PointerMoved(pos)]);
    }

    #[test]
    fn renders_nothing_without_both_dates() {
        let mut view = view();
        let only_from = DateRangeState {
            from: "01/01/2024".into(),
            to: String::new(),
        };
        assert_eq!(render(&mut view, &only_from), None);
        assert_eq!(render(&mut view, &DateRangeState::default()), None);
    }

    #[test]
    fn single_day_renders_288_segments() {
        let mut view = view();
        let range = DateRangeState {
            from: "01/01/2024".into(),
            to: "01/01/2024".into(),
        };
        let stats = render(&mut view, &range).unwrap();
        assert_eq!(stats.segments, 288);
        assert_eq!(stats.labels, 1);
        assert!(stats.visible <= 288);
        assert!(stats.visible > 0);
    }

    #[test]
    fn wheel_up_zooms_in_around_the_pointer() {
        let ctx = Context::default();
        let mut view = view();
        let range = one_day();
        hover_track(&ctx, &mut view, &range, 500.0);
        let anchor = view.viewport.mouse_position * view.viewport.container_width;
        assert!((anchor - 500.0).abs() < 1e-3);

        frame(&ctx, &mut view, &range, vec![wheel_up()]);
        assert!((view.viewport.zoom_level - 1.1).abs() < 1e-6);
        assert!((view.viewport.pan_offset + 50.0).abs() < 1e-3);
    }

    #[test]
    fn each_wheel_notch_is_one_zoom_step() {
        let ctx = Context::default();
        let mut view = view();
        let range = one_day();
        hover_track(&ctx, &mut view, &range, 200.0);

        frame(&ctx, &mut view, &range, vec![wheel_up(), wheel_up(), wheel_up()]);
        assert!((view.viewport.zoom_level - 1.331).abs() < 1e-5);
    }

    #[test]
    fn drag_follows_pointer_outside_the_track_until_release() {
        let ctx = Context::default();
        let mut view = view();
        let range = one_day();
        hover_track(&ctx, &mut view, &range, 500.0);
        frame(&ctx, &mut view, &range, vec![wheel_up()]);
        let pan_at_press = view.viewport.pan_offset;

        let press = on_track(&view, 500.0);
        frame(&ctx, &mut view, &range, vec![primary(press, true)]);
        assert!(view.viewport.is_dragging());
        assert!(view.is_capturing());

        // Below the track, 200 px to the left of the press.
        let outside = Pos2::new(press.x - 200.0, 400.0);
        frame(&ctx, &mut view, &range, vec![egui::Event::PointerMoved(outside)]);
        assert!(view.is_capturing());
        assert!((view.viewport.pan_offset - (pan_at_press - 200.0)).abs() < 1e-3);

        frame(&ctx, &mut view, &range, vec![primary(outside, false)]);
        assert!(!view.viewport.is_dragging());
        assert!(!view.is_capturing());

        let pan_after = view.viewport.pan_offset;
        frame(&ctx, &mut view, &range, vec![egui::Event::PointerMoved(press)]);
        assert_eq!(view.viewport.pan_offset, pan_after);
    }

    #[test]
    fn capture_follows_drag_state() {
        let ctx = Context::default();
        let mut view = view();

        view.viewport.pointer_down(10.0);
        view.sync_capture(&ctx);
        assert!(view.is_capturing());

        view.viewport.pointer_up();
        view.sync_capture(&ctx);
        assert!(!view.is_capturing());
    }

    #[test]
    fn clearing_the_range_releases_capture() {
        let mut view = view();
        view.viewport.pointer_down(10.0);
        view.sync_capture(&Context::default());
        assert!(view.is_capturing());

        assert_eq!(render(&mut view, &DateRangeState::default()), None);
        assert!(!view.is_capturing());
        assert!(!view.viewport.is_dragging());
    }
}
