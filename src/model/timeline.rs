use chrono::NaiveDate;
use egui::Color32;

use super::date_range::days_in_range;
use super::memo::Memo;
use super::segment::{
    generate_segments, IntensitySource, Segment, SLOTS_PER_DAY, SLOTS_PER_HOUR,
};
use crate::config::TimelineSettings;

/// Width the viewport assumes until the first measurement arrives.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 1500.0;

/// Spacing of the time-axis labels, chosen from the zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelInterval {
    Day,
    SixHours,
    ThreeHours,
    Hour,
}

impl LabelInterval {
    pub fn for_zoom(zoom: f32) -> Self {
        if zoom >= 5.0 {
            Self::Hour
        } else if zoom >= 3.0 {
            Self::ThreeHours
        } else if zoom >= 1.5 {
            Self::SixHours
        } else {
            Self::Day
        }
    }

    pub fn hours(self) -> u32 {
        match self {
            Self::Day => 24,
            Self::SixHours => 6,
            Self::ThreeHours => 3,
            Self::Hour => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Day boundary, carries the date.
    DateMarker,
    /// Sub-day boundary, time only.
    TimeMarker,
}

/// A tick on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub left: f32,
    pub time: String,
    pub date: String,
    pub kind: LabelKind,
    /// 1.0 near the viewport, 0.0 in the pre-fade band just outside it.
    pub opacity: f32,
}

/// Pointer x and pan offset captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub x: f32,
    pub offset: f64,
}

/// Index range of the segments intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
    pub scaled_width: f32,
    pub pan_offset: f64,
}

/// A visible segment with its on-screen placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacedSegment<'a> {
    pub segment: &'a Segment,
    pub left: f32,
    pub width: f32,
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The windowed slice of `segments`, each with its absolute left offset.
    pub fn place<'a>(&self, segments: &'a [Segment]) -> impl Iterator<Item = PlacedSegment<'a>> {
        let start = self.start.min(segments.len());
        let end = self.end.min(segments.len()).max(start);
        let scaled_width = self.scaled_width;
        let scaled = f64::from(scaled_width);
        let pan_offset = self.pan_offset;
        segments[start..end]
            .iter()
            .enumerate()
            .map(move |(i, segment)| PlacedSegment {
                segment,
                left: ((start + i) as f64 * scaled + pan_offset) as f32,
                width: scaled_width,
            })
    }
}

/// Zoom, pan and drag state of the activity timeline.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// Multiplier on the base segment width.
    pub zoom_level: f32,
    /// Horizontal translation of the content, in pixels. Content x grows past
    /// what `f32` resolves on multi-year ranges, hence `f64`.
    pub pan_offset: f64,
    /// Last pointer position as a fraction of the container width; the zoom anchor.
    pub mouse_position: f32,
    pub container_width: f32,
    drag_start: Option<DragStart>,
    settings: TimelineSettings,
}

impl Default for TimelineViewport {
    fn default() -> Self {
        Self::new(TimelineSettings::default())
    }
}

impl TimelineViewport {
    pub fn new(settings: TimelineSettings) -> Self {
        Self {
            zoom_level: 1.0,
            pan_offset: 0.0,
            mouse_position: 0.5,
            container_width: DEFAULT_CONTAINER_WIDTH,
            drag_start: None,
            settings,
        }
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: TimelineSettings) {
        self.zoom_level = self.zoom_level.clamp(settings.min_zoom, settings.max_zoom);
        self.settings = settings;
    }

    /// Pixel width of one segment at the current zoom.
    pub fn scaled_segment_width(&self) -> f32 {
        self.settings.segment_width * self.zoom_level
    }

    pub fn label_interval(&self) -> LabelInterval {
        LabelInterval::for_zoom(self.zoom_level)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Record a new measured width. Returns whether it changed.
    pub fn set_container_width(&mut self, width: f32) -> bool {
        if width <= 0.0 || !width.is_finite() || width == self.container_width {
            return false;
        }
        log::debug!(
            "timeline container width {} -> {}",
            self.container_width,
            width
        );
        self.container_width = width;
        true
    }

    /// Restore the initial zoom and pan.
    pub fn reset(&mut self) {
        self.zoom_level = 1.0_f32.clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.pan_offset = 0.0;
        self.drag_start = None;
    }

    // --- Pointer and wheel input ---

    /// Pointer moved to `x`, measured from the left edge of the track.
    pub fn pointer_moved(&mut self, x: f32) {
        if self.container_width > 0.0 {
            self.mouse_position = x / self.container_width;
        }
        if let Some(start) = self.drag_start {
            self.pan_offset = start.offset + f64::from(x - start.x);
        }
    }

    /// Pointer pressed on the track at `x`.
    pub fn pointer_down(&mut self, x: f32) {
        self.drag_start = Some(DragStart {
            x,
            offset: self.pan_offset,
        });
    }

    pub fn pointer_up(&mut self) {
        self.drag_start = None;
    }

    /// Wheel input, `delta_y > 0` meaning scroll down (zoom out).
    pub fn wheel(&mut self, delta_y: f32) {
        let factor = if delta_y > 0.0 {
            self.settings.zoom_out_factor
        } else {
            self.settings.zoom_in_factor
        };
        self.zoom_by(factor);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.settings.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(self.settings.zoom_out_factor);
    }

    /// Multiply the zoom by `factor`, keeping the content point under the
    /// anchor (`mouse_position`) fixed on screen.
    pub fn zoom_by(&mut self, factor: f32) {
        let old_zoom = self.zoom_level;
        let new_zoom = (old_zoom * factor).clamp(self.settings.min_zoom, self.settings.max_zoom);

        let mouse_x = f64::from(self.mouse_position) * f64::from(self.container_width);
        let content_x = mouse_x - self.pan_offset;
        let new_content_x = content_x * f64::from(new_zoom) / f64::from(old_zoom);

        self.zoom_level = new_zoom;
        self.pan_offset = mouse_x - new_content_x;
    }

    // --- Derived views ---

    /// Segments of a dataset of `len` items that intersect the viewport,
    /// plus a one-segment margin on the right.
    pub fn visible_window(&self, len: usize) -> VisibleWindow {
        let scaled = f64::from(self.scaled_segment_width());
        let left = -self.pan_offset;
        let right = left + f64::from(self.container_width);

        let first = (left / scaled).floor().max(0.0);
        let last = ((right / scaled).ceil() + 1.0).max(0.0).min(len as f64);

        let start = (first as usize).min(len);
        let end = (last as usize).max(start);
        VisibleWindow {
            start,
            end,
            scaled_width: self.scaled_segment_width(),
            pan_offset: self.pan_offset,
        }
    }

    /// Index of the segment drawn under track-relative `x`, if any.
    pub fn segment_index_at(&self, x: f32, len: usize) -> Option<usize> {
        let index =
            ((f64::from(x) - self.pan_offset) / f64::from(self.scaled_segment_width())).floor();
        (index >= 0.0 && (index as usize) < len).then_some(index as usize)
    }

    /// Axis labels for `start..=end` at the current zoom and pan.
    pub fn labels(&self, start: NaiveDate, end: NaiveDate) -> Vec<Label> {
        let scaled = f64::from(self.scaled_segment_width());
        let interval = self.label_interval().hours();
        let width = f64::from(self.container_width);
        let cull = f64::from(self.settings.label_cull_margin);
        let fade = f64::from(self.settings.label_fade_margin);

        let mut labels = Vec::new();
        for (day_index, date) in days_in_range(start, end).into_iter().enumerate() {
            for hour in (0..24).step_by(interval as usize) {
                let slot = day_index * SLOTS_PER_DAY + hour as usize * SLOTS_PER_HOUR;
                let left = slot as f64 * scaled + self.pan_offset;
                if !(left > -cull && left < width + cull) {
                    continue;
                }
                let opacity = if left > -fade && left < width + fade {
                    1.0
                } else {
                    0.0
                };
                let left = left as f32;
                let label = if hour == 0 {
                    Label {
                        left,
                        time: "00:00".to_string(),
                        date: date.format("%b %-d, %Y").to_string(),
                        kind: LabelKind::DateMarker,
                        opacity,
                    }
                } else {
                    Label {
                        left,
                        time: format!("{:02}:00", hour),
                        date: String::new(),
                        kind: LabelKind::TimeMarker,
                        opacity,
                    }
                };
                labels.push(label);
            }
        }
        labels
    }
}

/// The synthetic per-5-minute dataset, regenerated only when the range changes.
pub struct SegmentDataset {
    memo: Memo<(NaiveDate, NaiveDate, Color32), Vec<Segment>>,
    source: Box<dyn IntensitySource>,
}

impl SegmentDataset {
    pub fn new(source: Box<dyn IntensitySource>) -> Self {
        Self {
            memo: Memo::new(),
            source,
        }
    }

    /// Segments for `start..=end`, generating them if the range differs
    /// from the last call.
    pub fn segments(&mut self, start: NaiveDate, end: NaiveDate, color: Color32) -> &[Segment] {
        let source = &mut self.source;
        self.memo.get_or_compute((start, end, color), |&(start, end, color)| {
            let segments = generate_segments(start, end, color, &mut **source);
            log::debug!(
                "generated {} segments for {} ..= {}",
                segments.len(),
                start,
                end
            );
            segments
        })
    }
}
