pub mod calendar;
pub mod date_range;
pub mod memo;
pub mod segment;
pub mod timeline;

pub use calendar::{CalendarCell, CalendarMonth};
pub use date_range::DateRangeState;
pub use timeline::{Label, LabelKind, SegmentDataset, TimelineViewport};
