pub mod calendar_picker;
pub mod dialogs;
pub mod range_input;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;
