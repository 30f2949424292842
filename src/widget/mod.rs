//! Widgets: the editor view and the status bar.
//!
//! Both implement [`Widget`] and draw into an
//! [`OutputBuffer`](crate::terminal::OutputBuffer); the main loop
//! repaints whichever reports `needs_redraw`.

mod editor_widget;
mod measure;
mod palette;
mod status_bar;
mod traits;

pub use editor_widget::{EditorViewConfig, EditorWidget};
pub use measure::{display_width, truncate_to_width};
pub use palette::Palette;
pub use status_bar::{StatusBar, NOTICE_TIMEOUT, WARNING_THRESHOLD};
pub use traits::Widget;
