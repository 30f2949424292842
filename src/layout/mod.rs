//! Layout: screen rectangles for the editor and the status bar.
//!
//! The layout is recomputed on resize; there is no tree, just a split.

mod rect;

pub use rect::{Rect, ScreenLayout};
